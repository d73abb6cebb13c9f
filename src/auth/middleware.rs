//! Authentication middleware that rejects requests without a valid session cookie.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::auth::session::{SessionState, get_active_token};

/// Middleware function that checks for a valid session cookie.
///
/// The session [Token](crate::auth::Token) is placed into the request extensions and the request
/// executed normally if the cookie is valid and unexpired and its session has not been ended,
/// otherwise a 401 JSON error is returned.
///
/// **Note**: The router state must provide an `axum_extra::extract::cookie::Key` and a
/// [SessionState] via `FromRef`.
pub async fn auth_guard(
    State(state): State<SessionState>,
    jar: PrivateCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match get_active_token(&jar, &state.db_connection) {
        Ok(token) => {
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        Err(error) => {
            tracing::debug!(
                "Rejected unauthenticated request to {}",
                request.uri().path()
            );
            error.into_response()
        }
    }
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{
        Extension, Router, middleware,
        routing::{get, post},
    };
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use time::{Duration, OffsetDateTime};

    use crate::{
        auth::{Token, cookie::COOKIE_TOKEN, post_log_in},
        endpoints,
        test_utils::{get_test_state, log_in},
    };

    use super::auth_guard;

    async fn test_handler(Extension(token): Extension<Token>) -> String {
        format!("Hello, {}!", token.username)
    }

    const TEST_PROTECTED_ROUTE: &str = "/api/protected";

    fn get_test_server() -> TestServer {
        let state = get_test_state();

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .route(endpoints::LOG_IN, post(post_log_in))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_cookie() {
        let server = get_test_server();
        let token_cookie = log_in(&server).await;

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(token_cookie)
            .await;

        response.assert_status_ok();
        response.assert_text("Hello, admin!");
    }

    #[tokio::test]
    async fn get_protected_route_with_no_auth_cookie_is_unauthorized() {
        let server = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn get_protected_route_with_invalid_auth_cookie_is_unauthorized() {
        let server = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(Cookie::build((COOKIE_TOKEN, "FOOBAR")).build())
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn session_is_not_extended_by_requests() {
        let server = get_test_server();
        let token_cookie = log_in(&server).await;
        let original_expiry = token_cookie.expires_datetime().unwrap();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(token_cookie)
            .await;

        response.assert_status_ok();
        assert!(
            response.maybe_cookie(COOKIE_TOKEN).is_none(),
            "auth guard should not reissue the session cookie"
        );
        assert!(original_expiry <= OffsetDateTime::now_utc() + Duration::hours(24));
    }
}
