//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    http::{HeaderValue, header::CACHE_CONTROL},
    middleware,
    routing::{get, post, put},
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    AppState,
    auth::{auth_guard, get_auth_status, post_log_in, post_log_out},
    endpoints,
    meal::{
        create_meal_endpoint, delete_meal_endpoint, get_meal_wheel_endpoint, get_meals_endpoint,
        spin_meals_endpoint, update_meal_endpoint,
    },
    not_found::get_404_not_found,
    restaurant::{
        create_restaurant_endpoint, delete_restaurant_endpoint, get_restaurant_wheel_endpoint,
        get_restaurants_endpoint, spin_restaurant_endpoint, update_restaurant_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::LOG_OUT, post(post_log_out))
        .route(endpoints::AUTH_STATUS, get(get_auth_status))
        .route(endpoints::MEALS, get(get_meals_endpoint))
        .route(endpoints::MEAL_WHEEL, get(get_meal_wheel_endpoint))
        .route(endpoints::SPIN_MEALS, post(spin_meals_endpoint))
        .route(endpoints::RESTAURANTS, get(get_restaurants_endpoint))
        .route(
            endpoints::RESTAURANT_WHEEL,
            get(get_restaurant_wheel_endpoint),
        )
        .route(endpoints::SPIN_RESTAURANT, post(spin_restaurant_endpoint));

    // `route_layer` only guards matched routes, so unknown paths still reach the fallback.
    let protected_routes = Router::new()
        .route(endpoints::MEALS, post(create_meal_endpoint))
        .route(
            endpoints::MEAL,
            put(update_meal_endpoint).delete(delete_meal_endpoint),
        )
        .route(endpoints::RESTAURANTS, post(create_restaurant_endpoint))
        .route(
            endpoints::RESTAURANT,
            put(update_restaurant_endpoint).delete(delete_restaurant_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::header::CACHE_CONTROL;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        meal::Meal,
        test_utils::{get_test_server, get_test_state, log_in},
    };

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server(get_test_state());

        let response = server.get("/api/does-not-exist").await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>(), json!({"error": "Not found"}));
        assert_eq!(response.header(CACHE_CONTROL), "no-store");
    }

    #[tokio::test]
    async fn public_and_protected_methods_share_a_path() {
        let server = get_test_server(get_test_state());

        server.get(endpoints::MEALS).await.assert_status_ok();
        server
            .post(endpoints::MEALS)
            .json(&json!({"name": "Soup", "ingredients": "Water"}))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn mutation_is_visible_to_next_list() {
        let server = get_test_server(get_test_state());
        let token_cookie = log_in(&server).await;
        let before = server.get(endpoints::MEALS).await.json::<Vec<Meal>>();

        server
            .post(endpoints::MEALS)
            .add_cookie(token_cookie)
            .json(&json!({"name": "Soup", "ingredients": "Water"}))
            .await
            .assert_status_ok();

        let response = server.get(endpoints::MEALS).await;
        assert_eq!(response.header(CACHE_CONTROL), "no-store");
        assert_eq!(response.json::<Vec<Meal>>().len(), before.len() + 1);
    }
}
