//! Log-out route handler that ends the session and invalidates the session cookie.

use axum::{Json, extract::State};
use axum_extra::extract::PrivateCookieJar;
use serde_json::{Value, json};

use crate::{
    Error,
    auth::{
        cookie::{get_token_from_cookies, invalidate_auth_cookie},
        session::{SessionState, delete_session},
    },
    db::lock_connection,
};

/// End the current session and invalidate the session cookie.
///
/// Logging out without a session is not an error.
///
/// # Errors
///
/// Returns an error if the session could not be removed from the database.
pub async fn post_log_out(
    State(state): State<SessionState>,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Json<Value>), Error> {
    if let Ok(token) = get_token_from_cookies(&jar) {
        let connection = lock_connection(&state.db_connection)?;
        delete_session(&token.session_id, &connection)?;
        tracing::info!("User {} logged out", token.username);
    }

    Ok((invalidate_auth_cookie(jar), Json(json!({ "success": true }))))
}
