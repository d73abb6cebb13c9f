//! Reports whether the client holds a valid session.

use axum::{Json, extract::State};
use axum_extra::extract::PrivateCookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::session::{SessionState, get_active_token},
};

/// Whether the client is logged in, and as whom.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Report the session state of the client.
///
/// # Errors
///
/// Returns an error if the session table could not be read.
pub async fn get_auth_status(
    State(state): State<SessionState>,
    jar: PrivateCookieJar,
) -> Result<Json<AuthStatus>, Error> {
    let status = match get_active_token(&jar, &state.db_connection) {
        Ok(token) => AuthStatus {
            authenticated: true,
            username: Some(token.username),
        },
        Err(Error::AuthRequired) => AuthStatus {
            authenticated: false,
            username: None,
        },
        Err(error) => return Err(error),
    };

    Ok(Json(status))
}
