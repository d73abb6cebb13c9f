//! This file defines the route for handling log-in requests.
//! The cookie module handles the lower level session cookie logic.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    auth::{
        PasswordHash, Token, User, cookie::set_auth_cookie, get_user_by_username,
        session::create_session,
    },
    db::lock_connection,
};

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How long a session lasts after logging in.
    pub session_duration: Duration,
    /// Whether session cookies should only be sent over HTTPS.
    pub secure_cookies: bool,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            session_duration: state.session_duration,
            secure_cookies: state.secure_cookies,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The credentials entered by the user in the log-in form.
///
/// The password is stored as a plain string. There is no need for validation here since
/// it will be compared against the password hash in the database.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LogInData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// The body returned by a successful log-in.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct LogInResponse {
    pub success: bool,
    pub message: String,
}

/// Check `username` and `password` against the user table.
///
/// An unknown username still runs a bcrypt comparison against a dummy hash, so both failure
/// cases take a similar amount of time and return the same error.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the username is unknown or the password is wrong,
/// or another error if the database or hashing library failed.
pub fn verify_credentials(
    username: &str,
    password: &str,
    db_connection: &Mutex<Connection>,
) -> Result<User, Error> {
    let user = {
        let connection = lock_connection(db_connection)?;
        match get_user_by_username(username, &connection) {
            Ok(user) => Some(user),
            Err(Error::NotFound) => None,
            Err(error) => return Err(error),
        }
    };

    let password_hash = user
        .as_ref()
        .map(|user| user.password_hash.clone())
        .unwrap_or_else(PasswordHash::dummy);

    let is_password_valid = password_hash
        .verify(password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    match user {
        Some(user) if is_password_valid => Ok(user),
        _ => Err(Error::InvalidCredentials),
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, a new session is stored, the session cookie is set and a
/// success message returned.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The request body is not valid JSON.
/// - The username or password is not correct.
/// - An internal error occurred when verifying the password.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    payload: Result<Json<LogInData>, JsonRejection>,
) -> Result<(PrivateCookieJar, Json<LogInResponse>), Error> {
    let Json(credentials) = payload?;

    let user = verify_credentials(
        &credentials.username,
        &credentials.password,
        &state.db_connection,
    )
    .inspect_err(|error| {
        if *error == Error::InvalidCredentials {
            tracing::info!("Rejected log-in attempt");
        }
    })?;

    let expires_at = OffsetDateTime::now_utc() + state.session_duration;
    let session_id = {
        let connection = lock_connection(&state.db_connection)?;
        create_session(user.id, expires_at, &connection)?
    };
    let token = Token::new(&user, session_id, expires_at);

    let jar = set_auth_cookie(jar, &token, state.secure_cookies)?;
    tracing::info!("User {} logged in", user.username);

    Ok((
        jar,
        Json(LogInResponse {
            success: true,
            message: "Login successful".to_owned(),
        }),
    ))
}
