//! Defines functions for handling user sessions with private cookies.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::Token};

pub(crate) const COOKIE_TOKEN: &str = "token";

/// How long a session lasts after logging in.
///
/// Sessions do not slide. The expiry is set once at log-in.
pub const SESSION_DURATION: Duration = Duration::hours(24);

fn build_cookie(value: String, expiry: OffsetDateTime, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_TOKEN, value))
        .path("/")
        .expires(expiry)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .build()
}

/// Add an auth cookie to the cookie jar holding `token`, indicating that its user is logged in.
///
/// The cookie expires together with the token.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns an [Error::TokenError] if the token cannot be serialized.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    token: &Token,
    secure: bool,
) -> Result<PrivateCookieJar, Error> {
    let token_string =
        serde_json::to_string(token).map_err(|error| Error::TokenError(error.to_string()))?;

    Ok(jar.add(build_cookie(token_string, token.expires_at, secure)))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    let mut cookie = build_cookie("deleted".to_owned(), OffsetDateTime::UNIX_EPOCH, false);
    cookie.set_max_age(Duration::ZERO);

    jar.add(cookie)
}

/// Read the session token from the auth cookie.
///
/// This only checks the cookie itself. Use [get_active_token](crate::auth::session::get_active_token)
/// to also check that the session has not been ended on the server.
///
/// # Errors
///
/// Returns [Error::AuthRequired] if the cookie is missing, cannot be decrypted or parsed,
/// or the session has expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::AuthRequired)?;
    let token: Token =
        serde_json::from_str(cookie.value_trimmed()).map_err(|_| Error::AuthRequired)?;

    if token.is_expired_at(OffsetDateTime::now_utc()) {
        tracing::debug!("Session for {} expired at {}", token.username, token.expires_at);
        return Err(Error::AuthRequired);
    }

    Ok(token)
}
