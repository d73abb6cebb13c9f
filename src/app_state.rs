//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{Error, auth::SESSION_DURATION, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// How long a session lasts after logging in.
    pub session_duration: Duration,

    /// Whether session cookies should only be sent over HTTPS.
    pub secure_cookies: bool,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models
    /// and seeding a fresh database with the admin user and sample meals.
    /// `password_cost` is the bcrypt cost used when hashing the seeded admin password.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, cookie_key: Key, password_cost: u32) -> Result<Self, Error> {
        initialize(&db_connection, password_cost)?;

        Ok(Self {
            cookie_key,
            session_duration: SESSION_DURATION,
            secure_cookies: false,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }

    /// Set whether session cookies carry the `Secure` attribute.
    ///
    /// Enable this when the server sits behind a TLS-terminating proxy.
    pub fn with_secure_cookies(mut self, secure_cookies: bool) -> Self {
        self.secure_cookies = secure_cookies;
        self
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod app_state_tests {
    use rusqlite::Connection;

    use crate::{
        auth::SESSION_DURATION,
        test_utils::TEST_PASSWORD_COST,
    };

    use super::{AppState, create_cookie_key};

    #[test]
    fn same_secret_gives_same_key() {
        assert_eq!(
            create_cookie_key("hunter2").master(),
            create_cookie_key("hunter2").master()
        );
        assert_ne!(
            create_cookie_key("hunter2").master(),
            create_cookie_key("hunter3").master()
        );
    }

    #[test]
    fn new_state_uses_fixed_session_duration() {
        let connection = Connection::open_in_memory().unwrap();

        let state = AppState::new(connection, create_cookie_key("foo"), TEST_PASSWORD_COST)
            .expect("Could not create app state");

        assert_eq!(state.session_duration, SESSION_DURATION);
        assert!(!state.secure_cookies);
        assert!(state.with_secure_cookies(true).secure_cookies);
    }
}
