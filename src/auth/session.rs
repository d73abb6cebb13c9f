//! Server-side session records.
//!
//! The encrypted cookie names a session, and the session only counts while its row exists.
//! Logging out deletes the row, so a copy of the old cookie stops working straight away.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::PrivateCookieJar;
use rand::Rng;
use rusqlite::{Connection, OptionalExtension};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    auth::{Token, UserID, cookie::get_token_from_cookies},
    db::lock_connection,
};

/// The state needed to check or end a session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The database connection holding the session table.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SessionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create the session table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_session_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                expires_at INTEGER NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn generate_session_id() -> String {
    format!("{:032x}", rand::rng().random::<u128>())
}

/// Start a session for `user_id` that ends at `expires_at` and return its ID.
///
/// Sessions that have already expired are cleared out at the same time.
///
/// # Errors
///
/// Returns a [Error::SqlError] if the session could not be stored.
pub(crate) fn create_session(
    user_id: UserID,
    expires_at: OffsetDateTime,
    connection: &Connection,
) -> Result<String, Error> {
    connection.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        (OffsetDateTime::now_utc().unix_timestamp(),),
    )?;

    let session_id = generate_session_id();
    connection.execute(
        "INSERT INTO sessions (id, user_id, expires_at) VALUES (?1, ?2, ?3)",
        (&session_id, user_id.as_i64(), expires_at.unix_timestamp()),
    )?;

    Ok(session_id)
}

/// Whether `session_id` names a session that is still open at `now`.
///
/// # Errors
///
/// Returns a [Error::SqlError] if the session table could not be queried.
pub(crate) fn is_session_active(
    session_id: &str,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<bool, Error> {
    let found = connection
        .query_row(
            "SELECT 1 FROM sessions WHERE id = ?1 AND expires_at > ?2",
            (session_id, now.unix_timestamp()),
            |_| Ok(()),
        )
        .optional()?;

    Ok(found.is_some())
}

/// End the session `session_id`. Ending a session that does not exist is not an error.
///
/// # Errors
///
/// Returns a [Error::SqlError] if the row could not be deleted.
pub(crate) fn delete_session(session_id: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM sessions WHERE id = ?1", (session_id,))?;

    Ok(())
}

/// End every session belonging to `user_id`, e.g. after a password change.
///
/// # Errors
///
/// Returns a [Error::SqlError] if the rows could not be deleted.
pub fn delete_user_sessions(user_id: UserID, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM sessions WHERE user_id = ?1", (user_id.as_i64(),))
        .map_err(|error| error.into())
}

/// Read the session token from the cookie jar and check that its session is still open.
///
/// # Errors
///
/// Returns [Error::AuthRequired] if the cookie is missing, invalid or expired, or if the session
/// has ended. Returns a store error if the session table could not be read.
pub(crate) fn get_active_token(
    jar: &PrivateCookieJar,
    db_connection: &Mutex<Connection>,
) -> Result<Token, Error> {
    let token = get_token_from_cookies(jar)?;
    let connection = lock_connection(db_connection)?;

    if is_session_active(&token.session_id, OffsetDateTime::now_utc(), &connection)? {
        Ok(token)
    } else {
        tracing::debug!("Session for {} has ended", token.username);
        Err(Error::AuthRequired)
    }
}

#[cfg(test)]
mod session_tests {
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::auth::{PasswordHash, UserID, create_user, create_user_table};

    use super::{
        create_session, create_session_table, delete_session, delete_user_sessions,
        is_session_active,
    };

    fn get_db_connection() -> (Connection, UserID) {
        let connection =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_user_table(&connection).expect("Could not create user table");
        create_session_table(&connection).expect("Could not create session table");
        let user = create_user("admin", PasswordHash::new_unchecked("hunter2"), &connection)
            .expect("Could not create user");

        (connection, user.id)
    }

    #[test]
    fn new_session_is_active_until_it_expires() {
        let (connection, user_id) = get_db_connection();
        let expires_at = OffsetDateTime::now_utc() + Duration::hours(1);

        let session_id = create_session(user_id, expires_at, &connection).unwrap();

        assert_eq!(session_id.len(), 32);
        assert!(is_session_active(&session_id, OffsetDateTime::now_utc(), &connection).unwrap());
        assert!(!is_session_active(&session_id, expires_at, &connection).unwrap());
    }

    #[test]
    fn deleted_session_is_inactive() {
        let (connection, user_id) = get_db_connection();
        let expires_at = OffsetDateTime::now_utc() + Duration::hours(1);
        let session_id = create_session(user_id, expires_at, &connection).unwrap();

        delete_session(&session_id, &connection).unwrap();

        assert!(!is_session_active(&session_id, OffsetDateTime::now_utc(), &connection).unwrap());
        delete_session(&session_id, &connection).expect("deleting twice should succeed");
    }

    #[test]
    fn each_log_in_gets_its_own_session() {
        let (connection, user_id) = get_db_connection();
        let expires_at = OffsetDateTime::now_utc() + Duration::hours(1);

        let first = create_session(user_id, expires_at, &connection).unwrap();
        let second = create_session(user_id, expires_at, &connection).unwrap();
        delete_session(&first, &connection).unwrap();

        assert_ne!(first, second);
        assert!(is_session_active(&second, OffsetDateTime::now_utc(), &connection).unwrap());
    }

    #[test]
    fn expired_sessions_are_cleared_on_log_in() {
        let (connection, user_id) = get_db_connection();
        let now = OffsetDateTime::now_utc();
        create_session(user_id, now - Duration::hours(1), &connection).unwrap();

        create_session(user_id, now + Duration::hours(1), &connection).unwrap();

        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn delete_user_sessions_ends_all_sessions() {
        let (connection, user_id) = get_db_connection();
        let expires_at = OffsetDateTime::now_utc() + Duration::hours(1);
        let first = create_session(user_id, expires_at, &connection).unwrap();
        let second = create_session(user_id, expires_at, &connection).unwrap();

        let deleted = delete_user_sessions(user_id, &connection).unwrap();

        assert_eq!(deleted, 2);
        let now = OffsetDateTime::now_utc();
        assert!(!is_session_active(&first, now, &connection).unwrap());
        assert!(!is_session_active(&second, now, &connection).unwrap());
    }
}
