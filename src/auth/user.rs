//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, auth::PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user who may log in to the admin panel.
///
/// The caller should ensure that `id` and `username` are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name the user logs in with.
    pub username: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred, e.g. the username is taken.
pub fn create_user(
    username: &str,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO users (username, password) VALUES (?1, ?2)",
        (username, password_hash.as_ref()),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username: username.to_owned(),
        password_hash,
    })
}

/// Get the user from the database whose username is `username`.
///
/// # Errors
///
/// This function will return an error if:
/// - `username` does not belong to a registered user ([Error::NotFound]).
/// - there was an error trying to access the store.
pub fn get_user_by_username(username: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username, password FROM users WHERE username = :username")?
        .query_row(&[(":username", &username)], map_row)
        .map_err(|error| error.into())
}

/// Replace the password hash of the user called `username`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such user, or [Error::SqlError] if the update failed.
pub fn update_password(
    username: &str,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE users SET password = ?1 WHERE username = ?2",
        (password_hash.as_ref(), username),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM users;", [], |row| row.get::<_, i64>(0))
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let username = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;

    Ok(User {
        id: UserID::new(raw_id),
        username,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
    })
}
