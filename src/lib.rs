//! Dinner Spinner is a web app that helps a household decide what to eat.
//!
//! This library provides a JSON API for spinning a wheel of meals or
//! restaurants, plus an admin surface for curating those lists behind a
//! single shared login.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod auth;
mod db;
mod endpoints;
mod item;
mod logging;
mod meal;
mod not_found;
mod restaurant;
mod routing;
mod selection;
mod wheel;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, create_cookie_key};
pub use auth::{
    PasswordHash, SESSION_DURATION, User, UserID, delete_user_sessions, get_user_by_username,
    update_password,
};
pub use db::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, initialize as initialize_db};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use meal::{Meal, MealId};
pub use restaurant::{Category, CategoryFilter, Restaurant, RestaurantId};
pub use routing::build_router;
pub use selection::{MAX_MEAL_PICKS, meal_pick_count, pick_random};
pub use wheel::{
    Effect, Event, MAX_SECTORS, PALETTE, Phase, SPIN_FAILED_MESSAGE, Sector, SpinPlan, WheelItem,
    WheelKind, WheelLayout, WheelModel, plan_spin, target_rotation,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required text field was missing or only contained whitespace.
    ///
    /// The wrapped string is the name of the offending field.
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// A category that is not one of the known restaurant categories.
    #[error("Invalid category \"{0}\"")]
    InvalidCategory(String),

    /// The request body could not be parsed as the expected JSON.
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    /// A path parameter, such as an item ID, could not be parsed.
    #[error("{0}")]
    InvalidPath(String),

    /// The username or password did not match.
    ///
    /// The same error is used for unknown usernames and wrong passwords so
    /// that clients cannot tell which one failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request needs a valid, unexpired session.
    #[error("Authentication required")]
    AuthRequired,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("Not found")]
    NotFound,

    /// Tried to update a meal that does not exist
    #[error("Meal not found")]
    UpdateMissingMeal,

    /// Tried to delete a meal that does not exist
    #[error("Meal not found")]
    DeleteMissingMeal,

    /// Tried to update a restaurant that does not exist
    #[error("Restaurant not found")]
    UpdateMissingRestaurant,

    /// Tried to delete a restaurant that does not exist
    #[error("Restaurant not found")]
    DeleteMissingRestaurant,

    /// A restaurant spin found no candidates for the chosen category.
    #[error("No restaurants found for the selected category")]
    NoRestaurantsFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The session token could not be serialized or formatted.
    #[error("could not create session token: {0}")]
    TokenError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPath(rejection.body_text())
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::EmptyField(_)
            | Error::InvalidCategory(_)
            | Error::InvalidRequestBody(_)
            | Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::AuthRequired => StatusCode::UNAUTHORIZED,
            Error::NotFound
            | Error::UpdateMissingMeal
            | Error::DeleteMissingMeal
            | Error::UpdateMissingRestaurant
            | Error::DeleteMissingRestaurant
            | Error::NoRestaurantsFound => StatusCode::NOT_FOUND,
            Error::HashingError(_)
            | Error::TokenError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn field(&self) -> Option<&'static str> {
        match self {
            Error::EmptyField(field) => Some(*field),
            Error::InvalidCategory(_) => Some("category"),
            _ => None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal errors are logged, never shown to the client.
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error,
            field: self.field(),
        };

        (status, Json(body)).into_response()
    }
}
