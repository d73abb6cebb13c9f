#![allow(missing_docs)]

use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, auth::COOKIE_TOKEN,
    create_cookie_key, endpoints, item::MutationResponse, routing::build_router,
};

/// A bcrypt cost low enough to keep tests fast.
pub const TEST_PASSWORD_COST: u32 = 4;

/// App state backed by a freshly seeded in-memory database.
pub fn get_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(
        connection,
        create_cookie_key("test secret"),
        TEST_PASSWORD_COST,
    )
    .expect("Could not create app state")
}

pub fn get_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state))
}

/// Log in as the seeded admin and return the session cookie.
pub async fn log_in(server: &TestServer) -> Cookie<'static> {
    let response = server
        .post(endpoints::LOG_IN)
        .json(&json!({
            "username": DEFAULT_ADMIN_USERNAME,
            "password": DEFAULT_ADMIN_PASSWORD,
        }))
        .await;

    response.assert_status_ok();
    response.cookie(COOKIE_TOKEN)
}

/// Create a restaurant through the API and return its ID.
pub async fn create_test_restaurant(
    server: &TestServer,
    token_cookie: &Cookie<'static>,
    name: &str,
    category: &str,
) -> i64 {
    let response = server
        .post(endpoints::RESTAURANTS)
        .add_cookie(token_cookie.clone())
        .json(&json!({"name": name, "category": category, "details": "Test details"}))
        .await;

    response.assert_status_ok();
    response
        .json::<MutationResponse>()
        .id
        .expect("create should return the new ID")
}
