//! Meal creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::lock_connection,
    item::MutationResponse,
    meal::{MealFormData, NewMeal, db::create_meal},
};

/// The state needed for reading and changing meals.
#[derive(Debug, Clone)]
pub struct MealState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for MealState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle meal creation.
pub async fn create_meal_endpoint(
    State(state): State<MealState>,
    form: Result<Json<MealFormData>, JsonRejection>,
) -> Result<Json<MutationResponse>, Error> {
    let Json(form) = form?;
    let new_meal = NewMeal::from_form(&form)?;

    let connection = lock_connection(&state.db_connection)?;
    let meal = create_meal(&new_meal, &connection)?;

    tracing::info!("created meal {} \"{}\"", meal.id, meal.name);

    Ok(Json(MutationResponse::created(
        meal.id,
        "Meal added successfully",
    )))
}

#[cfg(test)]
mod create_meal_endpoint_tests {
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        item::MutationResponse,
        meal::Meal,
        test_utils::{get_test_server, get_test_state, log_in},
    };

    #[tokio::test]
    async fn create_meal_succeeds() {
        let server = get_test_server(get_test_state());
        let token_cookie = log_in(&server).await;

        let response = server
            .post(endpoints::MEALS)
            .add_cookie(token_cookie)
            .json(&json!({"name": "  Pad Thai ", "ingredients": "Rice noodles, peanuts"}))
            .await;

        response.assert_status_ok();
        let body = response.json::<MutationResponse>();
        assert!(body.success);
        assert_eq!(body.message, "Meal added successfully");
        let new_id = body.id.expect("create should return the new ID");

        let meals = server.get(endpoints::MEALS).await.json::<Vec<Meal>>();
        let meal = meals
            .iter()
            .find(|meal| meal.id == new_id)
            .expect("new meal should be listed");
        assert_eq!(meal.name.as_ref(), "Pad Thai");
        assert_eq!(meal.ingredients.as_ref(), "Rice noodles, peanuts");
    }

    #[tokio::test]
    async fn create_meal_requires_session() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::MEALS)
            .json(&json!({"name": "Pad Thai", "ingredients": "Noodles"}))
            .await;

        response.assert_status_unauthorized();
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Authentication required"})
        );
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let server = get_test_server(get_test_state());
        let token_cookie = log_in(&server).await;

        let response = server
            .post(endpoints::MEALS)
            .add_cookie(token_cookie)
            .json(&json!({"name": "   ", "ingredients": "Noodles"}))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["field"], "name");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let server = get_test_server(get_test_state());
        let token_cookie = log_in(&server).await;

        let response = server
            .post(endpoints::MEALS)
            .add_cookie(token_cookie)
            .text("name=Pad+Thai")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
    }
}
