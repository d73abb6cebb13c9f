//! Meal deletion endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    db::lock_connection,
    item::MutationResponse,
    meal::{MealId, MealState, db::delete_meal},
};

/// Handle meal deletion. Deleting a meal that does not exist responds with 404.
pub async fn delete_meal_endpoint(
    meal_id: Result<Path<MealId>, PathRejection>,
    State(state): State<MealState>,
) -> Result<Json<MutationResponse>, Error> {
    let Path(meal_id) = meal_id?;
    let connection = lock_connection(&state.db_connection)?;
    delete_meal(meal_id, &connection)?;

    tracing::info!("deleted meal {meal_id}");

    Ok(Json(MutationResponse::done("Meal deleted successfully")))
}
