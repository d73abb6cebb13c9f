//! Endpoints for listing meals and laying them out on the wheel.

use axum::{Json, extract::State};

use crate::{
    Error,
    db::lock_connection,
    meal::{Meal, MealState, get_all_meals},
    wheel::WheelLayout,
};

/// List every meal, ordered by name.
pub async fn get_meals_endpoint(State(state): State<MealState>) -> Result<Json<Vec<Meal>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_meals(&connection).map(Json)
}

/// The meal wheel as the client should draw it.
pub async fn get_meal_wheel_endpoint(
    State(state): State<MealState>,
) -> Result<Json<WheelLayout>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let meals = get_all_meals(&connection)?;

    Ok(Json(WheelLayout::new(&meals)))
}
