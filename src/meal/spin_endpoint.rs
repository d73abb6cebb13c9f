//! The meal spin: picks one or more meals at random.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    db::lock_connection,
    meal::{Meal, MealState, get_all_meals},
    selection::{meal_pick_count, pick_random},
};

/// Request body for a meal spin.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SpinRequest {
    /// How many meals to pick. Clamped to `1..=MAX_MEAL_PICKS`.
    pub count: Option<i64>,
}

/// Pick up to [MAX_MEAL_PICKS](crate::MAX_MEAL_PICKS) distinct meals at random.
///
/// A request without a JSON body spins for a single meal. An empty meal list gives an empty
/// array rather than an error.
pub async fn spin_meals_endpoint(
    State(state): State<MealState>,
    request: Result<Json<SpinRequest>, JsonRejection>,
) -> Result<Json<Vec<Meal>>, Error> {
    let request = match request {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => SpinRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let count = meal_pick_count(request.count);

    let meals = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_meals(&connection)?
    };

    let winners = pick_random(&meals, count, &mut rand::rng());
    tracing::debug!("picked {} of {} meals", winners.len(), meals.len());

    Ok(Json(winners))
}
