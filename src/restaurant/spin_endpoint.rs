//! The restaurant spin: picks one restaurant at random.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    db::lock_connection,
    restaurant::{CategoryFilter, Restaurant, RestaurantState, get_restaurants},
    selection::pick_one,
};

/// Request body for a restaurant spin.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RestaurantSpinRequest {
    /// A category, `all` or nothing.
    pub category: Option<String>,
}

/// Pick one restaurant from the requested category.
///
/// Responds with 404 if the category has no restaurants.
pub async fn spin_restaurant_endpoint(
    State(state): State<RestaurantState>,
    request: Result<Json<RestaurantSpinRequest>, JsonRejection>,
) -> Result<Json<Restaurant>, Error> {
    let request = match request {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => RestaurantSpinRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let filter = CategoryFilter::parse(request.category.as_deref())?;

    let restaurants = {
        let connection = lock_connection(&state.db_connection)?;
        get_restaurants(filter, &connection)?
    };

    let winner = pick_one(&restaurants, &mut rand::rng()).ok_or(Error::NoRestaurantsFound)?;
    tracing::debug!(
        "picked restaurant {} from {} candidates",
        winner.id,
        restaurants.len()
    );

    Ok(Json(winner))
}
