//! Endpoints for listing restaurants and laying them out on the wheel.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    db::lock_connection,
    restaurant::{CategoryFilter, Restaurant, RestaurantState, get_restaurants},
    wheel::WheelLayout,
};

/// The query string accepted by the restaurant list and wheel.
#[derive(Debug, Default, Deserialize)]
pub struct RestaurantQuery {
    /// A category, `all` or nothing.
    pub category: Option<String>,
}

fn load_restaurants(
    state: &RestaurantState,
    query: &RestaurantQuery,
) -> Result<Vec<Restaurant>, Error> {
    let filter = CategoryFilter::parse(query.category.as_deref())?;
    let connection = lock_connection(&state.db_connection)?;

    get_restaurants(filter, &connection)
}

/// List the restaurants in the requested category, ordered by name.
pub async fn get_restaurants_endpoint(
    State(state): State<RestaurantState>,
    Query(query): Query<RestaurantQuery>,
) -> Result<Json<Vec<Restaurant>>, Error> {
    load_restaurants(&state, &query).map(Json)
}

/// The restaurant wheel for the requested category as the client should draw it.
pub async fn get_restaurant_wheel_endpoint(
    State(state): State<RestaurantState>,
    Query(query): Query<RestaurantQuery>,
) -> Result<Json<WheelLayout>, Error> {
    let restaurants = load_restaurants(&state, &query)?;

    Ok(Json(WheelLayout::new(&restaurants)))
}
