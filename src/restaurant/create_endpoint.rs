//! Restaurant creation endpoint.

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
    restaurant::{NewRestaurant, RestaurantFormData, db::create_restaurant},
};

/// The state needed for reading and changing restaurants.
#[derive(Debug, Clone)]
pub struct RestaurantState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RestaurantState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle restaurant creation.
pub async fn create_restaurant_endpoint(
    State(state): State<RestaurantState>,
    form: Result<Json<RestaurantFormData>, JsonRejection>,
) -> Result<Json<MutationResponse>, Error> {
    let Json(form) = form?;
    let new_restaurant = NewRestaurant::from_form(&form)?;

    let connection = lock_connection(&state.db_connection)?;
    let restaurant = create_restaurant(&new_restaurant, &connection)?;

    tracing::info!(
        "created {} restaurant {} \"{}\"",
        restaurant.category,
        restaurant.id,
        restaurant.name
    );

    Ok(Json(MutationResponse::created(
        restaurant.id,
        "Restaurant added successfully",
    )))
}
