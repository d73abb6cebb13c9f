//! Restaurant editing endpoint.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    db::lock_connection,
    item::MutationResponse,
    restaurant::{
        NewRestaurant, RestaurantFormData, RestaurantId, RestaurantState, db::update_restaurant,
    },
};

/// Handle restaurant updates. Responds with 404 if the restaurant does not exist.
pub async fn update_restaurant_endpoint(
    restaurant_id: Result<Path<RestaurantId>, PathRejection>,
    State(state): State<RestaurantState>,
    form: Result<Json<RestaurantFormData>, JsonRejection>,
) -> Result<Json<MutationResponse>, Error> {
    let Path(restaurant_id) = restaurant_id?;
    let Json(form) = form?;
    let restaurant = NewRestaurant::from_form(&form)?;

    let connection = lock_connection(&state.db_connection)?;
    update_restaurant(restaurant_id, &restaurant, &connection)?;

    tracing::info!("updated restaurant {restaurant_id}");

    Ok(Json(MutationResponse::done("Restaurant updated successfully")))
}
