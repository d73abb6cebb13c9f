//! Restaurant deletion endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    db::lock_connection,
    item::MutationResponse,
    restaurant::{RestaurantId, RestaurantState, db::delete_restaurant},
};

/// Handle restaurant deletion. Deleting a restaurant that does not exist responds with 404.
pub async fn delete_restaurant_endpoint(
    restaurant_id: Result<Path<RestaurantId>, PathRejection>,
    State(state): State<RestaurantState>,
) -> Result<Json<MutationResponse>, Error> {
    let Path(restaurant_id) = restaurant_id?;
    let connection = lock_connection(&state.db_connection)?;
    delete_restaurant(restaurant_id, &connection)?;

    tracing::info!("deleted restaurant {restaurant_id}");

    Ok(Json(MutationResponse::done(
        "Restaurant deleted successfully",
    )))
}
