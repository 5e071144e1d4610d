//! Defines the endpoint for deleting a restaurant visit.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error, database_id::RestaurantId, response::SuccessBody, restaurant::RestaurantState,
};

/// A route handler for deleting a restaurant visit and its photo.
pub async fn delete_restaurant_endpoint(
    State(state): State<RestaurantState>,
    path: Result<Path<RestaurantId>, PathRejection>,
) -> Result<Json<SuccessBody>, Error> {
    let Path(restaurant_id) = path?;
    let deleted = state.store.delete(restaurant_id)?;

    if let Some(image) = &deleted.image {
        state.blob_store.discard(image);
    }
    tracing::debug!("Deleted restaurant {restaurant_id}");

    Ok(SuccessBody::ok())
}
