//! Restaurant API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use quickbite_core::RestaurantId;

use crate::error::{AppError, Result};
use crate::models::restaurant::Restaurant;
use crate::services::ServiceError;
use crate::services::customers::Deleted;
use crate::services::restaurants::{
    CreateRestaurantInput, RestaurantService, UpdateRestaurantInput,
};
use crate::state::AppState;

/// Parse a path id, mapping garbage to a validation error.
fn parse_id(id: &str) -> Result<RestaurantId> {
    RestaurantId::parse(id)
        .map_err(|_| AppError::from(ServiceError::Validation("Invalid restaurant id".to_owned())))
}

/// List every restaurant.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Restaurant>>> {
    let service = RestaurantService::new(state.db());
    Ok(Json(service.list().await?))
}

/// Fetch a single restaurant.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>> {
    let id = parse_id(&id)?;
    let service = RestaurantService::new(state.db());
    Ok(Json(service.get(id).await?))
}

/// Onboard a new restaurant.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRestaurantInput>,
) -> Result<(StatusCode, Json<Restaurant>)> {
    let service = RestaurantService::new(state.db());
    let restaurant = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// Apply a partial update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateRestaurantInput>,
) -> Result<Json<Restaurant>> {
    let id = parse_id(&id)?;
    let service = RestaurantService::new(state.db());
    Ok(Json(service.update(id, input).await?))
}

/// Delete a restaurant.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>> {
    let id = parse_id(&id)?;
    let service = RestaurantService::new(state.db());
    Ok(Json(service.delete(id).await?))
}
