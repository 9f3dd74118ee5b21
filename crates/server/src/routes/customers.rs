//! Customer API handlers.
//!
//! Thin layer: parse the path id, hand the body to the service, serialize
//! the outcome. Status-code mapping lives in [`crate::error`].

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use quickbite_core::CustomerId;

use crate::error::{AppError, Result};
use crate::models::customer::Customer;
use crate::services::ServiceError;
use crate::services::customers::{
    AuthResponse, CustomerService, Deleted, LoginInput, RegisterInput, UpdateCustomerInput,
};
use crate::state::AppState;

/// Parse a path id, mapping garbage to a validation error.
fn parse_id(id: &str) -> Result<CustomerId> {
    CustomerId::parse(id)
        .map_err(|_| AppError::from(ServiceError::Validation("Invalid customer id".to_owned())))
}

/// List every customer.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let service = CustomerService::new(state.db(), state.tokens());
    Ok(Json(service.list().await?))
}

/// Fetch a single customer.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>> {
    let id = parse_id(&id)?;
    let service = CustomerService::new(state.db(), state.tokens());
    Ok(Json(service.get(id).await?))
}

/// Register a new customer.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let service = CustomerService::new(state.db(), state.tokens());
    let response = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log a customer in.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<AuthResponse>> {
    let service = CustomerService::new(state.db(), state.tokens());
    Ok(Json(service.login(input).await?))
}

/// Apply a partial update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCustomerInput>,
) -> Result<Json<Customer>> {
    let id = parse_id(&id)?;
    let service = CustomerService::new(state.db(), state.tokens());
    Ok(Json(service.update(id, input).await?))
}

/// Delete a customer.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>> {
    let id = parse_id(&id)?;
    let service = CustomerService::new(state.db(), state.tokens());
    Ok(Json(service.delete(id).await?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_hex() {
        assert!(parse_id("65f1a2b3c4d5e6f708192a3b").is_ok());
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(parse_id("not-an-id").is_err());
    }
}
