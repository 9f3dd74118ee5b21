//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api                    - Liveness/info message
//! GET    /health                 - Health check
//! GET    /health/ready           - Readiness (store ping)
//!
//! # Customers
//! GET    /api/customer           - List customers
//! POST   /api/customer/register  - Register, returns {customer, access_token}
//! POST   /api/customer/login     - Login, returns {customer, access_token}
//! GET    /api/customer/{id}      - Fetch one customer
//! PATCH  /api/customer/{id}      - Partial update (addresses rejected)
//! DELETE /api/customer/{id}      - Delete, returns {deleted: true}
//!
//! # Restaurants
//! GET    /api/restaurant         - List restaurants
//! POST   /api/restaurant         - Onboard a restaurant
//! GET    /api/restaurant/{id}    - Fetch one restaurant
//! PATCH  /api/restaurant/{id}    - Partial update (owner rejected)
//! DELETE /api/restaurant/{id}    - Delete, returns {deleted: true}
//! ```
//!
//! Any other path serves the prebuilt client bundle, falling back to its
//! index document so the client-side router can take over.

pub mod customers;
pub mod restaurants;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list))
        .route("/register", post(customers::register))
        .route("/login", post(customers::login))
        .route(
            "/{id}",
            get(customers::show)
                .patch(customers::update)
                .delete(customers::destroy),
        )
}

/// Create the restaurant routes router.
pub fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(restaurants::index).post(restaurants::create))
        .route(
            "/{id}",
            get(restaurants::show)
                .patch(restaurants::update)
                .delete(restaurants::destroy),
        )
}

/// Liveness/info endpoint.
async fn api_info() -> Json<Value> {
    Json(json!({ "message": "This is the QuickBite backend" }))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(api_info))
        .nest("/api/customer", customer_routes())
        .nest("/api/restaurant", restaurant_routes())
}
