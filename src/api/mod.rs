//! HTTP layer - axum routes over the core operations.
//!
//! Handlers stay thin: parse the request, call into `core`, summarize, return
//! JSON. Errors convert into responses through `api::error`.

mod cashiers;
mod categories;
/// Error to response mapping
pub mod error;
mod extract;
mod orders;
mod products;

use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: Arc<DatabaseConnection>,
}

impl AppState {
    /// Creates a new `AppState` owning the given database connection.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database: Arc::new(database),
        }
    }
}

/// Builds the full router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(cashiers::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(orders::router())
        .with_state(state)
}

/// 201 response with a `Location` header.
fn created<T: Serialize>(location: &str, body: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(body)).into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
