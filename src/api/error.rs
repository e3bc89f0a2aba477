//! HTTP mapping for [`Error`].
//!
//! | Variant | Status |
//! |---------|--------|
//! | `*NotFound` | 404 |
//! | `Validation`, `InvalidPrice`, `InvalidQuantity` | 400 |
//! | `Conflict` | 409 |
//! | `Database`, `Config`, `Io` | 500 |
//!
//! Server-side failures are logged and answered with a generic message.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human readable description
    pub error: String,
}

impl Error {
    /// Status code this error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::CashierNotFound { .. }
            | Self::CategoryNotFound { .. }
            | Self::ProductNotFound { .. }
            | Self::OrderNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } | Self::InvalidPrice { .. } | Self::InvalidQuantity { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Config { .. } | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
