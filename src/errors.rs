//! Unified error types for the corner store service.
//!
//! Every fallible operation in the crate returns [`Result`]. The HTTP layer maps
//! each variant onto a status code in `api::error`.

use rust_decimal::Decimal;
use thiserror::Error;

/// All errors the service can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Failure reported by the database driver.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// A required field on a create or update input is missing or malformed.
    #[error("Validation failed: {message}")]
    Validation {
        /// Human readable description
        message: String,
    },

    /// Price is negative.
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: Decimal,
    },

    /// Line item quantity is not positive.
    #[error("Invalid quantity for product {product_id}: {quantity}")]
    InvalidQuantity {
        /// Product the quantity was given for
        product_id: i64,
        /// The rejected quantity
        quantity: i32,
    },

    /// The write would violate a uniqueness rule.
    #[error("Conflict: {message}")]
    Conflict {
        /// Human readable description
        message: String,
    },

    /// No cashier with this id.
    #[error("Cashier not found: {id}")]
    CashierNotFound {
        /// Requested id
        id: i64,
    },

    /// No category with this id.
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// Requested id
        id: i64,
    },

    /// No product with this id.
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Requested id
        id: i64,
    },

    /// No order with this id.
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Requested id
        id: i64,
    },

    /// I/O failure, e.g. binding the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the `*NotFound` family of variants.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CashierNotFound { .. }
                | Self::CategoryNotFound { .. }
                | Self::ProductNotFound { .. }
                | Self::OrderNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
