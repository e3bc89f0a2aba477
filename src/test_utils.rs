//! Shared test utilities for the corner store service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::seed::{SeedConfig, apply_seed},
    core::{cashier, category, product},
    entities,
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// The seed file shipped with the service: five cashiers, categories, products
/// and orders, one of them unpaid.
pub const SAMPLE_SEED: &str = include_str!("../config.toml");

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an in-memory database loaded with [`SAMPLE_SEED`].
pub async fn setup_sample_store() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    let seed: SeedConfig = toml::from_str(SAMPLE_SEED).map_err(|e| Error::Config {
        message: e.to_string(),
    })?;
    apply_seed(&db, &seed).await?;
    Ok(db)
}

/// Creates a test cashier.
pub async fn create_test_cashier(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<entities::cashier::Model> {
    cashier::create_cashier(db, first_name, last_name).await
}

/// Creates a test category.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name).await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * brand: "Test Brand"
/// * price: 2.50
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i64,
) -> Result<entities::product::Model> {
    product::create_product(db, name, "Test Brand", Decimal::new(250, 2), category_id).await
}

/// Sets up a complete test environment with a cashier and one product.
/// Returns (db, cashier, product) for order-related tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::cashier::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let cashier = create_test_cashier(&db, "Test", "Cashier").await?;
    let category = create_test_category(&db, "Test Category").await?;
    let product = create_test_product(&db, "Test Product", category.id).await?;
    Ok((db, cashier, product))
}
