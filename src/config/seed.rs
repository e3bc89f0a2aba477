//! Seed data loading from config.toml
//!
//! The seed file describes the starting store: cashiers, categories, products
//! and a few historical orders. It is applied once, on a database whose cashier
//! table is still empty, inside a single transaction.

use crate::entities::{Cashier, cashier, category, order, order_product, product};
use crate::errors::{Error, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire seed file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Cashiers to create
    #[serde(default)]
    pub cashiers: Vec<CashierSeed>,
    /// Product categories to create
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
    /// Products to create
    #[serde(default)]
    pub products: Vec<ProductSeed>,
    /// Orders (with their line items) to create
    #[serde(default)]
    pub orders: Vec<OrderSeed>,
}

/// Seed row for a cashier
#[derive(Debug, Deserialize, Clone)]
pub struct CashierSeed {
    /// Fixed primary key
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// Seed row for a category
#[derive(Debug, Deserialize, Clone)]
pub struct CategorySeed {
    /// Fixed primary key
    pub id: i64,
    /// Display name
    pub category_name: String,
}

/// Seed row for a product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductSeed {
    /// Fixed primary key
    pub id: i64,
    /// Product name
    pub product_name: String,
    /// Brand
    pub brand: String,
    /// Unit price
    pub price: Decimal,
    /// Owning category
    pub category_id: i64,
}

/// Seed row for an order
#[derive(Debug, Deserialize, Clone)]
pub struct OrderSeed {
    /// Fixed primary key
    pub id: i64,
    /// Cashier who took the order
    pub cashier_id: i64,
    /// Payment time as `YYYY-MM-DDTHH:MM:SS`; omit for an unpaid order
    #[serde(default)]
    pub paid_on_date: Option<NaiveDateTime>,
    /// Line items in display order
    #[serde(default)]
    pub items: Vec<LineItemSeed>,
}

/// Seed row for one line of an order
#[derive(Debug, Deserialize, Clone)]
pub struct LineItemSeed {
    /// Product on this line
    pub product_id: i64,
    /// Units purchased
    pub quantity: i32,
}

/// Loads seed data from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

/// Loads the seed file if it exists, `Ok(None)` otherwise.
pub fn load_seed_if_present<P: AsRef<Path>>(path: P) -> Result<Option<SeedConfig>> {
    if path.as_ref().exists() {
        load_seed(path).map(Some)
    } else {
        debug!("No seed file at {:?}", path.as_ref());
        Ok(None)
    }
}

/// Writes the seed rows unless the store already has cashiers.
///
/// Returns `true` when the seed was applied.
pub async fn apply_seed(db: &DatabaseConnection, seed: &SeedConfig) -> Result<bool> {
    if Cashier::find().count(db).await? > 0 {
        info!("Store already populated, skipping seed");
        return Ok(false);
    }

    let txn = db.begin().await?;

    for row in &seed.cashiers {
        cashier::ActiveModel {
            id: Set(row.id),
            first_name: Set(row.first_name.clone()),
            last_name: Set(row.last_name.clone()),
        }
        .insert(&txn)
        .await?;
    }

    for row in &seed.categories {
        category::ActiveModel {
            id: Set(row.id),
            category_name: Set(row.category_name.clone()),
        }
        .insert(&txn)
        .await?;
    }

    for row in &seed.products {
        product::ActiveModel {
            id: Set(row.id),
            product_name: Set(row.product_name.clone()),
            brand: Set(row.brand.clone()),
            price: Set(row.price),
            category_id: Set(row.category_id),
        }
        .insert(&txn)
        .await?;
    }

    for row in &seed.orders {
        order::ActiveModel {
            id: Set(row.id),
            cashier_id: Set(row.cashier_id),
            paid_on_date: Set(row.paid_on_date),
        }
        .insert(&txn)
        .await?;

        for (line_no, item) in (0..).zip(&row.items) {
            order_product::ActiveModel {
                order_id: Set(row.id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                line_no: Set(line_no),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;

    info!(
        "Seeded {} cashiers, {} categories, {} products, {} orders",
        seed.cashiers.len(),
        seed.categories.len(),
        seed.products.len(),
        seed.orders.len()
    );
    Ok(true)
}
