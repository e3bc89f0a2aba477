//! Cashier business logic - create, update, delete and load cashiers.
//!
//! Names are trimmed before they are stored and must not be empty. Deleting a
//! cashier removes their orders through the foreign key cascade.

use crate::{
    core::snapshot::{CashierSnapshot, assemble_orders},
    entities::{Cashier, Order, cashier, order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

fn validate_name(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("Cashier {field} cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}

/// Retrieves a cashier by id without any of their orders.
pub async fn get_cashier_by_id(
    db: &DatabaseConnection,
    cashier_id: i64,
) -> Result<Option<cashier::Model>> {
    Cashier::find_by_id(cashier_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new cashier.
///
/// # Errors
/// Returns an error if:
/// - Either name is empty or whitespace-only
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_cashier(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<cashier::Model> {
    let cashier = cashier::ActiveModel {
        first_name: Set(validate_name("first name", first_name)?),
        last_name: Set(validate_name("last name", last_name)?),
        ..Default::default()
    };

    let created = cashier.insert(db).await?;
    info!("Created cashier {} ({})", created.id, created.full_name());
    Ok(created)
}

/// Replaces a cashier's names.
///
/// # Errors
/// Returns an error if:
/// - Either name is empty or whitespace-only
/// - The cashier does not exist
/// - The database update operation fails
#[instrument(skip(db))]
pub async fn update_cashier(
    db: &DatabaseConnection,
    cashier_id: i64,
    first_name: &str,
    last_name: &str,
) -> Result<cashier::Model> {
    let first_name = validate_name("first name", first_name)?;
    let last_name = validate_name("last name", last_name)?;

    let mut cashier: cashier::ActiveModel = get_cashier_by_id(db, cashier_id)
        .await?
        .ok_or(Error::CashierNotFound { id: cashier_id })?
        .into();

    cashier.first_name = Set(first_name);
    cashier.last_name = Set(last_name);

    cashier.update(db).await.map_err(Into::into)
}

/// Deletes a cashier and, by cascade, all of their orders.
///
/// # Errors
/// Returns an error if the cashier does not exist or the delete fails.
#[instrument(skip(db))]
pub async fn delete_cashier(db: &DatabaseConnection, cashier_id: i64) -> Result<()> {
    let result = Cashier::delete_by_id(cashier_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::CashierNotFound { id: cashier_id });
    }
    info!("Deleted cashier {}", cashier_id);
    Ok(())
}

/// Loads a cashier with every order, line item, product and category.
///
/// Orders come back in id order and do not carry the cashier themselves.
pub async fn load_cashier_snapshot(
    db: &DatabaseConnection,
    cashier_id: i64,
) -> Result<Option<CashierSnapshot>> {
    let Some(cashier) = get_cashier_by_id(db, cashier_id).await? else {
        return Ok(None);
    };

    let orders = Order::find()
        .filter(order::Column::CashierId.eq(cashier_id))
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;
    let orders = assemble_orders(db, orders, false).await?;

    Ok(Some(CashierSnapshot { cashier, orders }))
}
