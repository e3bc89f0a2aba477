//! Order business logic - record, load, list and delete orders.
//!
//! An order and its line items are written in one database transaction. Orders
//! are stamped as paid at the moment they are created; there is currently no
//! way to record a pending order through `create_order`, although the model
//! allows one and the seed data contains one.

use crate::{
    core::{
        query::paid_on_condition,
        snapshot::{OrderSnapshot, assemble_orders},
    },
    entities::{Cashier, Order, OrderProduct, Product, order, order_product, product},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Largest quantity accepted on a single line.
pub const MAX_QUANTITY: i32 = 9999;

/// One requested line of a new order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    /// Product to sell
    pub product_id: i64,
    /// Units sold, between 1 and [`MAX_QUANTITY`]
    pub quantity: i32,
}

fn validate_line_items(items: &[NewLineItem]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if item.quantity <= 0 || item.quantity > MAX_QUANTITY {
            return Err(Error::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }
        if !seen.insert(item.product_id) {
            return Err(Error::Conflict {
                message: format!("Product {} appears more than once", item.product_id),
            });
        }
    }
    Ok(())
}

fn map_write_error(err: DbErr) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Error::Conflict { message },
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => Error::Validation { message },
        _ => Error::Database(err),
    }
}

/// Retrieves an order row by id.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a new order for `cashier_id` with `items` in the given order.
///
/// The order is stamped as paid now, in local time.
///
/// # Errors
/// Returns an error if:
/// - A quantity is not between 1 and [`MAX_QUANTITY`]
/// - A product is listed twice
/// - The cashier or one of the products does not exist
/// - Any database operation fails; the transaction is rolled back
#[instrument(skip(db, items), fields(lines = items.len()))]
pub async fn create_order(
    db: &DatabaseConnection,
    cashier_id: i64,
    items: &[NewLineItem],
) -> Result<order::Model> {
    validate_line_items(items)?;

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    if Cashier::find_by_id(cashier_id).one(&txn).await?.is_none() {
        return Err(Error::CashierNotFound { id: cashier_id });
    }

    let product_ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
    if !product_ids.is_empty() {
        let known: HashSet<i64> = Product::find()
            .filter(product::Column::Id.is_in(product_ids.iter().copied()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        if let Some(&missing) = product_ids.iter().find(|id| !known.contains(*id)) {
            return Err(Error::ProductNotFound { id: missing });
        }
    }

    let created = order::ActiveModel {
        cashier_id: Set(cashier_id),
        paid_on_date: Set(Some(chrono::Local::now().naive_local())),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let lines: Vec<order_product::ActiveModel> = (0..)
        .zip(items)
        .map(|(line_no, item)| order_product::ActiveModel {
            order_id: Set(created.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            line_no: Set(line_no),
        })
        .collect();

    if !lines.is_empty() {
        OrderProduct::insert_many(lines)
            .exec(&txn)
            .await
            .map_err(map_write_error)?;
    }

    // Commit the transaction
    txn.commit().await?;

    info!(
        "Created order {} for cashier {} with {} lines",
        created.id,
        cashier_id,
        items.len()
    );
    Ok(created)
}

/// Deletes an order together with its line items.
///
/// # Errors
/// Returns an error if the order does not exist or the delete fails.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let result = Order::delete_by_id(order_id).exec(db).await?;
    if result.rows_affected == 0 {
        warn!("Tried to delete missing order {}", order_id);
        return Err(Error::OrderNotFound { id: order_id });
    }
    info!("Deleted order {}", order_id);
    Ok(())
}

/// Loads one order with its cashier and line items.
pub async fn load_order_snapshot(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<OrderSnapshot>> {
    let Some(order) = get_order_by_id(db, order_id).await? else {
        return Ok(None);
    };

    Ok(assemble_orders(db, vec![order], true).await?.pop())
}

/// Lists orders with cashiers and line items, ordered by id.
///
/// When `paid_on` is given only orders paid on that calendar day are returned;
/// the filter is evaluated by the database.
pub async fn list_orders(
    db: &DatabaseConnection,
    paid_on: Option<NaiveDate>,
) -> Result<Vec<OrderSnapshot>> {
    let mut query = Order::find().order_by_asc(order::Column::Id);
    if let Some(date) = paid_on {
        query = query.filter(paid_on_condition(date));
    }

    let orders = query.all(db).await?;
    debug!("Listing {} orders (paid on {:?})", orders.len(), paid_on);
    assemble_orders(db, orders, true).await
}
