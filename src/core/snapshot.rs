//! Loaded entity graphs handed to the summary and query layers.
//!
//! A snapshot is a plain owned copy of an entity together with whatever of its
//! associations could be resolved at load time. Every association is an
//! `Option`: a foreign key that points at nothing is represented as `None`
//! rather than an error, and it is up to the consumer to decide what a gap
//! means for its output.

use crate::{
    entities::{
        Cashier, Category, OrderProduct, Product, cashier, category, order, order_product,
        product,
    },
    errors::Result,
};
use sea_orm::{ConnectionTrait, QueryOrder, prelude::*};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// A product with its category, if the category still exists.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductSnapshot {
    /// The product row
    pub product: product::Model,
    /// The category the product points at
    pub category: Option<category::Model>,
}

impl ProductSnapshot {
    /// Name of the resolved category, if any.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.category_name.as_str())
    }
}

/// One line of an order with its product, if the product still exists.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItemSnapshot {
    /// The line item row
    pub item: order_product::Model,
    /// The product the line points at
    pub product: Option<ProductSnapshot>,
}

/// An order with its cashier and its lines in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderSnapshot {
    /// The order row
    pub order: order::Model,
    /// The cashier, when the loader was asked to resolve it
    pub cashier: Option<cashier::Model>,
    /// Lines ordered by `line_no`
    pub line_items: Vec<LineItemSnapshot>,
}

/// A cashier with all of their orders.
#[derive(Clone, Debug, PartialEq)]
pub struct CashierSnapshot {
    /// The cashier row
    pub cashier: cashier::Model,
    /// Orders ordered by id
    pub orders: Vec<OrderSnapshot>,
}

/// Most ids bound into one `IN (...)` list, well under `SQLite`'s variable limit.
const ID_BATCH: usize = 500;

/// Loads products (with categories) for the given ids, keyed by product id.
pub(crate) async fn load_products_by_id<C: ConnectionTrait>(
    db: &C,
    product_ids: Vec<i64>,
) -> Result<HashMap<i64, ProductSnapshot>> {
    let mut products = HashMap::with_capacity(product_ids.len());
    for batch in product_ids.chunks(ID_BATCH) {
        let rows = Product::find()
            .filter(product::Column::Id.is_in(batch.iter().copied()))
            .find_also_related(Category)
            .all(db)
            .await?;
        products.extend(
            rows.into_iter()
                .map(|(product, category)| (product.id, ProductSnapshot { product, category })),
        );
    }
    Ok(products)
}

/// Resolves line items, products, categories and optionally cashiers for a batch
/// of orders, preserving the order of `orders`.
///
/// Queries are batched per table, so the cost is constant in the number of orders.
pub(crate) async fn assemble_orders<C: ConnectionTrait>(
    db: &C,
    orders: Vec<order::Model>,
    with_cashier: bool,
) -> Result<Vec<OrderSnapshot>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let mut lines = Vec::new();
    for batch in order_ids.chunks(ID_BATCH) {
        lines.extend(
            OrderProduct::find()
                .filter(order_product::Column::OrderId.is_in(batch.iter().copied()))
                .order_by_asc(order_product::Column::OrderId)
                .order_by_asc(order_product::Column::LineNo)
                .all(db)
                .await?,
        );
    }

    let product_ids: Vec<i64> = lines
        .iter()
        .map(|l| l.product_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let products = load_products_by_id(db, product_ids).await?;

    let mut cashiers: HashMap<i64, cashier::Model> = HashMap::new();
    if with_cashier {
        let cashier_ids: Vec<i64> = orders
            .iter()
            .map(|o| o.cashier_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        for batch in cashier_ids.chunks(ID_BATCH) {
            let rows = Cashier::find()
                .filter(cashier::Column::Id.is_in(batch.iter().copied()))
                .all(db)
                .await?;
            cashiers.extend(rows.into_iter().map(|c| (c.id, c)));
        }
    }

    let mut lines_by_order: HashMap<i64, Vec<LineItemSnapshot>> = HashMap::new();
    for item in lines {
        let product = products.get(&item.product_id).cloned();
        lines_by_order
            .entry(item.order_id)
            .or_default()
            .push(LineItemSnapshot { item, product });
    }

    trace!(
        "Assembled {} orders with {} distinct products",
        orders.len(),
        products.len()
    );

    Ok(orders
        .into_iter()
        .map(|order| OrderSnapshot {
            cashier: cashiers.get(&order.cashier_id).cloned(),
            line_items: lines_by_order.remove(&order.id).unwrap_or_default(),
            order,
        })
        .collect())
}
