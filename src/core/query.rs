//! Product search and order date filtering.
//!
//! Both filters keep the order of their input. `paid_on_condition` expresses the
//! order date filter as a `SeaORM` condition so the store can evaluate it; it
//! selects exactly the rows `filter_orders_by_date` would keep.

use crate::core::snapshot::{OrderSnapshot, ProductSnapshot};
use crate::entities::order;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition};
use serde::Serialize;

/// A product as listed to clients, with its category name resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    /// Product id
    pub id: i64,
    /// Product name
    pub product_name: String,
    /// Brand
    pub brand: String,
    /// Unit price
    pub price: Decimal,
    /// Category foreign key
    pub category_id: i64,
    /// Category name, `None` if the category no longer exists
    pub category: Option<String>,
}

impl From<&ProductSnapshot> for ProductListing {
    fn from(snapshot: &ProductSnapshot) -> Self {
        Self {
            id: snapshot.product.id,
            product_name: snapshot.product.product_name.clone(),
            brand: snapshot.product.brand.clone(),
            price: snapshot.product.price,
            category_id: snapshot.product.category_id,
            category: snapshot.category_name().map(str::to_string),
        }
    }
}

fn matches_search(snapshot: &ProductSnapshot, needle: &str) -> bool {
    if snapshot.product.product_name.to_lowercase().contains(needle) {
        return true;
    }
    snapshot
        .category_name()
        .is_some_and(|name| name.to_lowercase().contains(needle))
}

/// Keeps products whose name or category name contains `search`, ignoring case.
///
/// A missing, empty or all-whitespace term returns every product. The term is
/// matched as a plain substring: no trimming, tokenizing or anchoring.
#[must_use]
pub fn search_products(
    products: Vec<ProductSnapshot>,
    search: Option<&str>,
) -> Vec<ProductSnapshot> {
    let Some(term) = search.filter(|s| !s.trim().is_empty()) else {
        return products;
    };

    let needle = term.to_lowercase();
    products
        .into_iter()
        .filter(|p| matches_search(p, &needle))
        .collect()
}

/// Keeps orders paid on `date`, ignoring the time of day.
///
/// With no date every order is returned. Unpaid orders never match a date.
#[must_use]
pub fn filter_orders_by_date(
    orders: Vec<OrderSnapshot>,
    date: Option<NaiveDate>,
) -> Vec<OrderSnapshot> {
    let Some(date) = date else {
        return orders;
    };

    orders
        .into_iter()
        .filter(|o| o.order.paid_on_date.is_some_and(|paid| paid.date() == date))
        .collect()
}

/// Store-side form of the date filter: `paid_on_date` within
/// `[date 00:00, next day 00:00)`.
#[must_use]
pub fn paid_on_condition(date: NaiveDate) -> Condition {
    let start = date.and_time(NaiveTime::MIN);
    let condition = Condition::all()
        .add(order::Column::PaidOnDate.is_not_null())
        .add(order::Column::PaidOnDate.gte(start));

    match date.succ_opt() {
        Some(next) => {
            condition.add(order::Column::PaidOnDate.lt(next.and_time(NaiveTime::MIN)))
        }
        None => condition,
    }
}
