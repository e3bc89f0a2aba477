//! Order and cashier summaries.
//!
//! Turns loaded snapshots into the read-facing views returned by the API. A line
//! item is shown only when both its product and that product's category resolve;
//! anything else is left out of the itemized list and of the total alike. The
//! total is summed from the itemized list itself, so the two can never disagree.

use crate::core::snapshot::{CashierSnapshot, LineItemSnapshot, OrderSnapshot};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

/// One displayable line of an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemSummary {
    /// Product id
    pub product_id: i64,
    /// Product name
    pub product: String,
    /// Product brand
    pub brand: String,
    /// Unit price at read time
    pub price: Decimal,
    /// Category name at read time
    pub category: String,
    /// Units purchased
    pub quantity: i32,
}

impl LineItemSummary {
    /// Unit price times quantity, `None` if the product does not fit a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Read view of an order with its computed total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Order id
    pub id: i64,
    /// Cashier id rendered as text
    pub cashier_id: String,
    /// "First Last", present only when the cashier was loaded
    pub cashier_name: Option<String>,
    /// Payment time, `None` while unpaid
    pub paid_on_date: Option<NaiveDateTime>,
    /// Sum of `line_total` over `order_products`, capped at `Decimal::MAX`
    pub total: Decimal,
    /// Displayable lines in insertion order
    pub order_products: Vec<LineItemSummary>,
}

/// Read view of a cashier and everything they rang up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierSummary {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Summaries of the cashier's orders, without cashier names
    pub orders: Vec<OrderSummary>,
}

/// Returns the display line for an item, or `None` when its product or the
/// product's category is missing.
fn resolve_line_item(line: &LineItemSnapshot) -> Option<LineItemSummary> {
    let product = line.product.as_ref()?;
    let category = product.category.as_ref()?;

    Some(LineItemSummary {
        product_id: line.item.product_id,
        product: product.product.product_name.clone(),
        brand: product.product.brand.clone(),
        price: product.product.price,
        category: category.category_name.clone(),
        quantity: line.item.quantity,
    })
}

/// Builds the summary of a single order.
#[must_use]
pub fn summarize_order(order: &OrderSnapshot) -> OrderSummary {
    let order_products: Vec<LineItemSummary> =
        order.line_items.iter().filter_map(resolve_line_item).collect();
    let total = order_products
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.line_total()?))
        .unwrap_or_else(|| {
            warn!("Total of order {} overflows, reporting the maximum", order.order.id);
            Decimal::MAX
        });

    OrderSummary {
        id: order.order.id,
        cashier_id: order.order.cashier_id.to_string(),
        cashier_name: order.cashier.as_ref().map(|c| c.full_name()),
        paid_on_date: order.order.paid_on_date,
        total,
        order_products,
    }
}

/// Builds the summary of a cashier, one order summary per order in the
/// snapshot's order. Nested summaries never carry a cashier name.
#[must_use]
pub fn summarize_cashier(cashier: &CashierSnapshot) -> CashierSummary {
    CashierSummary {
        first_name: cashier.cashier.first_name.clone(),
        last_name: cashier.cashier.last_name.clone(),
        orders: cashier
            .orders
            .iter()
            .map(|order| OrderSummary {
                cashier_name: None,
                ..summarize_order(order)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::snapshot::ProductSnapshot;
    use crate::entities::{cashier, category, order, order_product, product};
    use chrono::NaiveDate;

    fn category(id: i64, name: &str) -> category::Model {
        category::Model {
            id,
            category_name: name.to_string(),
        }
    }

    fn product(
        id: i64,
        name: &str,
        cents: i64,
        category: Option<category::Model>,
    ) -> ProductSnapshot {
        ProductSnapshot {
            product: product::Model {
                id,
                product_name: name.to_string(),
                brand: format!("{name} Co"),
                price: Decimal::new(cents, 2),
                category_id: category.as_ref().map_or(99, |c| c.id),
            },
            category,
        }
    }

    fn line(
        order_id: i64,
        product_id: i64,
        quantity: i32,
        product: Option<ProductSnapshot>,
    ) -> LineItemSnapshot {
        LineItemSnapshot {
            item: order_product::Model {
                order_id,
                product_id,
                quantity,
                line_no: 0,
            },
            product,
        }
    }

    fn john() -> cashier::Model {
        cashier::Model {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Jones".to_string(),
        }
    }

    fn paid_on() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn sample_order() -> OrderSnapshot {
        OrderSnapshot {
            order: order::Model {
                id: 1,
                cashier_id: 1,
                paid_on_date: Some(paid_on()),
            },
            cashier: Some(john()),
            line_items: vec![
                line(1, 1, 2, Some(product(1, "Chips", 250, Some(category(1, "Snacks"))))),
                line(1, 2, 1, Some(product(2, "Cola", 175, Some(category(2, "Drinks"))))),
            ],
        }
    }

    #[test]
    fn test_summarize_order_end_to_end() {
        let summary = summarize_order(&sample_order());

        assert_eq!(summary.id, 1);
        assert_eq!(summary.cashier_id, "1");
        assert_eq!(summary.cashier_name.as_deref(), Some("John Jones"));
        assert_eq!(summary.paid_on_date, Some(paid_on()));
        assert_eq!(summary.total, Decimal::new(675, 2));
        assert_eq!(summary.order_products.len(), 2);

        let chips = &summary.order_products[0];
        assert_eq!(chips.product, "Chips");
        assert_eq!(chips.brand, "Chips Co");
        assert_eq!(chips.category, "Snacks");
        assert_eq!(chips.price, Decimal::new(250, 2));
        assert_eq!(chips.quantity, 2);
        assert_eq!(summary.order_products[1].product, "Cola");
    }

    #[test]
    fn test_unresolved_product_is_dropped_from_items_and_total() {
        let mut order = sample_order();
        order.line_items = vec![
            line(1, 1, 2, Some(product(1, "Chips", 250, Some(category(1, "Snacks"))))),
            line(1, 7, 4, None),
        ];

        let summary = summarize_order(&order);
        assert_eq!(summary.total, Decimal::new(500, 2));
        assert_eq!(summary.order_products.len(), 1);
        assert_eq!(summary.order_products[0].product_id, 1);
    }

    #[test]
    fn test_unresolved_category_is_dropped_from_items_and_total() {
        let mut order = sample_order();
        order
            .line_items
            .push(line(1, 3, 10, Some(product(3, "Dish Soap", 300, None))));

        let summary = summarize_order(&order);
        assert_eq!(summary.total, Decimal::new(675, 2));
        assert_eq!(summary.order_products.len(), 2);
        assert!(summary.order_products.iter().all(|l| l.product_id != 3));
    }

    #[test]
    fn test_total_matches_itemized_lines() {
        let summary = summarize_order(&sample_order());
        let recomputed: Decimal = summary
            .order_products
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(summary.total, recomputed);
    }

    #[test]
    fn test_overflowing_total_saturates() {
        let mut order = sample_order();
        order.line_items.push(line(
            1,
            9,
            3,
            Some(ProductSnapshot {
                product: product::Model {
                    price: Decimal::MAX / Decimal::TWO,
                    ..product(9, "Gold Bar", 0, None).product
                },
                category: Some(category(9, "Vault")),
            }),
        ));

        let summary = summarize_order(&order);
        assert_eq!(summary.order_products.len(), 3);
        assert_eq!(summary.order_products[2].line_total(), None);
        assert_eq!(summary.total, Decimal::MAX);

        // Each line fits but the sum does not
        order.line_items.truncate(2);
        for id in [10, 11] {
            order.line_items.push(line(
                1,
                id,
                1,
                Some(ProductSnapshot {
                    product: product::Model {
                        price: Decimal::MAX,
                        ..product(id, "Gold Bar", 0, None).product
                    },
                    category: Some(category(9, "Vault")),
                }),
            ));
        }
        assert_eq!(summarize_order(&order).total, Decimal::MAX);
    }

    #[test]
    fn test_empty_and_unpaid_order() {
        let order = OrderSnapshot {
            order: order::Model {
                id: 4,
                cashier_id: 4,
                paid_on_date: None,
            },
            cashier: None,
            line_items: Vec::new(),
        };

        let summary = summarize_order(&order);
        assert_eq!(summary.total, Decimal::ZERO);
        assert!(summary.order_products.is_empty());
        assert!(summary.paid_on_date.is_none());
        assert!(summary.cashier_name.is_none());
        assert_eq!(summary.cashier_id, "4");
    }

    #[test]
    fn test_item_order_is_preserved() {
        let mut order = sample_order();
        order.line_items.reverse();

        let names: Vec<_> = summarize_order(&order)
            .order_products
            .into_iter()
            .map(|l| l.product)
            .collect();
        assert_eq!(names, vec!["Cola", "Chips"]);
    }

    #[test]
    fn test_summarize_cashier_nests_orders_without_cashier_name() {
        let mut second = sample_order();
        second.order.id = 2;
        second.order.paid_on_date = None;
        second.line_items.truncate(1);

        let snapshot = CashierSnapshot {
            cashier: john(),
            orders: vec![sample_order(), second],
        };

        let summary = summarize_cashier(&snapshot);
        assert_eq!(summary.first_name, "John");
        assert_eq!(summary.last_name, "Jones");
        assert_eq!(summary.orders.len(), 2);
        assert_eq!(summary.orders[0].id, 1);
        assert_eq!(summary.orders[0].total, Decimal::new(675, 2));
        assert_eq!(summary.orders[1].id, 2);
        assert_eq!(summary.orders[1].total, Decimal::new(500, 2));
        assert!(summary.orders.iter().all(|o| o.cashier_name.is_none()));
    }

    #[test]
    fn test_summary_serializes_with_camel_case_and_nulls() {
        let mut order = sample_order();
        order.cashier = None;
        order.order.paid_on_date = None;

        let json = serde_json::to_value(summarize_order(&order)).unwrap();
        assert_eq!(json["cashierId"], "1");
        assert!(json["cashierName"].is_null());
        assert!(json["paidOnDate"].is_null());
        assert_eq!(json["total"].as_f64(), Some(6.75));
        assert_eq!(json["orderProducts"][0]["productId"], 1);
        assert_eq!(json["orderProducts"][0]["category"], "Snacks");
    }
}
