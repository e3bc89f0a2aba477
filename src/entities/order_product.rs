//! Order product entity - The line item joining one product to one order.
//!
//! `(order_id, product_id)` is the primary key, so a product appears at most
//! once per order. `line_no` keeps the order in which lines were added.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Line item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Order this line belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i64,
    /// Product being purchased
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
    /// Number of units, always positive
    pub quantity: i32,
    /// Zero-based position of the line within its order
    pub line_no: i32,
}

/// Defines relationships between `OrderProduct` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
    /// Each line references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
