//! Order entity - A transaction recorded by a cashier.
//!
//! `paid_on_date` is timezone-naive and `None` while the order is unpaid.
//! The order total is not a column: it is derived from the line items when
//! the order is summarized.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the cashier who rang up the order
    pub cashier_id: i64,
    /// When the order was paid, `None` if still pending
    pub paid_on_date: Option<DateTime>,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one cashier
    #[sea_orm(
        belongs_to = "super::cashier::Entity",
        from = "Column::CashierId",
        to = "super::cashier::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Cashier,
    /// One order has many line items
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
}

impl Related<super::cashier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cashier.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
