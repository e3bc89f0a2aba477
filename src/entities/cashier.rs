//! Cashier entity - A staff member who processes orders.
//!
//! The full name is derived from first and last name on demand and never stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cashier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cashiers")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the cashier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl Model {
    /// First and last name joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Defines relationships between Cashier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One cashier has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_with_single_space() {
        let cashier = Model {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Jones".to_string(),
        };
        assert_eq!(cashier.full_name(), "John Jones");
    }
}
