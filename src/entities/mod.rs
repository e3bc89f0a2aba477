//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod cashier;
pub mod category;
pub mod order;
pub mod order_product;
pub mod product;

// Re-export specific types to avoid conflicts
pub use cashier::{Column as CashierColumn, Entity as Cashier, Model as CashierModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_product::{
    Column as OrderProductColumn, Entity as OrderProduct, Model as OrderProductModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
