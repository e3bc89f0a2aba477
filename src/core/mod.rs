//! Core business logic - framework-agnostic store operations.
//!
//! `summary` and `query` are pure transformations over loaded snapshots; the
//! remaining modules are the persistence operations that produce those
//! snapshots and apply writes.

/// Cashier operations
pub mod cashier;
/// Category operations
pub mod category;
/// Order operations
pub mod order;
/// Product operations
pub mod product;
/// Product search and order date filters
pub mod query;
/// Loaded entity graphs and the batch loader behind them
pub mod snapshot;
/// Order and cashier summaries
pub mod summary;
