//! Farmgate
//!
//! Pricing core for a B2B agricultural marketplace: volume-tiered unit prices,
//! and a cart aggregator that groups lines by supplier and folds subtotals,
//! tax and delivery into exact decimal totals.

pub mod aggregate;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod items;
pub mod money;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod quotes;
pub mod store;
pub mod summary;
pub mod tax;
pub mod tiers;
pub mod utils;
