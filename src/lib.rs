//! Storefront
//!
//! Storefront is an inventory and ordering simulator: a store of products with finite, unlimited
//! or per-order capped stock, optional pricing promotions, and all-or-nothing orders.

pub mod catalog;
pub mod config;
pub mod observability;
pub mod prelude;
pub mod products;
pub mod promotions;
pub mod shell;
pub mod store;
