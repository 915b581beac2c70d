//! Shopping Cart
//!
//! An in-memory shopping cart with category discounts and a simulated payment processor.
//! Prices and rates are exact decimals throughout.

pub mod cart;
pub mod discounts;
pub mod fixtures;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod utils;
