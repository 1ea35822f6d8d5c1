//! Wire-shaped records as emitted by the storefront backend.
//!
//! The backend serves loosely shaped JSON: `_id` keys, references that are
//! either a bare id, a populated document or `null`, and money as numbers or
//! strings. Records are decoded and validated here once, then converted into
//! the typed [`crate::models`] the core works with.

pub mod orders;
pub mod products;

pub use orders::{decode_orders, LineItemRecord, OrderRecord, ProductReference};
pub use products::{decode_products, CategoryRecord, CategoryReference, ProductRecord};
