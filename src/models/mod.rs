//! Typed domain model the reporting core operates on.
//!
//! Records arrive from the storefront backend in a loosely shaped form and are
//! decoded once by [`crate::dto`]; everything past that boundary works with
//! these types only.

pub mod order;
pub mod product;

pub use order::{Order, OrderLineItem, OrderStatus, ProductRef};
pub use product::{Category, Product, ProductId, StockStatus};
