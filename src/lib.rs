//! Storefront Insights Library
//!
//! Inventory health and sales reporting core for a storefront admin console.
//! The crate works on product and order collections that an upstream layer has
//! already fetched and scoped to the caller; it performs no I/O of its own.
//!
//! - [`services::inventory`]: stock classification, search/filter and pagination.
//! - [`services::reports`]: day buckets and sales aggregation.
//! - [`dto`]: decoding of backend JSON records into [`models`].
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod common;
pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod services;

pub use common::{DateRangeParams, PaginationParams, ReportQuery};
pub use errors::ServiceError;
pub use models::{
    Category, Order, OrderLineItem, OrderStatus, Product, ProductId, ProductRef, StockStatus,
};
pub use services::inventory::{
    InventoryPage, InventoryQuery, InventoryQueryEngine, StockClassifier, StockFilter,
    StockSummary,
};
pub use services::reports::{DateRangeBucketer, SalesAggregator, SalesReport};
