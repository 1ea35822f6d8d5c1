use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use tracing::{debug, instrument};

use crate::{
    errors::ServiceError,
    models::{Product, StockStatus},
};

/// Highest unit count still classified as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Maps stock counts to [`StockStatus`] using fixed thresholds.
pub struct StockClassifier;

impl StockClassifier {
    /// Classifies a raw stock count. Negative counts are a caller error.
    pub fn classify(stock: i64) -> Result<StockStatus, ServiceError> {
        if stock < 0 {
            return Err(ServiceError::invalid_argument(format!(
                "stock must be non-negative, got {}",
                stock
            )));
        }
        Ok(Self::status_for(u32::try_from(stock).unwrap_or(u32::MAX)))
    }

    /// Classification for an already validated count.
    pub fn status_for(stock: u32) -> StockStatus {
        match stock {
            0 => StockStatus::OutOfStock,
            1..=LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }
}

/// Stock-status selector of the inventory view.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StockFilter {
    #[default]
    All,
    Low,
    Out,
}

impl StockFilter {
    pub fn parse(value: &str) -> Result<Self, ServiceError> {
        Self::from_str(value.trim()).map_err(|_| {
            ServiceError::invalid_argument(format!("unknown stock filter: {}", value))
        })
    }

    pub fn matches(self, status: StockStatus) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Low => status == StockStatus::LowStock,
            StockFilter::Out => status == StockStatus::OutOfStock,
        }
    }
}

/// Filter selectors and pagination of an inventory listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub stock_filter: StockFilter,
    pub page: u32,
    pub page_size: u32,
}

impl InventoryQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            search: String::new(),
            stock_filter: StockFilter::All,
            page,
            page_size,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_stock_filter(mut self, stock_filter: StockFilter) -> Self {
        self.stock_filter = stock_filter;
        self
    }
}

/// One page of a filtered inventory listing. Items borrow from the input collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPage<'a> {
    pub items: Vec<&'a Product>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub page: u32,
    pub page_size: u32,
}

/// Stock health counts over a whole product collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_products: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total_units: u64,
}

/// Search, stock filtering and pagination over product collections.
pub struct InventoryQueryEngine;

impl InventoryQueryEngine {
    /// Filters `products` by title search and stock filter, then returns the requested page.
    ///
    /// Matching keeps the input order. A page past the last one comes back empty.
    #[instrument(skip_all, fields(products = products.len(), stock_filter = %query.stock_filter, page = query.page))]
    pub fn query<'a>(
        products: &'a [Product],
        query: &InventoryQuery,
    ) -> Result<InventoryPage<'a>, ServiceError> {
        if query.page == 0 {
            return Err(ServiceError::invalid_argument("page must be a positive integer"));
        }
        if query.page_size == 0 {
            return Err(ServiceError::invalid_argument(
                "page size must be a positive integer",
            ));
        }

        let needle = query.search.to_lowercase();
        let matched: Vec<&Product> = products
            .iter()
            .filter(|product| needle.is_empty() || product.title.to_lowercase().contains(&needle))
            .filter(|product| query.stock_filter.matches(product.stock_status()))
            .collect();

        let total_matched = matched.len();
        let page_size = query.page_size as usize;
        let total_pages = total_matched.div_ceil(page_size).max(1);
        let offset = (query.page as usize - 1).saturating_mul(page_size);

        let items: Vec<&Product> = matched.into_iter().skip(offset).take(page_size).collect();

        debug!(
            total_matched,
            total_pages,
            returned = items.len(),
            "inventory page computed"
        );

        Ok(InventoryPage {
            items,
            total_matched,
            total_pages,
            page: query.page,
            page_size: query.page_size,
        })
    }

    /// Counts products per stock status.
    pub fn summarize(products: &[Product]) -> StockSummary {
        products
            .iter()
            .fold(StockSummary::default(), |mut summary, product| {
                summary.total_products += 1;
                summary.total_units += u64::from(product.stock);
                match product.stock_status() {
                    StockStatus::InStock => summary.in_stock += 1,
                    StockStatus::LowStock => summary.low_stock += 1,
                    StockStatus::OutOfStock => summary.out_of_stock += 1,
                }
                summary
            })
    }
}
