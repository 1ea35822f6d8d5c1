use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::product::{Category, ProductId};

/// Lifecycle state of an order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderStatus {
    Pending,
    Paid,
    Completed,
    Cancelled,
}

/// Product reference carried by a line item.
///
/// The category is only known when the backend populated the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: ProductId,
    pub title: Option<String>,
    pub category: Option<Category>,
}

impl ProductRef {
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            category: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(Category::named(name));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    /// `None` when the referenced product has since been deleted.
    pub product: Option<ProductRef>,
    pub quantity: u32,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
}

impl OrderLineItem {
    pub fn new(product: Option<ProductRef>, quantity: u32, price: Decimal) -> Self {
        Self {
            product,
            quantity,
            price,
            original_price: None,
            discount_percent: None,
        }
    }

    /// Revenue of the line: charged unit price times quantity. `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Amount knocked off the pre-discount price, zero when no original price is known.
    pub fn discount_amount(&self) -> Option<Decimal> {
        match self.original_price {
            Some(original) if original > self.price => {
                (original - self.price).checked_mul(Decimal::from(self.quantity))
            }
            _ => Some(Decimal::ZERO),
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        self.product
            .as_ref()
            .and_then(|p| p.category.as_ref())
            .map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub products: Vec<OrderLineItem>,
    /// Authoritative total; may differ from the line sum because of fees or rounding.
    pub total_amount: Option<Decimal>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub consumer: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

impl Order {
    /// `total_amount` when present, otherwise the sum of line totals. `None` on overflow.
    pub fn effective_total(&self) -> Option<Decimal> {
        match self.total_amount {
            Some(total) => Some(total),
            None => self
                .products
                .iter()
                .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.line_total()?)),
        }
    }

    pub fn items_count(&self) -> u64 {
        self.products.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }
}
