use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use super::products::CategoryReference;
use crate::{
    errors::ServiceError,
    models::{Order, OrderLineItem, OrderStatus, ProductId, ProductRef},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedProduct {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryReference>,
}

/// Line-item product reference: populated document or bare id.
///
/// A deleted product shows up as `null` and decodes to `None` on the line item.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductReference {
    Populated(PopulatedProduct),
    Id(String),
}

impl From<ProductReference> for ProductRef {
    fn from(reference: ProductReference) -> Self {
        match reference {
            ProductReference::Populated(product) => ProductRef {
                id: ProductId::new(product.id),
                title: product.title,
                category: product.category.and_then(CategoryReference::resolve),
            },
            ProductReference::Id(id) => ProductRef::new(id),
        }
    }
}

/// Reference to the ordering customer, populated or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConsumerReference {
    Populated {
        #[serde(alias = "_id")]
        id: String,
    },
    Id(String),
}

impl ConsumerReference {
    pub fn into_id(self) -> String {
        match self {
            ConsumerReference::Populated { id } | ConsumerReference::Id(id) => id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRecord {
    #[serde(default)]
    pub product_id: Option<ProductReference>,

    #[validate(range(min = 1))]
    pub quantity: i64,

    #[validate(custom = "validate_amount")]
    pub price: Decimal,

    #[serde(default)]
    #[validate(custom = "validate_amount")]
    pub original_price: Option<Decimal>,

    #[serde(default)]
    #[validate(custom = "validate_discount_percent")]
    pub discount_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(alias = "_id")]
    #[validate(length(min = 1))]
    pub id: String,

    #[serde(default)]
    pub products: Vec<LineItemRecord>,

    #[serde(default)]
    #[validate(custom = "validate_amount")]
    pub total_amount: Option<Decimal>,

    pub status: String,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub consumer: Option<ConsumerReference>,

    #[serde(default)]
    pub contact: Option<String>,

    #[serde(default)]
    pub address: Option<String>,
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut err = ValidationError::new("amount");
        err.message = Some("Amounts cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

fn validate_discount_percent(percent: &Decimal) -> Result<(), ValidationError> {
    if *percent < Decimal::ZERO || *percent > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("discount_percent");
        err.message = Some("Must be between 0 and 100".into());
        return Err(err);
    }
    Ok(())
}

impl LineItemRecord {
    fn into_line_item(self, order_id: &str) -> Result<OrderLineItem, ServiceError> {
        self.validate().map_err(|e| {
            ServiceError::invalid_argument(format!("order {} line item: {}", order_id, e))
        })?;

        let quantity = u32::try_from(self.quantity).map_err(|_| {
            ServiceError::invalid_argument(format!(
                "order {} line item: quantity {} is out of range",
                order_id, self.quantity
            ))
        })?;

        Ok(OrderLineItem {
            product: self.product_id.map(ProductRef::from),
            quantity,
            price: self.price,
            original_price: self.original_price,
            discount_percent: self.discount_percent,
        })
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = ServiceError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        record.validate().map_err(|e| {
            ServiceError::invalid_argument(format!("order {}: {}", record.id, e))
        })?;

        let status = OrderStatus::from_str(record.status.trim()).map_err(|_| {
            ServiceError::invalid_argument(format!(
                "order {}: unknown status {}",
                record.id, record.status
            ))
        })?;

        let products = record
            .products
            .into_iter()
            .map(|item| item.into_line_item(&record.id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order {
            id: record.id,
            products,
            total_amount: record.total_amount,
            status,
            created_at: record.created_at,
            consumer: record.consumer.map(ConsumerReference::into_id),
            contact: record.contact,
            address: record.address,
        })
    }
}

/// Decodes a JSON array of order records, failing on the first invalid one.
pub fn decode_orders(json: &[u8]) -> Result<Vec<Order>, ServiceError> {
    let records: Vec<OrderRecord> = serde_json::from_slice(json)?;
    records.into_iter().map(Order::try_from).collect()
}
