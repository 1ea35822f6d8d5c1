use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    errors::ServiceError,
    models::{Category, Product, ProductId},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Category as referenced from a product: populated, bare id, or absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryReference {
    Populated(CategoryRecord),
    Id(String),
}

impl CategoryReference {
    /// Only a populated category with a non-blank name resolves.
    pub fn resolve(self) -> Option<Category> {
        match self {
            CategoryReference::Populated(record) if !record.name.trim().is_empty() => {
                Some(Category {
                    id: record.id,
                    name: record.name,
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(alias = "_id")]
    #[validate(length(min = 1))]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[validate(range(min = 0))]
    pub stock: i64,

    #[serde(default)]
    pub category: Option<CategoryReference>,

    #[serde(default)]
    pub images: Option<Vec<String>>,

    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ServiceError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        record.validate().map_err(|e| {
            ServiceError::invalid_argument(format!("product {}: {}", record.id, e))
        })?;

        let stock = u32::try_from(record.stock).map_err(|_| {
            ServiceError::invalid_argument(format!(
                "product {}: stock {} is out of range",
                record.id, record.stock
            ))
        })?;

        Ok(Product {
            id: ProductId::new(record.id),
            title: record.title,
            stock,
            category: record.category.and_then(CategoryReference::resolve),
            images: record.images.unwrap_or_default(),
            updated_at: record.updated_at,
        })
    }
}

/// Decodes a JSON array of product records, failing on the first invalid one.
pub fn decode_products(json: &[u8]) -> Result<Vec<Product>, ServiceError> {
    let records: Vec<ProductRecord> = serde_json::from_slice(json)?;
    records.into_iter().map(Product::try_from).collect()
}
