#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use storefront_insights::{
    Category, Order, OrderLineItem, OrderStatus, Product, ProductId, ProductRef,
};

/// Day `d` of March 2024, the month every fixture lives in.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).expect("valid fixture date")
}

pub fn at(d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, hour, minute, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn product(id: &str, title: &str, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        stock,
        category: None,
        images: Vec::new(),
        updated_at: at(1, 0, 0),
    }
}

pub fn categorized(id: &str, title: &str, stock: u32, category: &str) -> Product {
    Product {
        category: Some(Category::named(category)),
        ..product(id, title, stock)
    }
}

pub fn line(product_id: &str, quantity: u32, price: Decimal) -> OrderLineItem {
    OrderLineItem::new(Some(ProductRef::new(product_id)), quantity, price)
}

pub fn categorized_line(
    product_id: &str,
    category: &str,
    quantity: u32,
    price: Decimal,
) -> OrderLineItem {
    OrderLineItem::new(
        Some(ProductRef::new(product_id).with_category(category)),
        quantity,
        price,
    )
}

pub fn deleted_product_line(quantity: u32, price: Decimal) -> OrderLineItem {
    OrderLineItem::new(None, quantity, price)
}

/// Builder for order fixtures.
pub struct OrderBuilder {
    order: Order,
}

impl OrderBuilder {
    pub fn new(id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            order: Order {
                id: id.to_string(),
                products: Vec::new(),
                total_amount: None,
                status: OrderStatus::Paid,
                created_at,
                consumer: Some("consumer-1".to_string()),
                contact: None,
                address: None,
            },
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.order.status = status;
        self
    }

    pub fn total(mut self, total: Decimal) -> Self {
        self.order.total_amount = Some(total);
        self
    }

    pub fn item(mut self, item: OrderLineItem) -> Self {
        self.order.products.push(item);
        self
    }

    pub fn build(self) -> Order {
        self.order
    }
}
