use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

use crate::{
    common::ReportQuery,
    errors::ServiceError,
    models::{Order, OrderStatus, ProductId},
};

/// Category label for line items whose product or category cannot be resolved.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Number of ranked products when the caller does not ask for a specific count.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// Revenue booked on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: Decimal,
}

/// Revenue of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,
    pub total_revenue: Decimal,
}

/// Top selling product data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: ProductId,
    pub title: Option<String>,
    pub total_quantity: u64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: OrderStatus,
    pub orders: usize,
}

/// Sales report over an inclusive range of calendar days.
///
/// Cancelled orders are excluded from every figure except `orders_by_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_sales: Decimal,
    pub total_orders: usize,
    pub total_items_sold: u64,
    pub average_order_value: Decimal,
    pub total_discounts: Decimal,
    pub sales_over_time: Vec<DailySales>,
    /// In order of first appearance in the order collection.
    pub sales_by_category: Vec<CategorySales>,
    pub top_products: Vec<TopProduct>,
    pub orders_by_status: Vec<StatusCount>,
}

/// Splits date ranges into calendar-day buckets.
pub struct DateRangeBucketer;

impl DateRangeBucketer {
    /// Every calendar day from `start` to `end` inclusive, ascending.
    pub fn bucket_dates(
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, ServiceError> {
        if start > end {
            return Err(ServiceError::InvalidRange { start, end });
        }
        Ok(start.iter_days().take_while(|day| *day <= end).collect())
    }

    /// Calendar day of `timestamp` in the calendar described by `offset`.
    pub fn day_of(timestamp: &DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
        timestamp.with_timezone(offset).date_naive()
    }

    /// Position of `day` in the skeleton starting at `start` with `len` buckets.
    pub fn bucket_index(start: NaiveDate, len: usize, day: NaiveDate) -> Option<usize> {
        let index = usize::try_from((day - start).num_days()).ok()?;
        (index < len).then_some(index)
    }
}

#[derive(Default)]
struct ProductTally {
    title: Option<String>,
    quantity: u64,
    revenue: Decimal,
}

/// Builds [`SalesReport`]s from order collections.
#[derive(Debug, Clone, Copy)]
pub struct SalesAggregator {
    top_n: usize,
}

impl Default for SalesAggregator {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_PRODUCTS,
        }
    }
}

impl SalesAggregator {
    pub fn new(top_n: usize) -> Result<Self, ServiceError> {
        if top_n == 0 {
            return Err(ServiceError::invalid_argument(
                "top product count must be a positive integer",
            ));
        }
        Ok(Self { top_n })
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Aggregates `orders` over `range`.
    ///
    /// An empty collection is valid and yields a zero report whose
    /// `sales_over_time` still spans every requested day.
    #[instrument(skip_all, fields(orders = orders.len(), start = %range.start_date, end = %range.end_date, top_n = self.top_n))]
    pub fn aggregate(
        &self,
        orders: &[Order],
        range: &ReportQuery,
    ) -> Result<SalesReport, ServiceError> {
        let days = DateRangeBucketer::bucket_dates(range.start_date, range.end_date)?;
        let mut daily_totals = vec![Decimal::ZERO; days.len()];
        let mut status_counts: HashMap<OrderStatus, usize> = HashMap::new();

        let mut total_sales = Decimal::ZERO;
        let mut total_orders = 0usize;
        let mut total_items_sold = 0u64;
        let mut total_discounts = Decimal::ZERO;

        let mut category_index: HashMap<String, usize> = HashMap::new();
        let mut sales_by_category: Vec<CategorySales> = Vec::new();
        let mut product_tallies: HashMap<&ProductId, ProductTally> = HashMap::new();

        for order in orders {
            let day = DateRangeBucketer::day_of(&order.created_at, &range.offset);
            let Some(bucket) = DateRangeBucketer::bucket_index(range.start_date, days.len(), day)
            else {
                continue;
            };

            *status_counts.entry(order.status).or_insert(0) += 1;
            if order.is_cancelled() {
                continue;
            }

            let order_total = order.effective_total().ok_or_else(|| amount_overflow(order))?;
            total_orders += 1;
            accumulate(&mut total_sales, order_total, order)?;
            total_items_sold += order.items_count();
            accumulate(&mut daily_totals[bucket], order_total, order)?;

            for item in &order.products {
                let line_total = item.line_total().ok_or_else(|| amount_overflow(order))?;
                let discount = item.discount_amount().ok_or_else(|| amount_overflow(order))?;
                accumulate(&mut total_discounts, discount, order)?;

                let category = item.category_name().unwrap_or(UNCATEGORIZED);
                let index = match category_index.get(category) {
                    Some(&index) => index,
                    None => {
                        category_index.insert(category.to_string(), sales_by_category.len());
                        sales_by_category.push(CategorySales {
                            category: category.to_string(),
                            total_revenue: Decimal::ZERO,
                        });
                        sales_by_category.len() - 1
                    }
                };
                accumulate(&mut sales_by_category[index].total_revenue, line_total, order)?;

                if let Some(product) = &item.product {
                    let tally = product_tallies.entry(&product.id).or_default();
                    tally.quantity += u64::from(item.quantity);
                    accumulate(&mut tally.revenue, line_total, order)?;
                    if tally.title.is_none() {
                        tally.title = product.title.clone();
                    }
                }
            }
        }

        let average_order_value = if total_orders > 0 {
            total_sales / Decimal::from(total_orders)
        } else {
            Decimal::ZERO
        };

        let sales_over_time = days
            .into_iter()
            .zip(daily_totals)
            .map(|(date, total_sales)| DailySales { date, total_sales })
            .collect();

        let top_products = self.rank_products(product_tallies);

        let orders_by_status = OrderStatus::iter()
            .map(|status| StatusCount {
                status,
                orders: status_counts.get(&status).copied().unwrap_or(0),
            })
            .collect();

        debug!(
            total_orders,
            total_items_sold,
            total_sales = %total_sales,
            categories = sales_by_category.len(),
            "sales report aggregated"
        );

        Ok(SalesReport {
            start_date: range.start_date,
            end_date: range.end_date,
            total_sales,
            total_orders,
            total_items_sold,
            average_order_value,
            total_discounts,
            sales_over_time,
            sales_by_category,
            top_products,
            orders_by_status,
        })
    }

    /// Quantity descending, then revenue descending, then product id ascending.
    fn rank_products(&self, tallies: HashMap<&ProductId, ProductTally>) -> Vec<TopProduct> {
        let mut ranked: Vec<TopProduct> = tallies
            .into_iter()
            .map(|(product_id, tally)| TopProduct {
                product_id: product_id.clone(),
                title: tally.title,
                total_quantity: tally.quantity,
                total_revenue: tally.revenue,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.total_quantity
                .cmp(&a.total_quantity)
                .then_with(|| b.total_revenue.cmp(&a.total_revenue))
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        ranked.truncate(self.top_n);
        ranked
    }
}

fn amount_overflow(order: &Order) -> ServiceError {
    ServiceError::invalid_argument(format!(
        "order {}: amounts exceed the supported decimal range",
        order.id
    ))
}

/// Adds `amount` into `total`, failing instead of overflowing.
fn accumulate(total: &mut Decimal, amount: Decimal, order: &Order) -> Result<(), ServiceError> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| amount_overflow(order))?;
    Ok(())
}
