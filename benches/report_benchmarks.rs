use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use storefront_insights::{
    dto::decode_orders, Category, InventoryQuery, InventoryQueryEngine, Order, OrderLineItem,
    OrderStatus, Product, ProductId, ProductRef, ReportQuery, SalesAggregator, StockFilter,
};

const CATEGORIES: [&str; 4] = ["Grains", "Oils", "Spices", "Dairy"];

fn catalog(size: usize) -> Vec<Product> {
    let updated_at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    (0..size)
        .map(|i| Product {
            id: ProductId::new(format!("p-{:05}", i)),
            title: format!("Product {} {}", CATEGORIES[i % 4], i),
            stock: (i % 40) as u32,
            category: Some(Category::named(CATEGORIES[i % 4])),
            images: Vec::new(),
            updated_at,
        })
        .collect()
}

fn order_book(size: usize) -> Vec<Order> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    (0..size)
        .map(|i| {
            let status = match i % 10 {
                0 => OrderStatus::Cancelled,
                1 | 2 => OrderStatus::Pending,
                _ => OrderStatus::Paid,
            };
            let products = (0..3)
                .map(|j| {
                    let product = ProductRef::new(format!("p-{:05}", (i * 7 + j) % 500))
                        .with_category(CATEGORIES[(i + j) % 4]);
                    OrderLineItem::new(Some(product), (j + 1) as u32, Decimal::new(1999, 2))
                })
                .collect();
            Order {
                id: format!("o-{}", i),
                products,
                total_amount: None,
                status,
                created_at: start + Duration::minutes((i * 37) as i64),
                consumer: None,
                contact: None,
                address: None,
            }
        })
        .collect()
}

// Inventory search, filter and pagination over catalogs of increasing size
fn inventory_query_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory_query");

    for size in [100, 1_000, 10_000].iter() {
        let products = catalog(*size);
        let query = InventoryQuery::new(2, 20)
            .with_search("spices")
            .with_stock_filter(StockFilter::Low);
        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, products| {
            b.iter(|| InventoryQueryEngine::query(black_box(products), black_box(&query)))
        });
    }

    group.finish();
}

fn stock_summary_benchmark(c: &mut Criterion) {
    let products = catalog(10_000);
    c.bench_function("stock_summary", |b| {
        b.iter(|| InventoryQueryEngine::summarize(black_box(&products)))
    });
}

// Sales aggregation over a month of orders
fn sales_aggregation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sales_aggregation");
    let range = ReportQuery::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    )
    .unwrap();
    let aggregator = SalesAggregator::default();

    for size in [100, 1_000, 10_000].iter() {
        let orders = order_book(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &orders, |b, orders| {
            b.iter(|| aggregator.aggregate(black_box(orders), black_box(&range)))
        });
    }

    group.finish();
}

fn order_decoding_benchmark(c: &mut Criterion) {
    let record = r#"{"_id": "o-1", "status": "paid", "createdAt": "2024-03-01T10:00:00Z",
        "products": [{"productId": {"_id": "p-1", "title": "Rice", "category": {"name": "Grains"}},
                      "quantity": 2, "price": 19.99}]}"#;
    let payload = format!("[{}]", vec![record; 500].join(","));

    c.bench_function("decode_orders", |b| {
        b.iter(|| decode_orders(black_box(payload.as_bytes())))
    });
}

criterion_group!(
    benches,
    inventory_query_benchmark,
    stock_summary_benchmark,
    sales_aggregation_benchmark,
    order_decoding_benchmark
);
criterion_main!(benches);
