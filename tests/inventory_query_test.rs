mod common;

use assert_matches::assert_matches;
use rstest::rstest;
use storefront_insights::{
    InventoryQuery, InventoryQueryEngine, ServiceError, StockClassifier, StockFilter, StockStatus,
};

use common::{categorized, product};

fn grocery_shelf() -> Vec<storefront_insights::Product> {
    vec![
        product("p-rice", "Rice", 0),
        product("p-oil", "Oil", 5),
        product("p-salt", "Salt", 50),
    ]
}

#[rstest]
#[case(0, StockStatus::OutOfStock)]
#[case(1, StockStatus::LowStock)]
#[case(9, StockStatus::LowStock)]
#[case(10, StockStatus::LowStock)]
#[case(11, StockStatus::InStock)]
#[case(5_000, StockStatus::InStock)]
fn classify_thresholds(#[case] stock: i64, #[case] expected: StockStatus) {
    assert_eq!(StockClassifier::classify(stock).unwrap(), expected);
}

#[rstest]
#[case(-1)]
#[case(i64::MIN)]
fn classify_rejects_negative(#[case] stock: i64) {
    assert_matches!(
        StockClassifier::classify(stock),
        Err(ServiceError::InvalidArgument(_))
    );
}

#[test]
fn low_filter_returns_only_oil() {
    let products = grocery_shelf();
    let query = InventoryQuery::new(1, 10).with_stock_filter(StockFilter::Low);

    let page = InventoryQueryEngine::query(&products, &query).unwrap();

    let titles: Vec<&str> = page.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Oil"]);
    assert_eq!(page.total_matched, 1);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn out_filter_returns_only_rice() {
    let products = grocery_shelf();
    let query = InventoryQuery::new(1, 10).with_stock_filter(StockFilter::Out);

    let page = InventoryQueryEngine::query(&products, &query).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id.as_str(), "p-rice");
}

#[rstest]
#[case(1, 3, 3, 1)]
#[case(1, 2, 2, 2)]
#[case(2, 2, 1, 2)]
#[case(3, 2, 0, 2)]
#[case(1, 1, 1, 3)]
fn pagination_slices(
    #[case] page: u32,
    #[case] page_size: u32,
    #[case] expected_items: usize,
    #[case] expected_pages: usize,
) {
    let products = grocery_shelf();
    let result =
        InventoryQueryEngine::query(&products, &InventoryQuery::new(page, page_size)).unwrap();
    assert_eq!(result.items.len(), expected_items);
    assert_eq!(result.total_pages, expected_pages);
    assert_eq!(result.total_matched, 3);
}

#[rstest]
#[case(0, 10)]
#[case(1, 0)]
#[case(0, 0)]
fn non_positive_pagination_is_invalid(#[case] page: u32, #[case] page_size: u32) {
    let products = grocery_shelf();
    assert_matches!(
        InventoryQueryEngine::query(&products, &InventoryQuery::new(page, page_size)),
        Err(ServiceError::InvalidArgument(_))
    );
}

#[test]
fn search_and_filter_combine() {
    let products = vec![
        categorized("1", "Green Tea", 4, "Beverages"),
        categorized("2", "Black Tea", 40, "Beverages"),
        categorized("3", "Teapot", 0, "Kitchen"),
        categorized("4", "Coffee", 2, "Beverages"),
    ];

    let query = InventoryQuery::new(1, 10)
        .with_search("TEA")
        .with_stock_filter(StockFilter::Low);
    let page = InventoryQueryEngine::query(&products, &query).unwrap();

    let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1"]);
}

#[test]
fn empty_search_keeps_everything() {
    let products = grocery_shelf();
    let page = InventoryQueryEngine::query(&products, &InventoryQuery::new(1, 10).with_search(""))
        .unwrap();
    assert_eq!(page.total_matched, products.len());
}

#[test]
fn inventory_page_serializes_camel_case() {
    let products = grocery_shelf();
    let page = InventoryQueryEngine::query(&products, &InventoryQuery::new(1, 2)).unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["totalMatched"], 3);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["items"][0]["title"], "Rice");
    assert_eq!(json["items"][1]["stock"], 5);
}

#[test]
fn summary_counts_statuses() {
    let summary = InventoryQueryEngine::summarize(&grocery_shelf());
    assert_eq!(summary.total_products, 3);
    assert_eq!(summary.in_stock, 1);
    assert_eq!(summary.low_stock, 1);
    assert_eq!(summary.out_of_stock, 1);
    assert_eq!(summary.total_units, 55);
}
