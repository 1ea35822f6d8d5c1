use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use storefront_insights::{
    config::{self, AppConfig},
    dto::{decode_orders, decode_products},
    services::{
        inventory::{
            InventoryPage, InventoryQuery, InventoryQueryEngine, StockFilter, StockSummary,
        },
        reports::{SalesAggregator, SalesReport},
    },
    DateRangeParams, PaginationParams, Product,
};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config().context("failed to load application config")?;
    config::init_tracing(config.log_level(), config.log_json);

    match cli.command {
        Commands::Inventory(args) => handle_inventory(&config, args, cli.json)?,
        Commands::StockSummary(args) => handle_stock_summary(args, cli.json)?,
        Commands::Sales(args) => handle_sales(&config, args, cli.json)?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "storefront-report",
    about = "Inventory and sales reports over exported storefront records",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filtered, paginated inventory listing
    Inventory(InventoryArgs),
    /// Stock health counts for a product export
    StockSummary(StockSummaryArgs),
    /// Sales report over a date range
    Sales(SalesArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum StockFilterArg {
    All,
    Low,
    Out,
}

impl From<StockFilterArg> for StockFilter {
    fn from(value: StockFilterArg) -> Self {
        match value {
            StockFilterArg::All => StockFilter::All,
            StockFilterArg::Low => StockFilter::Low,
            StockFilterArg::Out => StockFilter::Out,
        }
    }
}

#[derive(Args)]
struct InventoryArgs {
    #[arg(long, help = "JSON file holding an array of product records")]
    products: PathBuf,
    #[arg(long, default_value = "", help = "Case-insensitive title search")]
    search: String,
    #[arg(long, value_enum, default_value = "all", help = "Stock status to keep")]
    filter: StockFilterArg,
    #[arg(long, help = "Page number, starting at 1")]
    page: Option<u32>,
    #[arg(long, help = "Products per page (defaults to configured page size)")]
    page_size: Option<u32>,
}

#[derive(Args)]
struct StockSummaryArgs {
    #[arg(long, help = "JSON file holding an array of product records")]
    products: PathBuf,
}

#[derive(Args)]
struct SalesArgs {
    #[arg(long, help = "JSON file holding an array of order records")]
    orders: PathBuf,
    #[arg(long, help = "First day of the report (YYYY-MM-DD)")]
    start: String,
    #[arg(long, help = "Last day of the report, inclusive (YYYY-MM-DD)")]
    end: String,
    #[arg(long, help = "Number of ranked products (defaults to configured value)")]
    top: Option<u32>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Calendar offset in minutes east of UTC (defaults to configured value)"
    )]
    utc_offset_minutes: Option<i32>,
}

fn load_products(path: &Path) -> Result<Vec<Product>> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let products = decode_products(&raw)
        .with_context(|| format!("failed to decode products from {}", path.display()))?;
    debug!(count = products.len(), "products loaded");
    Ok(products)
}

fn handle_inventory(config: &AppConfig, args: InventoryArgs, json: bool) -> Result<()> {
    let products = load_products(&args.products)?;
    let (page, page_size) = PaginationParams {
        page: args.page,
        page_size: args.page_size,
    }
    .resolve(config);

    let query = InventoryQuery::new(page, page_size)
        .with_search(args.search)
        .with_stock_filter(args.filter.into());
    let result =
        InventoryQueryEngine::query(&products, &query).context("inventory query failed")?;

    if json {
        print_json(&result)?;
    } else {
        render_inventory(&result);
    }
    Ok(())
}

fn handle_stock_summary(args: StockSummaryArgs, json: bool) -> Result<()> {
    let products = load_products(&args.products)?;
    let summary = InventoryQueryEngine::summarize(&products);

    if json {
        print_json(&summary)?;
    } else {
        render_stock_summary(&summary);
    }
    Ok(())
}

fn handle_sales(config: &AppConfig, args: SalesArgs, json: bool) -> Result<()> {
    let raw = fs::read(&args.orders)
        .with_context(|| format!("failed to read {}", args.orders.display()))?;
    let orders = decode_orders(&raw)
        .with_context(|| format!("failed to decode orders from {}", args.orders.display()))?;
    debug!(count = orders.len(), "orders loaded");

    let range = DateRangeParams {
        start_date: args.start,
        end_date: args.end,
        utc_offset_minutes: args.utc_offset_minutes,
    }
    .to_report_query(config.report_offset()?)
    .context("invalid report range")?;

    let top = args.top.unwrap_or(config.default_top_products);
    let report = SalesAggregator::new(top as usize)?
        .aggregate(&orders, &range)
        .context("sales aggregation failed")?;

    if json {
        print_json(&report)?;
    } else {
        render_sales(&report);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_inventory(page: &InventoryPage<'_>) {
    println!(
        "Page {}/{} ({} matching products)",
        page.page, page.total_pages, page.total_matched
    );
    for product in &page.items {
        println!(
            "  {:<24} {:>6} units  {:<12} {}",
            product.id,
            product.stock,
            product.stock_status(),
            product.title
        );
    }
}

fn render_stock_summary(summary: &StockSummary) {
    println!("Products:     {}", summary.total_products);
    println!("In stock:     {}", summary.in_stock);
    println!("Low stock:    {}", summary.low_stock);
    println!("Out of stock: {}", summary.out_of_stock);
    println!("Total units:  {}", summary.total_units);
}

fn render_sales(report: &SalesReport) {
    println!("Sales {} to {}", report.start_date, report.end_date);
    println!("  Orders:          {}", report.total_orders);
    println!("  Items sold:      {}", report.total_items_sold);
    println!("  Total sales:     {}", report.total_sales.round_dp(2));
    println!("  Average order:   {}", report.average_order_value.round_dp(2));
    println!("  Discounts given: {}", report.total_discounts.round_dp(2));

    println!("Daily sales");
    for day in &report.sales_over_time {
        println!("  {}  {}", day.date, day.total_sales.round_dp(2));
    }

    println!("Sales by category");
    for category in &report.sales_by_category {
        println!("  {:<24} {}", category.category, category.total_revenue.round_dp(2));
    }

    println!("Top products");
    for (rank, product) in report.top_products.iter().enumerate() {
        println!(
            "  {}. {:<24} qty {:>5}  revenue {}",
            rank + 1,
            product.title.as_deref().unwrap_or(product.product_id.as_str()),
            product.total_quantity,
            product.total_revenue.round_dp(2)
        );
    }

    println!("Orders by status");
    for count in &report.orders_by_status {
        println!("  {:<10} {}", count.status, count.orders);
    }
}
