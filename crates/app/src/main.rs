use std::io::Write;

use anyhow::Context;
use clap::Parser;

use storefront_app::{HttpCatalogSource, StorefrontConfig, StorefrontSession, fetch_snapshot};
use storefront_catalog::{CatalogProjection, CategorySelection, PriceRange, SortMode};

/// Fetch the catalog and print the filtered, sorted product cards as JSON lines.
#[derive(Debug, Parser)]
#[command(name = "storefront", version)]
struct Cli {
    /// Category label to show; omit for all categories.
    #[arg(long)]
    category: Option<String>,

    /// Lower price bound (inclusive).
    #[arg(long)]
    min: Option<f64>,

    /// Upper price bound (inclusive).
    #[arg(long)]
    max: Option<f64>,

    /// PRICE_ASC, PRICE_DESC or DISCOUNT.
    #[arg(long)]
    sort: Option<SortMode>,

    /// Print the category options instead of products.
    #[arg(long)]
    list_categories: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env().context("invalid storefront configuration")?;
    storefront_observability::init(&config.log);
    for key in &config.defaulted {
        tracing::debug!(key, "not set; using default");
    }

    let policy = config.discount_policy()?;
    tracing::info!(
        catalog_url = %config.catalog_url,
        discount_table_version = policy.version(),
        "starting storefront"
    );

    let source = HttpCatalogSource::new(&config.catalog_url, config.http_timeout)?;
    let snapshot = fetch_snapshot(&source)
        .await
        .with_context(|| format!("failed to fetch catalog from {}", config.catalog_url))?;

    let mut session = StorefrontSession::new(CatalogProjection::new(policy));
    session.load(snapshot);

    let mut out = std::io::stdout().lock();

    if cli.list_categories {
        for option in session.category_options() {
            writeln!(out, "{option}")?;
        }
        return Ok(());
    }

    if let Some(category) = cli.category {
        session.select_category(CategorySelection::from(category));
    }
    if let Some(mode) = cli.sort {
        session.set_sort_mode(mode);
    }
    if cli.min.is_some() || cli.max.is_some() {
        let current = session.filter_state().price_range;
        session.set_price_range(PriceRange::new(
            cli.min.unwrap_or(current.low()),
            cli.max.unwrap_or(current.high()),
        ));
    }
    if let Some(notice) = session.discount_sort_notice() {
        tracing::warn!("{notice}");
    }

    let cards = session.cards();
    tracing::info!(visible = cards.len(), total = session.products().len(), "rendering catalog");
    for card in &cards {
        writeln!(out, "{}", serde_json::to_string(card)?)?;
    }

    Ok(())
}
