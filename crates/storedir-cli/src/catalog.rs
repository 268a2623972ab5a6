//! Catalog command handlers for the CLI.
//!
//! Each handler loads the record set once, runs the pure core operation, and
//! prints the result to stdout. Logs go to stderr so output stays pipeable.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use storedir_core::{AppConfig, FilterState, LoadingState, Store};
use storedir_loader::{exclude_brand, keep_all, CatalogLoader, DataSource};

use crate::SourceArgs;

fn report_progress(state: LoadingState) {
    if state.is_failed() {
        eprintln!("error: {}", state.error.unwrap_or_default());
    } else if state.is_loading {
        tracing::debug!(progress = state.progress, "{}", state.message);
    }
}

/// Load the catalog from the CLI override or the configured source.
///
/// # Errors
///
/// Returns an error if the loader cannot be built or the load fails.
pub(crate) async fn load_catalog(
    config: &AppConfig,
    args: &SourceArgs,
) -> anyhow::Result<Vec<Store>> {
    let location = args.source.as_deref().unwrap_or(&config.data_source);
    let source = DataSource::parse(location);
    let loader = CatalogLoader::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog loader: {e}"))?;

    let excluded = args
        .exclude_brand
        .as_deref()
        .or(config.exclude_brand.as_deref());
    let stores = match excluded {
        Some(brand) => {
            tracing::debug!(brand, "excluding brand at load time");
            loader
                .load(&source, exclude_brand(brand), report_progress)
                .await?
        }
        None => loader.load(&source, keep_all, report_progress).await?,
    };
    Ok(stores)
}

fn print_store(store: &Store) {
    let marker = if store.is_featured { "*" } else { " " };
    println!(
        "{marker} {} | {} | {} | {}",
        store.display_name(),
        store.full_address(),
        store.location_text(),
        store.postal_code
    );
}

/// Print one page of the filtered catalog.
pub(crate) async fn run_query(
    config: &AppConfig,
    args: &SourceArgs,
    filter: &FilterState,
    page: usize,
    json: bool,
) -> anyhow::Result<()> {
    let stores = load_catalog(config, args).await?;
    let result = storedir_core::query_with_page_size(&stores, filter, page, config.page_size);

    if json {
        println!("{}", serde_json::to_string_pretty(&result.visible)?);
        return Ok(());
    }

    if result.visible.is_empty() {
        println!("No stores match the current filters.");
        return Ok(());
    }
    for store in &result.visible {
        print_store(store);
    }
    println!(
        "showing {} of {} matching stores{}",
        result.visible.len(),
        result.total,
        if result.has_more {
            format!(" (next: --page {})", page + 1)
        } else {
            String::new()
        }
    );
    Ok(())
}

/// Default export filename, dated so repeated exports do not collide.
pub(crate) fn default_export_path(today: chrono::NaiveDate) -> PathBuf {
    PathBuf::from(format!("comercios_cfe_{}.csv", today.format("%Y-%m-%d")))
}

/// Write every record matching `filter` to a CSV file.
pub(crate) async fn run_export(
    config: &AppConfig,
    args: &SourceArgs,
    filter: &FilterState,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let stores = load_catalog(config, args).await?;
    let result = storedir_core::query_with_page_size(&stores, filter, 0, stores.len().max(1));

    let path = output.unwrap_or_else(|| default_export_path(chrono::Local::now().date_naive()));
    let file = File::create(&path)
        .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", path.display()))?;
    let mut writer = BufWriter::new(file);
    storedir_core::write_csv(&mut writer, result.visible.iter().copied())?;
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = result.visible.len(), "wrote CSV export");
    println!("wrote {} stores to {}", result.visible.len(), path.display());
    Ok(())
}

/// Print featured stores in load order.
pub(crate) async fn run_top(
    config: &AppConfig,
    args: &SourceArgs,
    limit: usize,
) -> anyhow::Result<()> {
    let stores = load_catalog(config, args).await?;
    let top = storedir_core::top_stores(&stores, limit);
    if top.is_empty() {
        println!("No featured stores.");
    }
    for store in top {
        print_store(store);
    }
    Ok(())
}

/// Print the region and municipality dropdown options.
pub(crate) async fn run_facets(config: &AppConfig, args: &SourceArgs) -> anyhow::Result<()> {
    let stores = load_catalog(config, args).await?;

    println!("Regions:");
    for region in storedir_core::regions(&stores) {
        println!("  {region}");
    }
    println!("Municipalities:");
    for municipality in storedir_core::municipalities(&stores) {
        println!("  {municipality}");
    }
    Ok(())
}

/// Print brand categories, or only the featured strip.
pub(crate) fn run_brands(config: &AppConfig, featured: bool) -> anyhow::Result<()> {
    let catalog = storedir_core::load_brand_catalog(&config.brands_path)?;

    if featured {
        println!("{}", catalog.featured_brands().join(", "));
        return Ok(());
    }
    for category in &catalog.categories {
        println!("{} {}", category.icon, category.title);
        for brand in &category.brands {
            println!("  {brand}");
        }
    }
    Ok(())
}

/// Print map-search links for the first `limit` matching stores.
pub(crate) async fn run_map_url(
    config: &AppConfig,
    args: &SourceArgs,
    filter: &FilterState,
    limit: usize,
) -> anyhow::Result<()> {
    let stores = load_catalog(config, args).await?;
    let result = storedir_core::query_with_page_size(&stores, filter, 0, limit.max(1));
    if result.visible.is_empty() {
        anyhow::bail!("no store matches the given filters");
    }
    for store in result.visible.iter().take(limit) {
        println!("{}\t{}", store.display_name(), store.map_url());
    }
    Ok(())
}
