mod browse;
mod catalog;
mod convert;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storedir_core::{FilterState, SortMode};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storedir-cli")]
#[command(about = "Store directory catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where to read the catalog from and what to drop while loading.
#[derive(Debug, Clone, Default, Args)]
struct SourceArgs {
    /// Record file path or `http(s)://` URL (defaults to `STOREDIR_DATA_SOURCE`)
    #[arg(long)]
    source: Option<String>,
    /// Drop stores whose name contains this brand (defaults to `STOREDIR_EXCLUDE_BRAND`)
    #[arg(long)]
    exclude_brand: Option<String>,
}

/// Filter, search, and sort options shared by listing commands.
#[derive(Debug, Clone, Default, Args)]
struct FilterArgs {
    /// Free-text search
    #[arg(short, long, default_value = "")]
    query: String,
    /// Exact region (state) match
    #[arg(long)]
    region: Option<String>,
    /// Case-insensitive municipality substring
    #[arg(long)]
    municipality: Option<String>,
    /// featured-first, alphabetical, or by-region
    #[arg(long, default_value_t = SortMode::FeaturedFirst)]
    sort: SortMode,
    /// Search address fields instead of names and tax id
    #[arg(long)]
    address: bool,
    /// Substring matching instead of whole words
    #[arg(long)]
    flexible: bool,
}

impl FilterArgs {
    fn to_filter(&self) -> FilterState {
        FilterState {
            query: self.query.clone(),
            region: self.region.clone(),
            municipality: self.municipality.clone(),
            sort: self.sort,
            include_address_fields: self.address,
            flexible_match: self.flexible,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a spreadsheet of establishments into the JSON catalog
    Convert {
        /// Workbook to read (.xlsx, .xls, .ods)
        input: PathBuf,
        /// Directory for the generated files
        #[arg(long, default_value = "./out")]
        out_dir: PathBuf,
        /// Output file stem (defaults to the input file stem)
        #[arg(long)]
        name: Option<String>,
    },
    /// List one page of the filtered catalog
    Query {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Zero-based page; output includes every earlier page
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the filtered catalog to a CSV file
    Export {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Output path (defaults to `comercios_cfe_<date>.csv`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show featured stores
    Top {
        #[command(flatten)]
        source: SourceArgs,
        /// Maximum number of stores (defaults to `STOREDIR_TOP_LIMIT`)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the regions and municipalities present in the catalog
    Facets {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List brand categories
    Brands {
        /// Show only the compact featured strip
        #[arg(long)]
        featured: bool,
    },
    /// Print map-search links for matching stores
    MapUrl {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum number of links
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Interactive catalog session driven by commands on stdin
    Browse {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = storedir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Convert {
            input,
            out_dir,
            name,
        }) => convert::run_convert(&input, &out_dir, name.as_deref())?,
        Some(Commands::Query {
            source,
            filter,
            page,
            json,
        }) => catalog::run_query(&config, &source, &filter.to_filter(), page, json).await?,
        Some(Commands::Export {
            source,
            filter,
            output,
        }) => catalog::run_export(&config, &source, &filter.to_filter(), output).await?,
        Some(Commands::Top { source, limit }) => {
            catalog::run_top(&config, &source, limit.unwrap_or(config.top_limit)).await?;
        }
        Some(Commands::Facets { source }) => catalog::run_facets(&config, &source).await?,
        Some(Commands::Brands { featured }) => catalog::run_brands(&config, featured)?,
        Some(Commands::MapUrl {
            source,
            filter,
            limit,
        }) => catalog::run_map_url(&config, &source, &filter.to_filter(), limit).await?,
        Some(Commands::Browse { source }) => browse::run_browse(&config, &source).await?,
        None => println!("storedir-cli: run with --help to list commands"),
    }

    Ok(())
}
