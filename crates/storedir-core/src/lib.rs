//! Core catalog library: the store record model, text normalization, the
//! filter/search/sort/paginate query engine, and the session state that a
//! front-end drives between queries.

pub mod app_config;
pub mod brands;
pub mod config;
pub mod debounce;
pub mod export;
pub mod facets;
pub mod normalize;
pub mod query;
pub mod session;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use brands::{load_brand_catalog, BrandCatalog, BrandCategory};
pub use config::{load_app_config, load_app_config_from_env};
pub use debounce::Debouncer;
pub use export::{to_csv_string, write_csv};
pub use facets::{municipalities, regions, top_stores};
pub use normalize::{collation_key, normalize_for_search, normalize_postal_code, normalize_text};
pub use query::{query, query_with_page_size, FilterState, QueryPage, SortMode, PAGE_SIZE};
pub use session::{
    CatalogSession, InputEvent, InputSource, LoadingState, QueryTicket, ScrollMetrics,
    ScrollObserver,
};
pub use store::Store;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[from] serde_yaml::Error),

    #[error("brand catalog validation failed: {0}")]
    Validation(String),
}
