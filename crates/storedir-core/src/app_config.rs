use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Path or `http(s)://` URL of the record file.
    pub data_source: String,
    pub brands_path: PathBuf,
    /// Brand dropped at load time, if any.
    pub exclude_brand: Option<String>,
    pub page_size: usize,
    pub chunk_size: usize,
    pub top_limit: usize,
    pub search_debounce_ms: u64,
    pub scroll_debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    #[must_use]
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }
}
