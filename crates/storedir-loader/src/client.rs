use std::time::Duration;

use reqwest::Client;
use storedir_core::{AppConfig, LoadingState, Store};

use crate::chunk::{process_in_chunks, CHUNK_SIZE};
use crate::error::LoaderError;
use crate::source::DataSource;

/// Message shown to the user when the load fails.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading data. Please try again.";

/// One-shot loader for the store catalog.
///
/// Performs a single attempt per [`CatalogLoader::load`] call. A failure is
/// terminal for that call; callers retry by calling `load` again.
pub struct CatalogLoader {
    client: Client,
    chunk_size: usize,
}

impl CatalogLoader {
    /// Creates a loader with the given HTTP timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            chunk_size: CHUNK_SIZE,
        })
    }

    /// Creates a loader from application configuration.
    ///
    /// # Errors
    ///
    /// See [`CatalogLoader::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, LoaderError> {
        let loader = Self::new(config.request_timeout_secs, &config.user_agent)?;
        Ok(loader.with_chunk_size(config.chunk_size))
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Fetch, filter, and id-stamp the catalog, reporting progress.
    ///
    /// `retain` decides which well-formed records are kept. On failure the
    /// last progress report is a failed [`LoadingState`] carrying
    /// [`LOAD_ERROR_MESSAGE`], and the error is returned.
    ///
    /// # Errors
    ///
    /// - [`LoaderError::Http`]: network or TLS failure.
    /// - [`LoaderError::UnexpectedStatus`]: non-2xx response.
    /// - [`LoaderError::Io`]: the local file cannot be read.
    /// - [`LoaderError::Deserialize`]: the body is not a JSON array of records.
    pub async fn load<R, P>(
        &self,
        source: &DataSource,
        retain: R,
        mut on_progress: P,
    ) -> Result<Vec<Store>, LoaderError>
    where
        R: Fn(&Store) -> bool,
        P: FnMut(LoadingState),
    {
        on_progress(LoadingState::started());

        let raw = match self.fetch(source).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!(source = %source, error = %err, "catalog load failed");
                on_progress(LoadingState::failed(LOAD_ERROR_MESSAGE));
                return Err(err);
            }
        };

        let fetched = raw.len();
        on_progress(LoadingState::in_progress(
            50,
            format!("Processing {fetched} stores..."),
        ));

        let stores = process_in_chunks(raw, self.chunk_size, retain, &mut on_progress).await;

        on_progress(LoadingState::finished());
        tracing::info!(
            source = %source,
            fetched,
            kept = stores.len(),
            "catalog loaded"
        );

        Ok(stores)
    }

    /// Fetch and deserialize the raw record array without post-processing.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogLoader::load`].
    pub async fn fetch(&self, source: &DataSource) -> Result<Vec<Store>, LoaderError> {
        let (body, context) = match source {
            DataSource::Url(url) => (self.fetch_url(url).await?, url.clone()),
            DataSource::File(path) => {
                let body = tokio::fs::read(path).await.map_err(|e| LoaderError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
                (body, path.display().to_string())
            }
        };

        serde_json::from_slice::<Vec<Store>>(&body)
            .map_err(|source| LoaderError::Deserialize { context, source })
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, LoaderError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
