use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
