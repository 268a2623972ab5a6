//! Loads the store catalog once per session: fetch from a URL or a local
//! file, then process the records in chunks with cooperative yields so a UI
//! can keep rendering and show progress.

pub mod chunk;
pub mod client;
pub mod debounce;
pub mod error;
pub mod source;

pub use chunk::{exclude_brand, keep_all, process_in_chunks, CHUNK_SIZE};
pub use client::{CatalogLoader, LOAD_ERROR_MESSAGE};
pub use debounce::debounced;
pub use error::LoaderError;
pub use source::DataSource;
