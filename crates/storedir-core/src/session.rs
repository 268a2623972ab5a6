//! Session state as immutable snapshots.
//!
//! Each update returns a new [`CatalogSession`]; the caller re-runs the
//! query right after an update that changes what is visible. Results are
//! applied through a [`QueryTicket`] so a result computed for an older
//! state is discarded instead of overwriting a newer one.

use serde::Serialize;

use crate::query::{FilterState, SortMode};

/// Scroll offset past which the "back to top" control is shown.
pub const SCROLL_TO_TOP_THRESHOLD: f64 = 300.0;

/// Fraction of the document height that triggers "load more".
pub const LOAD_MORE_RATIO: f64 = 0.8;

/// Coarse progress of the one-time data load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadingState {
    pub is_loading: bool,
    /// 0 to 100.
    pub progress: u8,
    pub message: String,
    /// User-facing error; set only when the load failed.
    pub error: Option<String>,
}

impl LoadingState {
    #[must_use]
    pub fn started() -> Self {
        Self::in_progress(0, "Starting data load...")
    }

    #[must_use]
    pub fn in_progress(progress: u8, message: impl Into<String>) -> Self {
        Self {
            is_loading: true,
            progress: progress.min(100),
            message: message.into(),
            error: None,
        }
    }

    #[must_use]
    pub fn finished() -> Self {
        Self {
            is_loading: false,
            progress: 100,
            message: "Data loaded".to_string(),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_loading: false,
            progress: 0,
            message: String::new(),
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Identifies the state a query was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    pub page: usize,
}

/// Scroll position sample supplied by the UI runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn near_bottom(&self) -> bool {
        self.scroll_top + self.viewport_height >= self.document_height * LOAD_MORE_RATIO
    }

    #[must_use]
    pub fn show_scroll_to_top(&self) -> bool {
        self.scroll_top > SCROLL_TO_TOP_THRESHOLD
    }
}

/// A user action on the catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Query(String),
    Region(String),
    Municipality(String),
    Sort(SortMode),
    IncludeAddress(bool),
    FlexibleMatch(bool),
    /// A brand picked from the brand browser.
    Brand(String),
    Reset,
    LoadMore,
}

/// Source of user input events, e.g. a terminal or a UI toolkit bridge.
pub trait InputSource {
    /// The next event, or `None` when the source is exhausted.
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// Source of scroll samples.
pub trait ScrollObserver {
    /// The latest scroll sample, if the position changed since the last call.
    fn sample(&mut self) -> Option<ScrollMetrics>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSession {
    pub filter: FilterState,
    pub page: usize,
    pub has_more: bool,
    pub loading: LoadingState,
    generation: u64,
}

impl Default for CatalogSession {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            page: 0,
            has_more: true,
            loading: LoadingState::default(),
            generation: 0,
        }
    }
}

impl CatalogSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a query against the current state.
    #[must_use]
    pub fn ticket(&self) -> QueryTicket {
        QueryTicket {
            generation: self.generation,
            page: self.page,
        }
    }

    fn with_filter(&self, filter: FilterState) -> Self {
        Self {
            filter,
            page: 0,
            has_more: self.has_more,
            loading: self.loading.clone(),
            generation: self.generation + 1,
        }
    }

    #[must_use]
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        self.with_filter(FilterState {
            query: query.into(),
            ..self.filter.clone()
        })
    }

    /// An empty region clears the filter.
    #[must_use]
    pub fn with_region(&self, region: impl Into<String>) -> Self {
        self.with_filter(FilterState {
            region: non_empty(region.into()),
            ..self.filter.clone()
        })
    }

    /// An empty municipality clears the filter.
    #[must_use]
    pub fn with_municipality(&self, municipality: impl Into<String>) -> Self {
        self.with_filter(FilterState {
            municipality: non_empty(municipality.into()),
            ..self.filter.clone()
        })
    }

    #[must_use]
    pub fn with_sort(&self, sort: SortMode) -> Self {
        self.with_filter(FilterState {
            sort,
            ..self.filter.clone()
        })
    }

    #[must_use]
    pub fn with_include_address(&self, include_address_fields: bool) -> Self {
        self.with_filter(FilterState {
            include_address_fields,
            ..self.filter.clone()
        })
    }

    #[must_use]
    pub fn with_flexible_match(&self, flexible_match: bool) -> Self {
        self.with_filter(FilterState {
            flexible_match,
            ..self.filter.clone()
        })
    }

    /// Search for a brand picked from the brand browser.
    #[must_use]
    pub fn search_brand(&self, brand: &str) -> Self {
        self.with_query(brand)
    }

    /// Default filters and page zero.
    #[must_use]
    pub fn reset_filters(&self) -> Self {
        self.with_filter(FilterState::default())
    }

    /// Advance one page, unless nothing is left or a load is in flight.
    ///
    /// Returns `None` when the request is ignored.
    #[must_use]
    pub fn load_more(&self) -> Option<Self> {
        if !self.has_more || self.loading.is_loading {
            return None;
        }
        Some(Self {
            page: self.page + 1,
            generation: self.generation + 1,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_loading(&self, loading: LoadingState) -> Self {
        Self {
            loading,
            ..self.clone()
        }
    }

    /// Apply a query result issued under `ticket`.
    ///
    /// Returns `None` for a stale ticket; the result must then be dropped.
    #[must_use]
    pub fn apply_result(&self, ticket: QueryTicket, has_more: bool) -> Option<Self> {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale query result"
            );
            return None;
        }
        Some(Self {
            has_more,
            ..self.clone()
        })
    }

    /// Dispatch a user action to the matching update.
    ///
    /// An ignored "load more" returns an unchanged copy.
    #[must_use]
    pub fn apply_input(&self, event: InputEvent) -> Self {
        match event {
            InputEvent::Query(q) => self.with_query(q),
            InputEvent::Region(r) => self.with_region(r),
            InputEvent::Municipality(m) => self.with_municipality(m),
            InputEvent::Sort(s) => self.with_sort(s),
            InputEvent::IncludeAddress(v) => self.with_include_address(v),
            InputEvent::FlexibleMatch(v) => self.with_flexible_match(v),
            InputEvent::Brand(b) => self.search_brand(&b),
            InputEvent::Reset => self.reset_filters(),
            InputEvent::LoadMore => self.load_more().unwrap_or_else(|| self.clone()),
        }
    }

    /// React to a scroll sample: near the bottom this requests the next page.
    #[must_use]
    pub fn on_scroll(&self, metrics: ScrollMetrics) -> Option<Self> {
        if metrics.near_bottom() {
            self.load_more()
        } else {
            None
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
