//! Timer-based input coalescing.
//!
//! Each [`Debouncer::push`] replaces the pending value and restarts the
//! quiet interval. Only the value still pending once the interval elapses is
//! released; superseded values are dropped, never applied. Time is passed in
//! by the caller so the policy stays deterministic.

use std::time::{Duration, Instant};

/// Default quiet interval for free-text search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default quiet interval for scroll-position sampling.
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Instant)>,
    last_emitted: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            last_emitted: None,
        }
    }

    /// Record a new input event observed at `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.interval));
    }

    /// When the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Release the pending value if its quiet interval has elapsed.
    ///
    /// A value equal to the previously released one is swallowed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, due)) if now >= due => {
                if self.last_emitted.as_ref() == Some(&value) {
                    return None;
                }
                self.last_emitted = Some(value.clone());
                Some(value)
            }
            other => {
                self.pending = other;
                None
            }
        }
    }
}
