//! Chunked post-processing of freshly fetched records.
//!
//! Records are handled in fixed-size batches with a yield to the scheduler
//! after each one, so a single-threaded runtime stays responsive on large
//! inputs. Progress runs from 50 to 100 across the chunks; the first half is
//! reserved for the fetch.

use storedir_core::{LoadingState, Store};

/// Records handled between yield points.
pub const CHUNK_SIZE: usize = 1000;

/// Retain predicate that keeps every record.
#[must_use]
pub fn keep_all(_: &Store) -> bool {
    true
}

/// Retain predicate that drops a brand: any record whose display name or
/// legal name contains `brand`, compared uppercase.
#[must_use]
pub fn exclude_brand(brand: &str) -> impl Fn(&Store) -> bool + Send + Sync {
    let needle = brand.to_uppercase();
    move |store: &Store| {
        !store.display_name().to_uppercase().contains(&needle)
            && !store.legal_name.to_uppercase().contains(&needle)
    }
}

/// Drop malformed and excluded records and assign missing ids.
///
/// A record is malformed when its legal name is blank. Records without an
/// id receive `comercio-{n}`, where `n` counts assigned ids from 1.
pub async fn process_in_chunks<R, P>(
    data: Vec<Store>,
    chunk_size: usize,
    retain: R,
    mut on_progress: P,
) -> Vec<Store>
where
    R: Fn(&Store) -> bool,
    P: FnMut(LoadingState),
{
    let chunk_size = chunk_size.max(1);
    let total = data.len();
    let chunk_count = total.div_ceil(chunk_size);
    let mut processed = Vec::with_capacity(total);
    let mut assigned_ids = 0_usize;
    let mut dropped = 0_usize;
    let mut records = data.into_iter();

    for chunk_index in 0..chunk_count {
        for store in records.by_ref().take(chunk_size) {
            if store.legal_name.trim().is_empty() {
                dropped += 1;
                continue;
            }
            if !retain(&store) {
                continue;
            }
            let id = match store.id.as_deref() {
                Some(id) if !id.is_empty() => id.to_owned(),
                _ => {
                    assigned_ids += 1;
                    format!("comercio-{assigned_ids}")
                }
            };
            processed.push(Store {
                id: Some(id),
                ..store
            });
        }

        let progress = 50 + 50 * (chunk_index + 1) / chunk_count;
        on_progress(LoadingState::in_progress(
            u8::try_from(progress).unwrap_or(100),
            format!("Processing {} of {total} stores...", processed.len()),
        ));
        tracing::debug!(
            chunk = chunk_index + 1,
            chunks = chunk_count,
            kept = processed.len(),
            "processed record chunk"
        );

        tokio::task::yield_now().await;
    }

    if dropped > 0 {
        tracing::debug!(dropped, "dropped records without a legal name");
    }

    processed
}
