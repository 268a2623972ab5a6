//! Values derived from the full record set: dropdown options and the
//! featured "top" subset.

use std::collections::BTreeSet;

use crate::store::Store;

/// Default cap for [`top_stores`].
pub const TOP_LIMIT: usize = 10;

/// Sorted distinct non-empty regions.
#[must_use]
pub fn regions(stores: &[Store]) -> Vec<String> {
    distinct(stores.iter().map(|s| s.region.as_str()))
}

/// Sorted distinct non-empty municipalities.
#[must_use]
pub fn municipalities(stores: &[Store]) -> Vec<String> {
    distinct(stores.iter().map(|s| s.municipality.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Featured stores in load order, at most `limit` of them.
#[must_use]
pub fn top_stores(stores: &[Store], limit: usize) -> Vec<&Store> {
    stores.iter().filter(|s| s.is_featured).take(limit).collect()
}
