use std::collections::HashSet;

use storedir_core::normalize::{collation_key, CollationKey};
use storedir_core::Store;

/// Identity of a converted record: legal name, postal code, address.
#[must_use]
pub fn dedup_key(store: &Store) -> String {
    format!(
        "{}|{}|{}",
        store.legal_name, store.postal_code, store.address_line
    )
}

/// Keep the first record for each [`dedup_key`], preserving input order.
#[must_use]
pub fn dedup(records: Vec<Store>) -> Vec<Store> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|store| seen.insert(dedup_key(store)))
        .collect()
}

/// Stable sort by legal name, ignoring case and accents.
pub fn sort_by_legal_name(records: &mut Vec<Store>) {
    let mut keyed: Vec<(CollationKey, Store)> = records
        .drain(..)
        .map(|store| (collation_key(&store.legal_name), store))
        .collect();
    keyed.sort_by(|a, b| a.0.base_cmp(&b.0));
    records.extend(keyed.into_iter().map(|(_, store)| store));
}

/// Distinct legal names in first-seen order.
#[must_use]
pub fn unique_legal_names(records: &[Store]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|store| store.legal_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}
