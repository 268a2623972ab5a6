//! Catalog query engine: filter, search, sort, then paginate.
//!
//! Every call recomputes from the full record set; nothing is cached between
//! calls and the input slice is never modified.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::normalize::{collation_key, normalize_for_search};
use crate::store::Store;

/// Records revealed per page.
pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Featured stores first, then by display name.
    #[default]
    FeaturedFirst,
    /// By display name only.
    Alphabetical,
    /// By region, plain string order, stable on ties.
    ByRegion,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::FeaturedFirst => write!(f, "featured-first"),
            SortMode::Alphabetical => write!(f, "alphabetical"),
            SortMode::ByRegion => write!(f, "by-region"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured-first" | "top" => Ok(SortMode::FeaturedFirst),
            "alphabetical" | "az" => Ok(SortMode::Alphabetical),
            "by-region" | "region" => Ok(SortMode::ByRegion),
            other => Err(format!(
                "unknown sort mode '{other}'; expected featured-first, alphabetical, or by-region"
            )),
        }
    }
}

/// The user's current query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free text; empty disables the search stage.
    pub query: String,
    /// Exact region match.
    pub region: Option<String>,
    /// Case-insensitive substring match on municipality.
    pub municipality: Option<String>,
    pub sort: SortMode,
    /// Search address fields instead of identity fields.
    pub include_address_fields: bool,
    /// Substring matching instead of whole-word matching.
    pub flexible_match: bool,
}

/// One page of query output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage<'a> {
    /// Every record up to the end of the requested page, in sorted order.
    pub visible: Vec<&'a Store>,
    pub has_more: bool,
    /// Number of records that passed filtering, before pagination.
    pub total: usize,
}

/// Run the query with the default [`PAGE_SIZE`].
#[must_use]
pub fn query<'a>(records: &'a [Store], filter: &FilterState, page: usize) -> QueryPage<'a> {
    query_with_page_size(records, filter, page, PAGE_SIZE)
}

/// Run the query with an explicit page size.
///
/// `page` is zero-based; the result holds the prefix of the sorted,
/// filtered list through the end of that page.
#[must_use]
pub fn query_with_page_size<'a>(
    records: &'a [Store],
    filter: &FilterState,
    page: usize,
    page_size: usize,
) -> QueryPage<'a> {
    let mut filtered: Vec<&Store> = records.iter().collect();

    if let Some(region) = filter.region.as_deref().filter(|r| !r.is_empty()) {
        filtered.retain(|s| s.region == region);
    }

    // Plain lowercase here, not the diacritic-stripping normalizer used by
    // the text search: "Querétaro" does not match a "queretaro" filter.
    if let Some(municipality) = filter.municipality.as_deref().filter(|m| !m.is_empty()) {
        let needle = municipality.to_lowercase();
        filtered.retain(|s| s.municipality.to_lowercase().contains(&needle));
    }

    if !filter.query.is_empty() {
        let matcher = TextMatcher::new(&filter.query, filter.flexible_match);
        filtered.retain(|s| {
            let text = if filter.include_address_fields {
                join_present(&s.address_fields())
            } else {
                join_present(&s.identity_fields())
            };
            matcher.matches(&text)
        });
    }

    sort_stores(&mut filtered, filter.sort);

    let total = filtered.len();
    let end = page.saturating_add(1).saturating_mul(page_size);
    filtered.truncate(end);

    QueryPage {
        visible: filtered,
        has_more: total > end,
        total,
    }
}

fn join_present(fields: &[&str]) -> String {
    fields
        .iter()
        .filter(|f| !f.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pre-normalized query, built once per call.
enum TextMatcher {
    Substring(String),
    AllWords(Vec<String>),
}

impl TextMatcher {
    fn new(query: &str, flexible: bool) -> Self {
        let normalized = normalize_for_search(query);
        if flexible {
            TextMatcher::Substring(normalized)
        } else {
            TextMatcher::AllWords(normalized.split_whitespace().map(str::to_owned).collect())
        }
    }

    fn matches(&self, text: &str) -> bool {
        let text = normalize_for_search(text);
        match self {
            TextMatcher::Substring(needle) => text.contains(needle.as_str()),
            TextMatcher::AllWords(words) => {
                let tokens: Vec<&str> = text.split_whitespace().collect();
                words.iter().all(|w| tokens.contains(&w.as_str()))
            }
        }
    }
}

fn sort_stores(stores: &mut [&Store], mode: SortMode) {
    match mode {
        SortMode::FeaturedFirst => {
            stores.sort_by_cached_key(|s| (!s.is_featured, collation_key(s.display_name())));
        }
        SortMode::Alphabetical => {
            stores.sort_by_cached_key(|s| collation_key(s.display_name()));
        }
        SortMode::ByRegion => stores.sort_by(|a, b| a.region.cmp(&b.region)),
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
