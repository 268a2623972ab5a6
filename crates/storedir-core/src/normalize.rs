//! Text and postal-code canonicalization.
//!
//! Two case conventions coexist on purpose: stored values are uppercased
//! ([`normalize_text`]) while search comparisons run on lowercase
//! ([`normalize_for_search`]). Both strip diacritics the same way, so a
//! change to one must be mirrored in the other.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Width of a normalized postal code.
pub const POSTAL_CODE_LEN: usize = 5;

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Decompose, drop combining diacritics, and collapse whitespace runs.
fn fold(input: &str) -> String {
    let stripped: String = input.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical storage form: no accents, uppercase, trimmed, single-spaced.
///
/// Empty input yields an empty string. The function is idempotent.
#[must_use]
pub fn normalize_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    // Case mapping runs first: some uppercase mappings emit combining marks
    // that must be stripped in the same pass to keep the result idempotent.
    fold(&input.to_uppercase())
}

/// Search comparison form: like [`normalize_text`] but lowercase.
#[must_use]
pub fn normalize_for_search(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    fold(&input.to_lowercase())
}

/// Keep ASCII digits only, truncate to five, then left-pad with `0`.
///
/// Truncation happens before padding, so `"1234567"` becomes `"12345"` and a
/// stray leading prefix silently shifts the code. Non-empty input without any
/// digit yields `"00000"`.
#[must_use]
pub fn normalize_postal_code(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(POSTAL_CODE_LEN)
        .collect();
    format!("{digits:0>width$}", width = POSTAL_CODE_LEN)
}

/// Sort key approximating a locale-aware comparison.
///
/// Orders primarily by the accent- and case-folded text, falling back to
/// the raw text so the order stays total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    folded: String,
    raw: String,
}

impl CollationKey {
    /// Compare on the folded text only, ignoring accent and case ties.
    #[must_use]
    pub fn base_cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

#[must_use]
pub fn collation_key(input: &str) -> CollationKey {
    CollationKey {
        folded: normalize_for_search(input),
        raw: input.to_owned(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
