// src/extract/dedup.rs
// =============================================================================
// Order-preserving deduplication.
//
// Collecting into a HashSet and back loses the original order. We need
// first-seen order because that's the order the final URL list is printed
// in, so we walk the input once and remember what we've already emitted.
// =============================================================================

use std::collections::HashSet;

// Removes exact duplicates, keeping the first occurrence of each string
//
// No normalization happens here: "https://a.com" and "https://a.com/" are
// different strings and both survive.
//
// Example:
//   ["b", "a", "b", "c", "a"] -> ["b", "a", "c"]
pub fn dedup<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
