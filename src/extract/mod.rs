// src/extract/mod.rs
// =============================================================================
// This module contains all the pure (no network) extraction logic.
//
// Submodules:
// - pattern: Finds quoted URLs/paths in raw HTML or JavaScript text
// - normalize: Turns raw strings into absolute URLs
// - dedup: Order-preserving duplicate removal
// - html: Collects links from one parsed HTML page
//
// Nothing in here touches the network or shared state, so everything can be
// tested with plain strings.
// =============================================================================

mod dedup;
mod html;
mod normalize;
mod pattern;

pub use dedup::dedup;
pub use html::{extract_page_links, PageLinks};
pub use normalize::{normalize_all, strip_quotes, SourceKind, MIN_LINK_LEN};
pub use pattern::find_matches;
