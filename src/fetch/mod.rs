// src/fetch/mod.rs
// =============================================================================
// This module holds everything that talks to the network.
//
// Submodules:
// - http: The shared client and a single GET
// - page: Fetch a seed page and extract its links
// - pipeline: Fetch many scripts concurrently and scan them
// =============================================================================

mod http;
mod page;
mod pipeline;

pub use http::build_client;
pub use page::extract_from_page;
pub use pipeline::{fetch_scripts, DEFAULT_CONCURRENCY};
