// src/fetch/page.rs
// =============================================================================
// This module handles the first hop of every seed: the seed page itself.
//
// How it works:
// 1. GET the seed URL
// 2. Parse the HTML and collect every referenced resource (extract::html)
// 3. Hand the result back to the caller, who fetches the scripts next
//
// There is no crawling past this page. Links found here are fetched once by
// the pipeline and never followed further.
// =============================================================================

use reqwest::Client;
use tracing::info;
use url::Url;

use super::http::fetch_body;
use crate::error::FetchError;
use crate::extract::{extract_page_links, PageLinks};

// Fetches a seed page and extracts its links
//
// Parameters:
//   client: shared HTTP client
//   page: the seed URL (already has a scheme)
//
// Returns: PageLinks, or the FetchError that stopped us from reading the page
pub async fn extract_from_page(client: &Client, page: &Url) -> Result<PageLinks, FetchError> {
    let html = fetch_body(client, page.as_str()).await?;
    let links = extract_page_links(&html, page);

    info!(
        page = %page,
        urls = links.urls.len(),
        inline_matches = links.inline_matches.len(),
        "extracted page links"
    );

    Ok(links)
}
