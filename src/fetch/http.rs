// src/fetch/http.rs
// =============================================================================
// This module downloads pages and scripts over HTTP.
//
// Key functionality:
// - Builds one shared reqwest Client (connection pooling, redirects, timeout)
// - Fetches a URL with GET and returns the whole body as text
//
// Unlike a link checker we don't care much about the status code: a 404 page
// or a 500 error page can still reference scripts and endpoints, so any body
// we get back is worth scanning.
//
// Rust concepts:
// - async/await: For network I/O
// - map_err: Convert one error type into another
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Sent with every request so server logs can tell who we are
const USER_AGENT: &str = concat!("linkfinder/", env!("CARGO_PKG_VERSION"));

// Creates the HTTP client used for the whole run
//
// Parameters:
//   timeout: per-request timeout, or None to wait forever
//
// We reuse this client for all requests (connection pooling). Cloning it is
// cheap, it's just a reference counter internally.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5)); // Follow up to 5 redirects

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().context("Failed to create HTTP client")
}

// Fetches a URL and returns its body as a String
//
// Parameters:
//   client: shared HTTP client (borrowed)
//   url: the URL to fetch
//
// Returns: the body text, or a FetchError saying which step failed
pub async fn fetch_body(client: &Client, url: &str) -> Result<String, FetchError> {
    let parsed = Url::parse(url)?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(FetchError::Request)?;

    debug!(url, status = response.status().as_u16(), "response received");

    response.text().await.map_err(FetchError::Body)
}
