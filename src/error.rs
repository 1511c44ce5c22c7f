// src/error.rs
// =============================================================================
// Typed errors for a single HTTP fetch.
//
// The rest of the app uses anyhow::Result, which is great when an error only
// needs to be printed. Fetch failures are different: they are collected,
// counted, and reported per URL at the end of a run, so they get a real type.
// =============================================================================

use thiserror::Error;

/// Why one page or script could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// The string we were asked to fetch isn't a URL at all
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connecting, sending, or receiving the response headers failed
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response started but the body couldn't be read
    #[error("could not read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// Short label for logs and the JSON report
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl(_) => "invalid_url",
            FetchError::Request(e) | FetchError::Body(e) if e.is_timeout() => "timeout",
            FetchError::Request(_) => "request",
            FetchError::Body(_) => "body",
        }
    }
}
