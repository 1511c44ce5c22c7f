// src/finder.rs
// =============================================================================
// This module drives a whole run, seed by seed.
//
// What happens for each seed (strictly one after another):
// 1. Make sure the seed has a scheme ("example.com" -> "https://example.com")
// 2. Fetch the seed page and extract its links (fetch::extract_from_page)
// 3. Fetch every discovered resource concurrently and scan the bodies
//    (fetch::fetch_scripts)
// 4. Append everything to the Accumulator
// 5. If a scope is active, drop out-of-scope entries
//
// After the last seed the Accumulator is finalized: quotes stripped, noise
// dropped, optionally only complete http(s) URLs kept, duplicates removed.
//
// A seed that can't be fetched doesn't stop the run. It's recorded as a
// Failure and the next seed is processed.
//
// Rust concepts:
// - Ownership: The Accumulator is owned by run() and lent (&mut) to each step
// - Result<T, E>: process_seed() returns the seed's own failure as Err
// =============================================================================

use reqwest::Client;
use serde::Serialize;
use std::mem;
use tracing::{info, warn};
use url::Url;

use crate::error::FetchError;
use crate::extract::{dedup, strip_quotes, PageLinks, MIN_LINK_LEN};
use crate::fetch::{extract_from_page, fetch_scripts};
use crate::scope::{ScopeArg, ScopeSet};
use crate::seeds::normalize_seed;

/// Which step of the run a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// The seed page itself couldn't be fetched (the seed was skipped)
    SeedPage,
    /// One resource referenced by a seed page couldn't be fetched
    Script,
}

/// One thing that went wrong during a run
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub url: String,
    pub stage: FailureStage,
    /// Short machine-friendly label (see FetchError::kind)
    pub kind: String,
    pub message: String,
}

impl Failure {
    fn new(url: impl Into<String>, stage: FailureStage, error: &FetchError) -> Self {
        Self {
            url: url.into(),
            stage,
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// The final URL list, in first-seen order
    pub urls: Vec<String>,
    pub failures: Vec<Failure>,
}

impl RunReport {
    /// Number of seeds that were skipped because their page failed
    pub fn skipped_seeds(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.stage == FailureStage::SeedPage)
            .count()
    }
}

/// The growing list of every string found during one run
///
/// Only the coordinating task appends to it, between pipeline runs, so it's a
/// plain Vec with no locking.
#[derive(Debug, Default)]
pub struct Accumulator {
    entries: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.entries.extend(items);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops every entry that doesn't contain a scope token
    pub fn retain_in_scope(&mut self, scope: &ScopeSet) {
        let entries = mem::take(&mut self.entries);
        self.entries = scope.filter(entries);
    }

    // Produces the final output list
    //
    // Steps:
    // - strip stray quote characters
    // - drop anything shorter than MIN_LINK_LEN
    // - if complete_only, keep only http:// and https:// URLs
    // - remove duplicates, keeping first-seen order
    pub fn finalize(self, complete_only: bool) -> Vec<String> {
        let cleaned = self
            .entries
            .iter()
            .map(|entry| strip_quotes(entry))
            .filter(|entry| entry.len() >= MIN_LINK_LEN)
            .filter(|entry| !complete_only || is_complete_url(entry));

        dedup(cleaned)
    }
}

fn is_complete_url(entry: &str) -> bool {
    entry.starts_with("http://") || entry.starts_with("https://")
}

/// Settings for a run
#[derive(Debug, Clone)]
pub struct FinderOptions {
    /// Maximum in-flight requests per seed
    pub concurrency: usize,
    pub scope: Option<ScopeArg>,
    /// Only keep absolute http(s) URLs in the output
    pub complete_only: bool,
}

pub struct Finder {
    client: Client,
    options: FinderOptions,
}

impl Finder {
    pub fn new(client: Client, options: FinderOptions) -> Self {
        Self { client, options }
    }

    // Runs the whole pipeline over every seed
    //
    // Parameters:
    //   seeds: raw seeds as given by the user, in order
    //
    // Returns: RunReport with the final URLs and every failure
    pub async fn run(&self, seeds: &[String]) -> RunReport {
        let seeds: Vec<String> = seeds.iter().map(|seed| normalize_seed(seed)).collect();
        let scope = self.resolve_scope(&seeds);

        let mut accumulator = Accumulator::new();
        let mut failures = Vec::new();

        for seed in &seeds {
            match self.process_seed(seed, &mut accumulator).await {
                Ok(script_failures) => failures.extend(script_failures),
                Err(seed_failure) => failures.push(seed_failure),
            }

            if let Some(scope) = &scope {
                accumulator.retain_in_scope(scope);
            }
        }

        info!(entries = accumulator.len(), "finalizing results");

        RunReport {
            urls: accumulator.finalize(self.options.complete_only),
            failures,
        }
    }

    // Turns the -s argument into a ScopeSet
    //
    // An empty set (for example "-s all" with only single-label hosts) means
    // no filtering at all.
    fn resolve_scope(&self, seeds: &[String]) -> Option<ScopeSet> {
        let arg = self.options.scope.as_ref()?;
        let scope = ScopeSet::resolve(arg, seeds);

        if scope.is_empty() {
            warn!("scope {:?} produced no tokens, results will not be filtered", arg);
            None
        } else {
            info!(tokens = %scope, "scope active");
            Some(scope)
        }
    }

    // Processes one seed, appending everything it finds to `accumulator`
    //
    // Returns:
    //   Ok(failures) with any per-script failures
    //   Err(failure) if the seed page itself couldn't be fetched
    async fn process_seed(
        &self,
        seed: &str,
        accumulator: &mut Accumulator,
    ) -> Result<Vec<Failure>, Failure> {
        let page = Url::parse(seed).map_err(|e| seed_failure(seed, &FetchError::from(e)))?;

        info!(seed = %page, "processing seed");

        let PageLinks {
            urls,
            inline_matches,
        } = extract_from_page(&self.client, &page)
            .await
            .map_err(|e| seed_failure(seed, &e))?;

        accumulator.extend(urls.iter().cloned());
        accumulator.extend(inline_matches);

        let report = fetch_scripts(&self.client, urls, self.options.concurrency).await;

        info!(
            seed = %page,
            fetched = report.fetched,
            failed = report.failures.len(),
            matches = report.matches.len(),
            "fetched page resources"
        );

        accumulator.extend(report.matches);

        Ok(report
            .failures
            .iter()
            .map(|f| Failure::new(f.url.as_str(), FailureStage::Script, &f.error))
            .collect())
    }
}

fn seed_failure(seed: &str, error: &FetchError) -> Failure {
    warn!(seed, kind = error.kind(), "skipping seed: {}", error);
    Failure::new(seed, FailureStage::SeedPage, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{build_client, DEFAULT_CONCURRENCY};
    use std::time::Duration;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn finder(scope: Option<ScopeArg>, complete_only: bool) -> Finder {
        let client = build_client(Some(Duration::from_secs(5))).unwrap();
        Finder::new(
            client,
            FinderOptions {
                concurrency: DEFAULT_CONCURRENCY,
                scope,
                complete_only,
            },
        )
    }

    #[test]
    fn test_complete_only_keeps_absolute_urls() {
        let mut accumulator = Accumulator::new();
        accumulator.extend(strings(&["/relative/path", "https://x.com/y"]));
        assert_eq!(accumulator.finalize(true), strings(&["https://x.com/y"]));
    }

    #[test]
    fn test_finalize_without_complete_keeps_everything() {
        let mut accumulator = Accumulator::new();
        accumulator.extend(strings(&["/relative/path", "https://x.com/y"]));
        assert_eq!(
            accumulator.finalize(false),
            strings(&["/relative/path", "https://x.com/y"])
        );
    }

    #[test]
    fn test_finalize_strips_quotes_and_dedups() {
        let mut accumulator = Accumulator::new();
        accumulator.extend(strings(&[
            "\"/api/users\"",
            "'/api/users'",
            "\"/a\"",
            "\"https://x.com/y\"",
            "/api/users",
        ]));
        assert_eq!(
            accumulator.finalize(false),
            strings(&["/api/users", "https://x.com/y"])
        );
    }

    #[test]
    fn test_finalize_empty() {
        assert!(Accumulator::new().finalize(true).is_empty());
    }

    #[test]
    fn test_retain_in_scope() {
        let mut accumulator = Accumulator::new();
        accumulator.extend(strings(&[
            "https://api.example.com/v1",
            "https://other.net/x",
            "https://example-fake.org",
        ]));
        accumulator.retain_in_scope(&ScopeSet::from_token("example"));
        assert_eq!(
            accumulator.finalize(false),
            strings(&["https://api.example.com/v1", "https://example-fake.org"])
        );
    }

    #[test]
    fn test_skipped_seeds_counts_only_seed_failures() {
        let error = FetchError::from(url::ParseError::EmptyHost);
        let report = RunReport {
            urls: Vec::new(),
            failures: vec![
                Failure::new("a", FailureStage::SeedPage, &error),
                Failure::new("b", FailureStage::Script, &error),
            ],
        };
        assert_eq!(report.skipped_seeds(), 1);
    }

    #[tokio::test]
    async fn test_end_to_end_single_seed() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_body(r#"<html><head><script src="/app.js"></script></head></html>"#)
            .create_async()
            .await;
        let _script = server
            .mock("GET", "/app.js")
            .with_body(r#"fetch("https://api.example.com/v1/data").then(r => r.json())"#)
            .create_async()
            .await;

        let report = finder(None, false).run(&[server.url()]).await;

        assert_eq!(
            report.urls,
            vec![
                format!("{}/app.js", server.url()),
                "https://api.example.com/v1/data".to_string(),
            ]
        );
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_failed_seed_is_skipped() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_body(r#"<script>var u = "/lib/core.js";</script>"#)
            .create_async()
            .await;
        let _lib = server
            .mock("GET", "/lib/core.js")
            .with_body("")
            .create_async()
            .await;

        // Nothing listens on port 1, so the first seed fails
        let seeds = vec!["http://127.0.0.1:1".to_string(), server.url()];
        let report = finder(None, false).run(&seeds).await;

        assert_eq!(report.skipped_seeds(), 1);
        assert_eq!(report.failures[0].url, "http://127.0.0.1:1");
        assert_eq!(
            report.urls,
            vec![format!("{}/lib/core.js", server.url()), "/lib/core.js".to_string()]
        );
    }

    #[tokio::test]
    async fn test_scope_filters_results() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_body(r#"<script src="/app.js"></script>"#)
            .create_async()
            .await;
        let _script = server
            .mock("GET", "/app.js")
            .with_body(r#"a("https://api.example.com/v1"); b('https://tracker.other.net/p');"#)
            .create_async()
            .await;

        let scope = Some(ScopeArg::Token("example".to_string()));
        let report = finder(scope, false).run(&[server.url()]).await;

        assert_eq!(report.urls, vec!["https://api.example.com/v1"]);
    }

    #[tokio::test]
    async fn test_scope_all_without_tokens_keeps_everything() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_body(r#"<script src="/app.js"></script>"#)
            .create_async()
            .await;
        let _script = server
            .mock("GET", "/app.js")
            .with_body(r#"b("https://api.other.net/v1");"#)
            .create_async()
            .await;

        // "localhost" has a single label, so "all" derives no tokens
        let seed = server.url().replace("127.0.0.1", "localhost");
        let report = finder(Some(ScopeArg::All), false).run(&[seed.clone()]).await;

        assert_eq!(
            report.urls,
            vec![format!("{}/app.js", seed), "https://api.other.net/v1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_scope_all_derives_token_from_seed_host() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_body(r#"<script src="/app.js"></script>"#)
            .create_async()
            .await;
        let _script = server
            .mock("GET", "/app.js")
            .with_body(r#"a("https://cdn.acme.io/x.js"); b("https://api.other.net/v1");"#)
            .create_async()
            .await;

        let address = server.socket_address();
        let client = reqwest::Client::builder()
            .resolve("shop.acme.test", address)
            .build()
            .unwrap();
        let finder = Finder::new(
            client,
            FinderOptions {
                concurrency: DEFAULT_CONCURRENCY,
                scope: Some(ScopeArg::All),
                complete_only: false,
            },
        );

        let seed = format!("http://shop.acme.test:{}", address.port());
        let report = finder.run(&[seed.clone()]).await;

        assert!(report.failures.is_empty());
        assert_eq!(
            report.urls,
            vec![format!("{}/app.js", seed), "https://cdn.acme.io/x.js".to_string()]
        );
    }

    #[tokio::test]
    async fn test_script_failures_are_reported() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_body(r#"<script src="http://127.0.0.1:1/gone.js"></script>"#)
            .create_async()
            .await;

        let report = finder(None, false).run(&[server.url()]).await;

        assert_eq!(report.skipped_seeds(), 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::Script);
        assert_eq!(report.urls, vec!["http://127.0.0.1:1/gone.js"]);
    }
}
