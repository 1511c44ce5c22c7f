// src/fetch/pipeline.rs
// =============================================================================
// This module downloads many scripts at once and scans each body for links.
//
// How it works:
// 1. Turn the URL list into a stream of fetch futures
// 2. Run at most `concurrency` of them at the same time (buffer_unordered)
// 3. As each one finishes, scan its body with the pattern matcher
// 4. Collect matches and failures into one ScriptReport
//
// Workers never write to shared state. Each fetch future only returns its
// result, and the single loop at the bottom of fetch_all() is the only code
// that touches the report, so no Mutex is needed.
//
// Rust concepts:
// - Generics with trait bounds: fetch_all() accepts any async fetch function
// - Streams: For processing many items concurrently
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::future::Future;
use tracing::{debug, warn};

use super::http::fetch_body;
use crate::error::FetchError;
use crate::extract::find_matches;

/// Default number of in-flight requests
pub const DEFAULT_CONCURRENCY: usize = 10;

/// A script we couldn't download
#[derive(Debug)]
pub struct ScriptFailure {
    pub url: String,
    pub error: FetchError,
}

/// The outcome of one pipeline run
#[derive(Debug, Default)]
pub struct ScriptReport {
    /// Raw pattern matches from every fetched body, in completion order
    pub matches: Vec<String>,
    /// How many bodies were fetched and scanned
    pub fetched: usize,
    /// Scripts that failed, with the reason
    pub failures: Vec<ScriptFailure>,
}

// Fetches every URL with the shared client and scans the bodies
//
// Parameters:
//   client: shared HTTP client
//   urls: resources to download (owned, we consume the list)
//   concurrency: maximum number of requests in flight
//
// Blocks (asynchronously) until every request has finished, one way or the
// other.
pub async fn fetch_scripts(
    client: &Client,
    urls: Vec<String>,
    concurrency: usize,
) -> ScriptReport {
    fetch_all(urls, concurrency, |url| {
        let client = client.clone(); // Clone the client for each task
        async move { fetch_body(&client, &url).await }
    })
    .await
}

// The pipeline itself, generic over how a body is fetched
//
// `fetch` is called once per URL. Its futures are polled with at most
// `concurrency` running at once; a concurrency of 0 is treated as 1.
pub async fn fetch_all<F, Fut>(urls: Vec<String>, concurrency: usize, fetch: F) -> ScriptReport
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, FetchError>>,
{
    let mut report = ScriptReport::default();

    let mut bodies = stream::iter(urls)
        .map(|url| {
            let request = fetch(url.clone());
            async move { (url, request.await) }
        })
        .buffer_unordered(concurrency.max(1));

    while let Some((url, outcome)) = bodies.next().await {
        match outcome {
            Ok(body) => {
                let found = find_matches(&body);
                debug!(url = %url, matches = found.len(), "scanned script");
                report.matches.extend(found);
                report.fetched += 1;
            }
            Err(error) => {
                warn!(url = %url, kind = error.kind(), "skipping script: {}", error);
                report.failures.push(ScriptFailure { url, error });
            }
        }
    }

    report
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is buffer_unordered?
//    - It takes a stream of futures and runs up to N of them at once
//    - Results come out in the order they FINISH, not the order they started
//    - So matches from different scripts can appear in any order
//
// 2. Why is fetch a generic F instead of always using reqwest?
//    - fetch_scripts() plugs in the real HTTP client
//    - Tests plug in a fake that counts how many calls run at the same time
//
// 3. Why don't we need a Mutex?
//    - The futures inside the stream only RETURN data
//    - The `while let` loop runs on one task and is the only writer
//    - Rust would refuse to compile a shared &mut across tasks anyway
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_never_exceeds_concurrency_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let urls: Vec<String> = (0..25).map(|i| format!("https://example.com/{}.js", i)).collect();

        let report = fetch_all(urls, 4, |url| {
            let in_flight = in_flight.clone();
            let max_seen = max_seen.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(format!("load(\"{}\")", url))
            }
        })
        .await;

        assert!(max_seen.load(Ordering::SeqCst) <= 4);
        assert_eq!(report.fetched, 25);
        assert_eq!(report.matches.len(), 25);
        for i in 0..25 {
            let expected = format!("\"https://example.com/{}.js\"", i);
            assert!(report.matches.contains(&expected), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let urls = vec![
            "https://ok.example.com/a.js".to_string(),
            "broken".to_string(),
            "https://ok.example.com/b.js".to_string(),
        ];

        let report = fetch_all(urls, 2, |url| async move {
            if url == "broken" {
                Err(FetchError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase))
            } else {
                Ok("fetch('/api/items')".to_string())
            }
        })
        .await;

        assert_eq!(report.fetched, 2);
        assert_eq!(report.matches, vec!["'/api/items'", "'/api/items'"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].url, "broken");
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let urls = vec!["https://example.com/x.js".to_string()];
        let report = fetch_all(urls, 0, |_| async { Ok(String::new()) }).await;
        assert_eq!(report.fetched, 1);
    }

    #[tokio::test]
    async fn test_empty_url_list() {
        let report = fetch_all(Vec::new(), DEFAULT_CONCURRENCY, |_| async {
            Ok(String::new())
        })
        .await;
        assert_eq!(report.fetched, 0);
        assert!(report.matches.is_empty());
    }

    #[tokio::test]
    async fn test_timed_out_script_does_not_stop_batch() {
        let mut server = mockito::Server::new_async().await;
        let _fast = server
            .mock("GET", "/fast.js")
            .with_body(r#"get("/api/fast")"#)
            .create_async()
            .await;
        let _slow = server
            .mock("GET", "/slow.js")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(1500));
                w.write_all(br#"get("/api/slow")"#)
            })
            .create_async()
            .await;

        let client = crate::fetch::build_client(Some(Duration::from_millis(200))).unwrap();
        let urls = vec![
            format!("{}/slow.js", server.url()),
            format!("{}/fast.js", server.url()),
        ];
        let report = fetch_scripts(&client, urls, 1).await;

        assert_eq!(report.fetched, 1);
        assert_eq!(report.matches, vec!["\"/api/fast\""]);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].url.ends_with("/slow.js"));
        assert_eq!(report.failures[0].error.kind(), "timeout");
    }

    #[tokio::test]
    async fn test_fetch_scripts_against_server() {
        let mut server = mockito::Server::new_async().await;
        let _a = server
            .mock("GET", "/a.js")
            .with_body(r#"fetch("https://api.example.com/v1/data")"#)
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/b.js")
            .with_body(r#"import x from "lib/util.js""#)
            .create_async()
            .await;

        let client = crate::fetch::build_client(Some(Duration::from_secs(5))).unwrap();
        let urls = vec![
            format!("{}/a.js", server.url()),
            format!("{}/b.js", server.url()),
        ];
        let report = fetch_scripts(&client, urls, DEFAULT_CONCURRENCY).await;

        assert_eq!(report.fetched, 2);
        assert!(report.failures.is_empty());
        assert!(report
            .matches
            .contains(&"\"https://api.example.com/v1/data\"".to_string()));
        assert!(report.matches.contains(&"\"lib/util.js\"".to_string()));
    }
}
