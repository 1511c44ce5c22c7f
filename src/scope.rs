// src/scope.rs
// =============================================================================
// This module decides which discovered URLs are "in scope".
//
// A scope is a set of tokens, usually the organization part of a domain
// ("example" for sub.example.com). A URL is in scope when it CONTAINS any
// token anywhere in the string:
//
//   token "example" keeps https://sub.example.com/x
//   token "example" also keeps https://example-fake.org
//   token "example" also keeps https://cdn.net/example/logo.png
//
// That's a plain substring test, not a host comparison.
//
// Scopes come from the command line in one of two ways:
//   -s example   use this token
//   -s all       derive one token from every seed's domain
//
// Rust concepts:
// - FromStr: Lets clap parse "-s all" straight into our enum
// - BTreeSet: A sorted set, so debug output is stable
// =============================================================================

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// What the user passed to -s/--scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeArg {
    /// `-s all`: derive tokens from the seeds
    All,
    /// `-s <token>`: use this token
    Token(String),
}

impl FromStr for ScopeArg {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(ScopeArg::All)
        } else {
            Ok(ScopeArg::Token(s.to_string()))
        }
    }
}

/// The set of lowercase tokens a URL must contain one of
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet {
    tokens: BTreeSet<String>,
}

impl ScopeSet {
    // Builds the set for a scope argument
    //
    // Parameters:
    //   arg: what the user passed to -s
    //   seeds: the seed URLs (already normalized to have a scheme)
    pub fn resolve(arg: &ScopeArg, seeds: &[String]) -> Self {
        match arg {
            ScopeArg::All => Self::derive_from_seeds(seeds),
            ScopeArg::Token(token) => Self::from_token(token),
        }
    }

    /// A scope with a single explicit token
    pub fn from_token(token: &str) -> Self {
        let mut tokens = BTreeSet::new();
        let token = token.trim().to_lowercase();
        if !token.is_empty() {
            tokens.insert(token);
        }
        Self { tokens }
    }

    // Derives one token per seed: the second-to-last label of its host
    //
    // Examples:
    //   https://sub.example.com -> "example"
    //   https://example.co.uk   -> "co"  (no public-suffix list, by contract)
    //   https://localhost       -> nothing (only one label)
    //   "not a url"             -> nothing (skipped silently)
    pub fn derive_from_seeds(seeds: &[String]) -> Self {
        let tokens = seeds
            .iter()
            .filter_map(|seed| Url::parse(seed).ok())
            .filter_map(|url| {
                let host = url.host_str()?;
                let labels: Vec<&str> = host.split('.').collect();
                if labels.len() > 1 {
                    Some(labels[labels.len() - 2].to_lowercase())
                } else {
                    None
                }
            })
            .filter(|token| !token.is_empty())
            .collect();

        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// True if `url` contains any token as a substring
    pub fn contains(&self, url: &str) -> bool {
        self.tokens.iter().any(|token| url.contains(token.as_str()))
    }

    /// Keeps only the in-scope URLs, preserving order
    pub fn filter(&self, urls: Vec<String>) -> Vec<String> {
        urls.into_iter().filter(|url| self.contains(url)).collect()
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.tokens().collect();
        write!(f, "{}", tokens.join(", "))
    }
}
