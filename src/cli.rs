// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Usage examples:
//   linkfinder -d example.com
//   linkfinder -f seeds.txt -s all -c -o urls.txt
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Option<T>: Flags the user may or may not pass
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::DEFAULT_CONCURRENCY;
use crate::scope::ScopeArg;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "linkfinder",
    version,
    about = "Find URLs and endpoints referenced by web pages and their JavaScript",
    long_about = "linkfinder fetches each seed page, collects the scripts, links, images and iframes it \
                  references, downloads those resources and extracts every URL or path it can find \
                  in them. Results are printed one per line."
)]
pub struct Cli {
    /// A single seed: URL or bare domain (e.g., example.com)
    #[arg(short = 'd', long = "domain", value_name = "URL")]
    pub domain: Option<String>,

    /// File with one seed per line (blank lines are ignored). Wins over --domain
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Keep only URLs containing this token, or 'all' to derive tokens from the seeds
    ///
    /// Example: -s example keeps https://api.example.com and https://example-cdn.net
    #[arg(short = 's', long = "scope", value_name = "TOKEN|all")]
    pub scope: Option<ScopeArg>,

    /// Only output complete URLs starting with http:// or https://
    #[arg(short = 'c', long = "complete")]
    pub complete: bool,

    /// Also write the results to this file, one per line
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Print a JSON report (urls + failures) instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// Maximum number of resources fetched at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_name = "N")]
    pub concurrency: usize,

    /// Per-request timeout in seconds (0 = no timeout)
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub timeout: u64,

    /// Show debug logs on stderr (RUST_LOG overrides this)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// The request timeout, or None if disabled with --timeout 0
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout))
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. How does clap turn "-s all" into a ScopeArg?
//    - ScopeArg implements FromStr (see scope.rs)
//    - clap calls "all".parse::<ScopeArg>() for us
//
// 2. Why Option<PathBuf> for files?
//    - PathBuf is an owned file system path (like String for paths)
//    - None means the flag wasn't given at all
//
// 3. What does default_value_t do?
//    - Uses a typed Rust value as the default (the _t stands for "typed")
//    - It also shows up in --help as [default: 10]
// -----------------------------------------------------------------------------
