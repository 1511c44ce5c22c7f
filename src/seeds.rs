// src/seeds.rs
// =============================================================================
// Seeds are the starting points of a run: URLs or bare domains.
//
// They come from either -d (one seed) or -f (a file with one seed per line).
// =============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

// Reads seeds from a newline-delimited file
//
// Lines are trimmed and blank lines are ignored. Any I/O error (missing file,
// permission denied, invalid UTF-8) is returned with the path attached.
pub fn read_seed_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read seed file '{}'", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

// Makes sure a seed has a scheme
//
// Examples:
//   "example.com"          -> "https://example.com"
//   "http://example.com"   -> "http://example.com"
//   "https://example.com/" -> "https://example.com/"
pub fn normalize_seed(seed: &str) -> String {
    if seed.starts_with("http://") || seed.starts_with("https://") {
        seed.to_string()
    } else {
        format!("https://{}", seed)
    }
}
