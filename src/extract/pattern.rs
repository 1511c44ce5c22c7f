// src/extract/pattern.rs
// =============================================================================
// This module finds URL-looking strings inside raw text.
//
// The same pattern is used for two very different inputs:
// - HTML markup (attribute values like src="/app.js")
// - JavaScript source (string literals like fetch("/api/users"))
//
// Both cases have one thing in common: the interesting value sits between
// quotes. So the pattern looks for a quote, one of four URL shapes, and a
// closing quote:
//
//   1. "https://host/path"   absolute http/https URL
//   2. "//cdn.host/lib.js"   protocol-relative URL
//   3. "/api/v1/users"       root-relative path
//   4. "static/js/app.js"    relative path with at least one '/' and a short
//                            alphabetic file extension (1-4 letters)
//
// The match we return INCLUDES the surrounding quotes. Stripping them is the
// normalizer's job (see normalize.rs).
//
// Rust concepts:
// - LazyLock: Compile the regex once, the first time it's used
// - Iterators: find_iter() walks every non-overlapping match left to right
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

/// The extraction grammar, quotes included.
pub const LINK_PATTERN: &str = r#"(?:"|')(https?://[^\s"']+|//[^\s"']+|/[^\s"']+|[a-zA-Z0-9_\-/]+/[a-zA-Z0-9_\-/]+\.[a-zA-Z]{1,4})(?:"|')"#;

// The pattern is a constant, so if it fails to compile that's a bug in this
// file, not something a user can trigger.
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINK_PATTERN).expect("LINK_PATTERN is a valid regex"));

// Returns every quoted URL or path found in `content`
//
// Parameters:
//   content: HTML or JavaScript text (borrowed as &str)
//
// Returns: Vec<String> of raw matches, in the order they appear, duplicates
// included. Each match still has its quotes, e.g. "\"/app.js\"".
//
// Example:
//   content = r#"fetch("/api/users")"#
//   result  = ["\"/api/users\""]
pub fn find_matches(content: &str) -> Vec<String> {
    LINK_REGEX
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why r#"..."# for the pattern?
//    - It's a "raw string": backslashes are not escape characters
//    - The # lets us put " inside the string without escaping it
//
// 2. What does (?:"|') mean?
//    - (?: ... ) is a group that doesn't capture anything
//    - "|' means "a double quote OR a single quote"
//
// 3. Why is matching "non-overlapping"?
//    - find_iter() continues searching AFTER the end of the previous match
//    - So in "a" "b" the closing quote of "a" can't also open a new match
//
// 4. Why LazyLock instead of compiling in find_matches()?
//    - Compiling a regex is much slower than running it
//    - find_matches() runs once per fetched script, so we compile once and share
// -----------------------------------------------------------------------------
