// src/extract/normalize.rs
// =============================================================================
// This module turns raw extracted strings into absolute URLs.
//
// Raw strings come from two places:
// - HTML attribute values (src="...", href="...")
// - Pattern matches in JavaScript (inline <script> text)
//
// Both go through the same rules, checked in order (first match wins):
//
//   1. starts with "http"  -> already absolute, keep as-is
//   2. starts with "//"    -> protocol-relative, prefix "https:"
//   3. starts with "/"     -> root-relative, prefix the page's origin
//   4. anything else       -> depends on where the string came from:
//        ScriptLiteral: dropped (a bare "a/b.js" in JS is too ambiguous)
//        HtmlAttribute: joined against the page URL like a browser would
//
// Rule 1 is a plain prefix check. "httpfoo" passes it too.
//
// Rust concepts:
// - Enums as flags: SourceKind picks the behavior of rule 4
// - Option<T>: None means "not a usable URL, skip it"
// =============================================================================

use url::Url;

use super::dedup;

/// Anything shorter than this after stripping quotes is noise ("/", "/a", ...).
pub const MIN_LINK_LEN: usize = 5;

/// Where a raw string was found. Only matters for bare relative paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A quoted match from JavaScript text
    ScriptLiteral,
    /// The value of an HTML src/href attribute
    HtmlAttribute,
}

// Removes every single and double quote from a string
//
// Example: "\"/app.js\"" -> "/app.js"
pub fn strip_quotes(raw: &str) -> String {
    raw.replace(['"', '\''], "")
}

// Normalizes one raw string against a base URL
//
// Parameters:
//   raw: the extracted string, possibly still quoted
//   base: the URL of the page it was found on
//   kind: where it was found (see SourceKind)
//
// Returns: Some(absolute_url) or None if the string should be dropped
//
// Examples (base = "https://site.com/blog/post"):
//   "//cdn.example.com/x.js" -> Some("https://cdn.example.com/x.js")
//   "/a/b.js"                -> Some("https://site.com/a/b.js")
//   "https://already.com/x"  -> Some("https://already.com/x")
//   "js/app.js"              -> None for ScriptLiteral,
//                               Some("https://site.com/blog/js/app.js") for HtmlAttribute
pub fn normalize(raw: &str, base: &Url, kind: SourceKind) -> Option<String> {
    let stripped = strip_quotes(raw);
    let value = stripped.trim();

    if value.len() < MIN_LINK_LEN {
        return None;
    }

    if value.starts_with("http") {
        return Some(value.to_string());
    }

    if let Some(rest) = value.strip_prefix("//") {
        return Some(format!("https://{}", rest));
    }

    if value.starts_with('/') {
        return Some(format!("{}{}", base.origin().ascii_serialization(), value));
    }

    match kind {
        SourceKind::ScriptLiteral => None,
        SourceKind::HtmlAttribute => join_relative(base, value),
    }
}

// Normalizes a batch of raw strings
//
// Duplicates are removed before normalizing (no point resolving the same
// string twice), and everything that normalizes to None is dropped.
pub fn normalize_all<I>(raws: I, base: &Url, kind: SourceKind) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    dedup(raws)
        .iter()
        .filter_map(|raw| normalize(raw, base, kind))
        .collect()
}

// Resolves a bare relative reference ("js/app.js", "../img/a.png")
//
// Skips:
// - fragment-only values ("#top"), they just point back at the page
// - anything that resolves to a non-HTTP scheme (mailto:, javascript:, data:)
fn join_relative(base: &Url, value: &str) -> Option<String> {
    if value.starts_with('#') {
        return None;
    }

    let joined = base.join(value).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(joined.to_string()),
        _ => None,
    }
}
