// src/extract/html.rs
// =============================================================================
// This module pulls every referenced resource out of one HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), which never fails:
//   broken markup is repaired the same way a browser would repair it
//
// What we collect:
// - src of every <script>
// - href and src of every <a>, <link>, <img>, <iframe>
// - quoted URLs and paths inside inline <script> text
//
// Rust concepts:
// - Structs: PageLinks groups the two things a page gives us
// - Iterators: flat_map() to join the text of many elements
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use super::{dedup, find_matches, normalize_all, SourceKind};

/// Everything discovered on a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// Absolute URLs (attributes + inline script matches), deduplicated.
    /// These are the resources the fetch pipeline downloads next.
    pub urls: Vec<String>,
    /// Raw pattern matches from inline <script> text, quotes and all
    pub inline_matches: Vec<String>,
}

// Extracts all links from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base: the URL of the page (for resolving relative links)
//
// Returns: PageLinks with resolved URLs and raw inline matches
//
// Example:
//   html = r#"<script src="/app.js"></script>"#
//   base = "https://example.com"
//   urls = ["https://example.com/app.js"]
pub fn extract_page_links(html: &str, base: &Url) -> PageLinks {
    let document = Html::parse_document(html);

    // These selectors are constants and known to be valid
    let script_selector = Selector::parse("script").expect("valid selector");
    let linked_selector = Selector::parse("a, link, img, iframe").expect("valid selector");

    let mut attribute_values = Vec::new();

    for element in document.select(&script_selector) {
        if let Some(src) = element.value().attr("src") {
            attribute_values.push(src.to_string());
        }
    }

    for element in document.select(&linked_selector) {
        if let Some(href) = element.value().attr("href") {
            attribute_values.push(href.to_string());
        }
        if let Some(src) = element.value().attr("src") {
            attribute_values.push(src.to_string());
        }
    }

    // All inline script bodies, glued together, scanned in one pass
    let inline_text: String = document
        .select(&script_selector)
        .flat_map(|element| element.text())
        .collect();
    let inline_matches = find_matches(&inline_text);

    let mut urls = normalize_all(attribute_values, base, SourceKind::HtmlAttribute);
    urls.extend(normalize_all(
        inline_matches.iter().cloned(),
        base,
        SourceKind::ScriptLiteral,
    ));

    PageLinks {
        urls: dedup(urls),
        inline_matches,
    }
}
