//! Ordered selector probing
//!
//! Each field is located by walking an ordered list of CSS selectors and
//! stopping at the first one whose probe returns something. Probes are plain
//! functions over a parsed document so they can be tested in isolation.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Title candidates, generic heading first
pub const TITLE_SELECTORS: &[&str] = &[
    "h1",
    ".event-title",
    ".workshop-title",
    "[data-testid=\"event-title\"]",
];

/// Description candidates
pub const DESCRIPTION_SELECTORS: &[&str] = &[
    ".event-description",
    ".workshop-description",
    "[data-testid=\"event-description\"]",
    ".content p",
];

/// List-like structures that may hold workshop features
pub const FEATURE_SELECTORS: &[&str] = &["ul li", "ol li", ".agenda-item", ".feature"];

/// A selector's result set must be larger than this to count as a feature list
pub const MIN_FEATURE_MATCHES: usize = 2;

/// Never report more features than this
pub const MAX_FEATURES: usize = 6;

/// Run `probe` for each selector in order and return the first hit.
///
/// Selectors that fail to parse are skipped.
pub fn first_match<T, F>(document: &Html, selectors: &[&str], probe: F) -> Option<T>
where
    F: Fn(&Html, &Selector) -> Option<T>,
{
    selectors.iter().find_map(|raw| match Selector::parse(raw) {
        Ok(selector) => {
            let hit = probe(document, &selector);
            if hit.is_some() {
                debug!("Selector {} matched", raw);
            }
            hit
        }
        Err(e) => {
            debug!("Skipping invalid selector {}: {}", raw, e);
            None
        }
    })
}

/// Concatenated text of an element, trimmed
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first matched element, if it is non-empty
pub fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

/// All matched elements' trimmed texts joined by a single space.
///
/// Any match claims the selector: an all-blank join still stops probing and
/// comes back as an empty string.
pub fn joined_text(document: &Html, selector: &Selector) -> Option<String> {
    let parts: Vec<String> = document.select(selector).map(|el| element_text(&el)).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Up to [`MAX_FEATURES`] trimmed item texts, only when the selector matched
/// more than [`MIN_FEATURE_MATCHES`] elements
pub fn list_items(document: &Html, selector: &Selector) -> Option<Vec<String>> {
    let matched: Vec<ElementRef<'_>> = document.select(selector).collect();
    if matched.len() <= MIN_FEATURE_MATCHES {
        return None;
    }
    Some(matched.iter().take(MAX_FEATURES).map(element_text).collect())
}
