//! Presenter lookup in free page text

use regex::Regex;
use scraper::{Html, Node};
use std::sync::OnceLock;

/// Tried in order against the page text; first hit wins
pub const PRESENTER_PATTERNS: &[&str] = &[
    r"(?i)Presenter[s]?:\s*(.+?)(?:\n|<|$)",
    r"(?i)Speaker[s]?:\s*(.+?)(?:\n|<|$)",
    r"(?i)Host[s]?:\s*(.+?)(?:\n|<|$)",
];

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

fn patterns() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PRESENTER_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// All text nodes of the document outside script/style, concatenated as-is
pub fn visible_text(document: &Html) -> String {
    document
        .tree
        .nodes()
        .filter_map(|node| {
            let text = match node.value() {
                Node::Text(text) => text,
                _ => return None,
            };
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|el| el.name()))
                .is_some_and(|name| HIDDEN_TAGS.contains(&name));
            (!hidden).then(|| &**text)
        })
        .collect()
}

/// First presenter/speaker/host line found in `text`
pub fn find_presenters(text: &str) -> Option<String> {
    patterns().iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}
