//! Event page content extraction
//!
//! Turns a raw HTML page into an [`ExtractedContent`]. Every field is probed
//! independently and falls back to absent; nothing in here fails.

use crate::extraction::presenters::{find_presenters, visible_text};
use crate::extraction::selectors::{
    first_match, first_text, joined_text, list_items, DESCRIPTION_SELECTORS, FEATURE_SELECTORS,
    TITLE_SELECTORS,
};
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Content pulled from one event page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Workshop title
    pub title: Option<String>,
    /// Workshop description; the only field merged back into the table
    pub description: Option<String>,
    /// Agenda block (no rule locates it yet)
    pub agenda: Option<String>,
    /// Presenter line
    pub presenters: Option<String>,
    /// Up to six short feature/agenda bullets
    pub features: Vec<String>,
}

impl ExtractedContent {
    /// Description text, or an empty string when none was found
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Whether a non-blank description was extracted
    pub fn has_description(&self) -> bool {
        !self.description_text().trim().is_empty()
    }
}

/// Content extraction functionality
pub struct ContentExtractor;

impl ContentExtractor {
    /// Parse `html` and run every extraction rule over it
    #[instrument(skip(html), fields(bytes = html.len()))]
    pub fn extract(html: &str) -> ExtractedContent {
        let document = Html::parse_document(html);
        Self::extract_document(&document)
    }

    /// Run every extraction rule over an already parsed document
    pub fn extract_document(document: &Html) -> ExtractedContent {
        let content = ExtractedContent {
            title: Self::title(document),
            description: Self::description(document),
            agenda: None,
            presenters: Self::presenters(document),
            features: Self::features(document),
        };

        debug!(
            "Extracted title={:?}, description_chars={}, presenters={:?}, features={}",
            content.title,
            content.description_text().chars().count(),
            content.presenters,
            content.features.len()
        );

        content
    }

    /// First non-empty title candidate
    pub fn title(document: &Html) -> Option<String> {
        first_match(document, TITLE_SELECTORS, first_text)
    }

    /// Joined text of the first description selector with any match
    pub fn description(document: &Html) -> Option<String> {
        first_match(document, DESCRIPTION_SELECTORS, joined_text).filter(|d| !d.is_empty())
    }

    /// Presenter line from the visible page text
    pub fn presenters(document: &Html) -> Option<String> {
        find_presenters(&visible_text(document))
    }

    /// Bullets from the first list selector with more than two items
    pub fn features(document: &Html) -> Vec<String> {
        first_match(document, FEATURE_SELECTORS, list_items).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EVENT_PAGE: &str = r#"
        <html>
        <head><title>Ignored</title></head>
        <body>
            <h1> End-to-End AI </h1>
            <div class="event-description">
                Build and deploy models on the lakehouse.
            </div>
            <div class="event-description">Hands-on labs included.</div>
            <p>Presenters: Ada Lovelace
            </p>
            <ul>
                <li>Feature engineering</li>
                <li>Model training</li>
                <li>Serving</li>
            </ul>
        </body>
        </html>
    "#;

    #[test]
    fn test_extract_full_page() {
        let content = ContentExtractor::extract(EVENT_PAGE);
        assert_eq!(content.title.as_deref(), Some("End-to-End AI"));
        assert_eq!(
            content.description.as_deref(),
            Some("Build and deploy models on the lakehouse. Hands-on labs included.")
        );
        assert_eq!(content.presenters.as_deref(), Some("Ada Lovelace"));
        assert_eq!(
            content.features,
            vec!["Feature engineering", "Model training", "Serving"]
        );
        assert_eq!(content.agenda, None);
    }

    #[test]
    fn test_empty_page_degrades_to_absent() {
        let content = ContentExtractor::extract("");
        assert_eq!(content, ExtractedContent::default());
        assert!(!content.has_description());
        assert_eq!(content.description_text(), "");
    }

    #[test]
    fn test_title_falls_through_blank_h1() {
        let html = r#"<h1>  </h1><span class="workshop-title">Lakehouse 101</span>"#;
        let content = ContentExtractor::extract(html);
        assert_eq!(content.title.as_deref(), Some("Lakehouse 101"));
    }

    #[test]
    fn test_description_from_content_paragraphs() {
        let html = r#"<div class="content"><p>First.</p><p>Second.</p></div>"#;
        let content = ContentExtractor::extract(html);
        assert_eq!(content.description.as_deref(), Some("First. Second."));
    }

    #[test]
    fn test_data_testid_description() {
        let html = r#"<section data-testid="event-description">Streaming pipelines</section>
                      <div class="content"><p>Other</p></div>"#;
        let content = ContentExtractor::extract(html);
        assert_eq!(content.description.as_deref(), Some("Streaming pipelines"));
    }

    #[test]
    fn test_features_capped_at_six() {
        let items: String = (1..=9).map(|i| format!("<li>Item {}</li>", i)).collect();
        let html = format!("<ul>{}</ul>", items);
        let content = ContentExtractor::extract(&html);
        assert_eq!(content.features.len(), 6);
        assert_eq!(content.features[0], "Item 1");
        assert_eq!(content.features[5], "Item 6");
    }

    #[test]
    fn test_features_skip_short_lists() {
        let html = r#"
            <ul><li>Only</li><li>Two</li></ul>
            <div class="agenda-item">Intro</div>
            <div class="agenda-item">Lab</div>
            <div class="agenda-item">Q&amp;A</div>
        "#;
        let content = ContentExtractor::extract(html);
        assert_eq!(content.features, vec!["Intro", "Lab", "Q&A"]);
    }

    #[test]
    fn test_features_single_bullet_then_nothing() {
        let html = "<ol><li>Lonely</li></ol>";
        let content = ContentExtractor::extract(html);
        assert!(content.features.is_empty());
    }

    #[test]
    fn test_serializes_to_json() {
        let content = ExtractedContent {
            title: Some("T".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains("\"title\":\"T\""));
        assert!(json.contains("\"features\":[]"));
    }
}
