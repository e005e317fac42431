//! Newsletter HTML snippets
//!
//! Renders the pieces of a newsletter workshop card from extracted page
//! content. Sections with nothing to show render as empty strings.

use crate::extraction::ExtractedContent;
use htmlescape::encode_minimal;
use serde::{Deserialize, Serialize};

/// Rendered newsletter fragments for one workshop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSnippet {
    /// Plain description text
    pub description: String,
    /// "Workshop features" box, or empty
    pub features_html: String,
    /// "Presenters" box, or empty
    pub presenters_html: String,
}

impl NewsletterSnippet {
    /// Build the snippet for `content`
    pub fn from_content(content: &ExtractedContent) -> Self {
        Self {
            description: content.description_text().to_string(),
            features_html: features_html(&content.features),
            presenters_html: content
                .presenters
                .as_deref()
                .map(presenters_html)
                .unwrap_or_default(),
        }
    }

    /// All non-empty fragments, one per paragraph
    pub fn render(&self) -> String {
        [
            self.description.as_str(),
            self.features_html.as_str(),
            self.presenters_html.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
    }
}

fn features_html(features: &[String]) -> String {
    if features.is_empty() {
        return String::new();
    }
    let items: String = features
        .iter()
        .map(|f| format!("<li>• {}</li>", encode_minimal(f)))
        .collect();
    format!(
        r#"
                    <div class="bg-oat-light rounded p-4 mb-4">
                        <div class="font-semibold text-navy-800 mb-2">Workshop features:</div>
                        <ul class="text-sm text-gray-700 space-y-1">
                            {}
                        </ul>
                    </div>"#,
        items
    )
}

fn presenters_html(presenters: &str) -> String {
    if presenters.is_empty() {
        return String::new();
    }
    format!(
        r#"
                    <div class="bg-gray-50 rounded p-3 mb-4 text-sm">
                        <div class="font-semibold text-navy-800 mb-1">Presenters:</div>
                        <div class="text-gray-700">{}</div>
                    </div>"#,
        encode_minimal(presenters)
    )
}
