//! Description freshness heuristic
//!
//! The scraped description counts as newer when it is noticeably longer than
//! the stored one. Only lengths are compared, never content.

use crate::config::SyncConfig;

/// Verdict of [`compare_descriptions`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    /// The page carries noticeably more text than the table
    UpdateRecommended {
        /// Leading characters of the stored description
        current_preview: String,
        /// Leading characters of the scraped description
        scraped_preview: String,
    },
    /// Lengths are close enough
    InSync,
}

impl UpdateDecision {
    /// Whether an update is recommended
    pub fn is_update(&self) -> bool {
        matches!(self, UpdateDecision::UpdateRecommended { .. })
    }
}

/// Compare trimmed descriptions by character count.
///
/// An empty stored description is still compared arithmetically, so any
/// non-empty scraped text recommends an update.
pub fn compare_descriptions(current: &str, scraped: &str, config: &SyncConfig) -> UpdateDecision {
    let current = current.trim();
    let scraped = scraped.trim();

    let current_len = current.chars().count() as f64;
    let scraped_len = scraped.chars().count() as f64;

    if scraped_len > current_len * config.growth_threshold {
        UpdateDecision::UpdateRecommended {
            current_preview: preview(current, config.preview_chars),
            scraped_preview: preview(scraped, config.preview_chars),
        }
    } else {
        UpdateDecision::InSync
    }
}

/// First `max` characters of `text`
pub fn preview(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
