//! Content extraction module
//!
//! Best-effort extraction of workshop fields from event page HTML using
//! ordered selector and pattern fallbacks.

pub mod content;
pub mod presenters;
pub mod selectors;

pub use content::{ContentExtractor, ExtractedContent};
