//! Workshop Sync - keep a workshop table in step with live event pages
//!
//! Reads a CSV table of workshops (one row per session, keyed by `Subject`),
//! scrapes each workshop's event page and reports or applies description
//! updates.
//!
//! # Architecture
//!
//! ```text
//!            CLI (main.rs)
//!                 │
//!                 ▼
//!             ┌────────┐
//!             │ Driver │
//!             └───┬────┘
//!        ┌────────┼──────────┐
//!        ▼        ▼          ▼
//!    Fetcher   Comparator   Store
//!        │                   │
//!        ▼                   ▼
//!   Extraction           CSV table
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use workshop_sync::{Driver, Fetcher, SyncConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SyncConfig::default().with_csv_path("workshops.csv");
//!     let fetcher = Fetcher::new(&config)?;
//!     let mut driver = Driver::new(config, fetcher);
//!
//!     for (name, outcome) in driver.check_all() {
//!         println!("{}: {:?}", name, outcome);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod compare;
pub mod config;
pub mod driver;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod newsletter;
pub mod store;

// Re-exports for convenience
pub use compare::{compare_descriptions, UpdateDecision};
pub use config::SyncConfig;
pub use driver::{CheckOutcome, Command, ContentDisplay, Driver, RunStatus, SyncOutcome};
pub use error::{Error, Result};
pub use extraction::{ContentExtractor, ExtractedContent};
pub use fetch::{Fetcher, PageSource};
pub use newsletter::NewsletterSnippet;
pub use store::{UpdateOutcome, WorkshopRecord, WorkshopStore, WorkshopTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
