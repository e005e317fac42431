//! Command dispatch
//!
//! Ties the store, a page source and the comparator together. Every per-item
//! failure is reported and contained; only table write errors propagate.

use crate::compare::{compare_descriptions, UpdateDecision};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::extraction::ExtractedContent;
use crate::fetch::PageSource;
use crate::newsletter::NewsletterSnippet;
use crate::store::{unique_by_subject, UpdateOutcome, WorkshopRecord, WorkshopStore};
use tracing::{info, instrument, warn};

/// Sink for the human-readable report lines
pub trait Reporter {
    /// Emit one report line
    fn line(&mut self, msg: &str);
}

/// Prints report lines to stdout
#[derive(Debug, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn line(&mut self, msg: &str) {
        println!("{}", msg);
    }
}

/// Collects report lines in memory
impl Reporter for Vec<String> {
    fn line(&mut self, msg: &str) {
        self.push(msg.to_string());
    }
}

/// What the user asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Target workshop subject
    pub workshop: Option<String>,
    /// Event page to sync from
    pub url: Option<String>,
    /// Check every workshop
    pub check_all: bool,
    /// Accepted for compatibility; selects nothing on its own
    pub sync_csv: bool,
    /// Back up the table before anything else
    pub backup: bool,
}

/// The single operation a [`Command`] resolves to (besides backup)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    /// Check every unique workshop
    CheckAll,
    /// Overwrite a workshop's description from a URL
    Sync {
        /// Workshop subject
        workshop: &'a str,
        /// Event page URL
        url: &'a str,
    },
    /// Check one workshop against its stored URL
    Check {
        /// Workshop subject
        workshop: &'a str,
    },
    /// Nothing requested
    None,
}

impl Command {
    /// Resolve the flags; check-all wins over workshop modes and
    /// `sync_csv` never changes the result
    pub fn action(&self) -> Action<'_> {
        if self.check_all {
            return Action::CheckAll;
        }
        match (self.workshop.as_deref(), self.url.as_deref()) {
            (Some(workshop), Some(url)) => Action::Sync { workshop, url },
            (Some(workshop), None) => Action::Check { workshop },
            _ => Action::None,
        }
    }
}

/// Whether [`Driver::run`] did anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// At least one operation ran
    Done,
    /// No flags selected an operation; the caller should print usage
    NothingToDo,
}

/// Result of checking one workshop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No row carries the subject
    NotFound,
    /// The first row has an empty `Location`
    NoUrl,
    /// The page could not be retrieved
    FetchFailed,
    /// The page was compared against the table
    Compared(UpdateDecision),
}

/// Result of a direct sync from a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing usable was extracted; the table was not touched
    NoContent,
    /// The store was asked to update
    Applied(UpdateOutcome),
}

/// Optional dumps of fetched content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentDisplay {
    /// Print the newsletter HTML snippet
    pub html: bool,
    /// Print the extracted content as JSON
    pub json: bool,
}

/// Runs commands against a table and a page source
pub struct Driver<S, R = StdoutReporter> {
    store: WorkshopStore,
    source: S,
    config: SyncConfig,
    reporter: R,
    display: ContentDisplay,
}

impl<S: PageSource> Driver<S, StdoutReporter> {
    /// Driver over the configured table, reporting to stdout
    pub fn new(config: SyncConfig, source: S) -> Self {
        Self::with_reporter(config, source, StdoutReporter)
    }
}

impl<S: PageSource, R: Reporter> Driver<S, R> {
    /// Driver reporting into `reporter`
    pub fn with_reporter(config: SyncConfig, source: S, reporter: R) -> Self {
        Self {
            store: WorkshopStore::new(config.csv_path.clone()),
            source,
            config,
            reporter,
            display: ContentDisplay::default(),
        }
    }

    /// Also print fetched content as selected
    pub fn with_display(mut self, display: ContentDisplay) -> Self {
        self.display = display;
        self
    }

    /// The report sink
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// The table store
    pub fn store(&self) -> &WorkshopStore {
        &self.store
    }

    /// Execute `command`: backup first, then at most one other operation
    pub fn run(&mut self, command: &Command) -> Result<RunStatus> {
        if command.backup {
            self.backup();
        }

        match command.action() {
            Action::CheckAll => {
                self.check_all();
            }
            Action::Sync { workshop, url } => {
                self.sync_from_url(workshop, url)?;
            }
            Action::Check { workshop } => {
                self.check_workshop(workshop);
            }
            Action::None if command.backup => {}
            Action::None => return Ok(RunStatus::NothingToDo),
        }
        Ok(RunStatus::Done)
    }

    /// Copy the table aside; failure is reported, never fatal
    pub fn backup(&mut self) -> Option<std::path::PathBuf> {
        let path = self.store.backup();
        match &path {
            Some(p) => self.say(format!("Created backup: {}", p.display())),
            None => self.say("Warning: Could not create backup"),
        }
        path
    }

    /// Check every distinct workshop, one at a time, in table order
    #[instrument(skip(self))]
    pub fn check_all(&mut self) -> Vec<(String, CheckOutcome)> {
        let records = self.store.read_all();
        let unique = unique_by_subject(&records);
        self.say(format!(
            "Checking {} unique workshops for updates...",
            unique.len()
        ));

        let mut outcomes = Vec::with_capacity(unique.len());
        for record in unique {
            let name = record.subject().trim().to_string();
            self.say(format!("\n--- Checking {} ---", name));
            let outcome = self.check_record(&name, record);
            outcomes.push((name, outcome));
        }
        outcomes
    }

    /// Compare one workshop's stored description against its event page.
    ///
    /// Never writes to the table.
    #[instrument(skip(self))]
    pub fn check_workshop(&mut self, name: &str) -> CheckOutcome {
        let records = self.store.read_all();
        match records.iter().find(|r| r.matches_subject(name)) {
            Some(record) => self.check_record(name, record),
            None => {
                self.say(format!("Workshop '{}' not found in CSV", name));
                CheckOutcome::NotFound
            }
        }
    }

    /// Fetch `url` and overwrite the workshop's description without comparing
    #[instrument(skip(self))]
    pub fn sync_from_url(&mut self, workshop: &str, url: &str) -> Result<SyncOutcome> {
        let content = match self.source.fetch(url) {
            Some(content) if content.has_description() => content,
            _ => {
                self.say("Could not extract content from webpage");
                return Ok(SyncOutcome::NoContent);
            }
        };
        self.show(&content);

        let outcome = self
            .store
            .update_description(workshop, content.description_text())?;
        let msg = match outcome {
            UpdateOutcome::Updated(n) => format!("Updated {} instances of '{}' in CSV", n, workshop),
            UpdateOutcome::NoMatch => format!("No workshops found matching '{}'", workshop),
            UpdateOutcome::MissingFile => {
                format!("CSV file {} not found!", self.store.path().display())
            }
        };
        self.say(msg);
        Ok(SyncOutcome::Applied(outcome))
    }

    fn check_record(&mut self, name: &str, record: &WorkshopRecord) -> CheckOutcome {
        let url = record.location().trim();
        if url.is_empty() {
            self.say(format!("No URL found for workshop '{}'", name));
            return CheckOutcome::NoUrl;
        }

        self.say(format!("Checking {} for updates...", url));
        let Some(content) = self.source.fetch(url) else {
            self.say("Could not fetch webpage content");
            return CheckOutcome::FetchFailed;
        };
        self.show(&content);

        let decision =
            compare_descriptions(record.description(), content.description_text(), &self.config);
        match &decision {
            UpdateDecision::UpdateRecommended {
                current_preview,
                scraped_preview,
            } => {
                info!("Update recommended for '{}'", name);
                self.say("UPDATE RECOMMENDED: Webpage has more detailed content");
                self.say(format!("Current CSV: {}...", current_preview));
                self.say(format!("Webpage: {}...", scraped_preview));
            }
            UpdateDecision::InSync => self.say("Content appears to be in sync"),
        }
        CheckOutcome::Compared(decision)
    }

    fn show(&mut self, content: &ExtractedContent) {
        if self.display.json {
            match content_json(content) {
                Ok(json) => self.say(json),
                Err(e) => warn!("Could not serialize content: {}", e),
            }
        }
        if self.display.html {
            let html = NewsletterSnippet::from_content(content).render();
            self.say(html);
        }
    }

    fn say(&mut self, msg: impl AsRef<str>) {
        self.reporter.line(msg.as_ref());
    }
}

fn content_json(content: &ExtractedContent) -> Result<String> {
    Ok(serde_json::to_string_pretty(content)?)
}
