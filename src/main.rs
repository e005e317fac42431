//! Workshop Sync CLI
//!
//! Checks workshop descriptions against their event pages and syncs them.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use workshop_sync::config::DEFAULT_CSV_PATH;
use workshop_sync::{Command, ContentDisplay, Driver, Fetcher, RunStatus, SyncConfig};

/// Workshop newsletter update tool
#[derive(Parser, Debug)]
#[command(name = "workshop-sync")]
#[command(version)]
#[command(about = "Sync workshop descriptions in the CSV table with their event pages")]
#[command(after_help = "Examples:\n  \
    workshop-sync --workshop \"End-to-End AI\" --url \"https://events.example.com/...\"\n  \
    workshop-sync --check-all\n  \
    workshop-sync --backup --check-all")]
struct Args {
    /// Workshop name to check/update
    #[arg(long)]
    workshop: Option<String>,

    /// URL of event page to sync from
    #[arg(long)]
    url: Option<String>,

    /// Check all workshops for updates
    #[arg(long)]
    check_all: bool,

    /// Sync CSV descriptions with event pages (accepted, selects no operation)
    #[arg(long)]
    sync_csv: bool,

    /// Create backup of the table before anything else
    #[arg(long)]
    backup: bool,

    /// Workshop table file
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    csv: PathBuf,

    /// Print the newsletter HTML snippet for each fetched page
    #[arg(long)]
    html: bool,

    /// Print the extracted page content as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn to_command(&self) -> Command {
        Command {
            workshop: self.workshop.clone(),
            url: self.url.clone(),
            check_all: self.check_all,
            sync_csv: self.sync_csv,
            backup: self.backup,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Initialize tracing
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = SyncConfig::default().with_csv_path(&args.csv);
    let command = args.to_command();

    let fetcher = Fetcher::new(&config).context(
        "could not initialise the HTTP client; check the TLS setup of this system",
    )?;
    let mut driver = Driver::new(config, fetcher).with_display(ContentDisplay {
        html: args.html,
        json: args.json,
    });

    tracing::debug!("Running {:?}", command);
    match driver.run(&command)? {
        RunStatus::Done => {}
        RunStatus::NothingToDo => Args::command().print_help()?,
    }
    Ok(())
}
