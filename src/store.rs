//! Workshop table store
//!
//! The table is a CSV file with a header row. It is always loaded whole,
//! edited in memory and written back whole; there is no locking, so two
//! processes editing the same file can race.

use crate::error::{Result, StoreError};
use chrono::Local;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Column holding the workshop name
pub const SUBJECT: &str = "Subject";
/// Column holding the workshop description
pub const DESCRIPTION: &str = "Description";
/// Column holding the event page URL
pub const LOCATION: &str = "Location";

const UTF8_BOM: &str = "\u{feff}";

/// One row of the table, fields kept in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopRecord {
    fields: Vec<(String, String)>,
    /// Values past the last header column, written back as they came
    overflow: Vec<String>,
}

impl WorkshopRecord {
    /// Build a record from `(column, value)` pairs in column order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            overflow: Vec::new(),
        }
    }

    /// Value of `column`, if the table has that column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Overwrite every column named `column`. Unknown columns are refused
    /// rather than added.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let mut hit = false;
        for (_, slot) in self.fields.iter_mut().filter(|(name, _)| name == column) {
            slot.clone_from(&value);
            hit = true;
        }
        if hit {
            Ok(())
        } else {
            Err(StoreError::MissingColumn(column.to_string()).into())
        }
    }

    /// `Subject` value, empty when absent
    pub fn subject(&self) -> &str {
        self.get(SUBJECT).unwrap_or("")
    }

    /// `Description` value, empty when absent
    pub fn description(&self) -> &str {
        self.get(DESCRIPTION).unwrap_or("")
    }

    /// `Location` value (the event page URL), empty when absent
    pub fn location(&self) -> &str {
        self.get(LOCATION).unwrap_or("")
    }

    /// Whether the trimmed subject equals the trimmed `name`
    pub fn matches_subject(&self, name: &str) -> bool {
        self.subject().trim() == name.trim()
    }

    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Cell values in file order, including any past the header
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|(_, value)| value.as_str())
            .chain(self.overflow.iter().map(String::as_str))
    }
}

/// Line ending used when writing the table back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\r\n`
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if pos > 0 && text.as_bytes()[pos - 1] == b'\r' => LineEnding::Crlf,
            Some(_) => LineEnding::Lf,
            None => LineEnding::Crlf,
        }
    }

    fn terminator(self) -> Terminator {
        match self {
            LineEnding::Crlf => Terminator::CRLF,
            LineEnding::Lf => Terminator::Any(b'\n'),
        }
    }
}

/// A fully loaded table file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopTable {
    headers: Vec<String>,
    records: Vec<WorkshopRecord>,
    line_ending: LineEnding,
    bom: bool,
}

impl WorkshopTable {
    /// Parse CSV text with a header row.
    ///
    /// Short rows are padded with empty fields. Fields past the header are
    /// kept on the row and written back unchanged.
    pub fn parse(text: &str) -> Result<Self> {
        let bom = text.starts_with(UTF8_BOM);
        let body = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(body.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if row.len() != headers.len() {
                warn!(
                    "Row {} has {} fields, header has {}",
                    records.len() + 1,
                    row.len(),
                    headers.len()
                );
            }
            let mut record = WorkshopRecord::from_pairs(
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, column)| (column.clone(), row.get(i).unwrap_or(""))),
            );
            record.overflow = row.iter().skip(headers.len()).map(String::from).collect();
            records.push(record);
        }

        Ok(Self {
            headers,
            records,
            line_ending: LineEnding::detect(body),
            bom,
        })
    }

    /// Serialize back to CSV bytes, each row's cells in position order
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        if self.bom {
            out.extend_from_slice(UTF8_BOM.as_bytes());
        }

        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(self.line_ending.terminator())
            .from_writer(&mut out);

        writer.write_record(&self.headers)?;
        for record in &self.records {
            writer.write_record(record.values())?;
        }
        writer.flush()?;
        drop(writer);

        Ok(out)
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in file order
    pub fn records(&self) -> &[WorkshopRecord] {
        &self.records
    }

    /// Take the rows out of the table
    pub fn into_records(self) -> Vec<WorkshopRecord> {
        self.records
    }

    /// Line ending observed on read
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Set `Description` on every row whose subject matches; returns the count
    pub fn set_description(&mut self, subject: &str, text: &str) -> Result<usize> {
        let matched = self
            .records
            .iter()
            .filter(|r| r.matches_subject(subject))
            .count();
        if matched == 0 {
            return Ok(0);
        }
        if !self.headers.iter().any(|h| h == DESCRIPTION) {
            return Err(StoreError::MissingColumn(DESCRIPTION.to_string()).into());
        }

        for record in self
            .records
            .iter_mut()
            .filter(|r| r.matches_subject(subject))
        {
            record.set(DESCRIPTION, text)?;
        }
        Ok(matched)
    }

    /// The first row of each distinct trimmed subject, in file order
    pub fn unique_by_subject(&self) -> Vec<&WorkshopRecord> {
        unique_by_subject(&self.records)
    }
}

/// The first row of each distinct trimmed subject, in order
pub fn unique_by_subject(records: &[WorkshopRecord]) -> Vec<&WorkshopRecord> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.subject().trim().to_string()))
        .collect()
}

/// Result of a description update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// This many rows were rewritten
    Updated(usize),
    /// No row carries the subject; the file was not touched
    NoMatch,
    /// The table file does not exist
    MissingFile,
}

/// File-backed access to the workshop table
#[derive(Debug, Clone)]
pub struct WorkshopStore {
    path: PathBuf,
}

impl WorkshopStore {
    /// Store backed by the table at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the table file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole table; `Ok(None)` when the file does not exist
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Option<WorkshopTable>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let table = WorkshopTable::parse(&text)?;
        debug!("Loaded {} rows", table.records().len());
        Ok(Some(table))
    }

    /// Every row of the table; empty when the file is missing or unreadable
    pub fn read_all(&self) -> Vec<WorkshopRecord> {
        match self.load() {
            Ok(Some(table)) => table.into_records(),
            Ok(None) => {
                warn!("CSV file {} not found!", self.path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Overwrite the description of every row named `subject`.
    ///
    /// The file is only rewritten when at least one row matched.
    #[instrument(skip(self, text), fields(path = %self.path.display()))]
    pub fn update_description(&self, subject: &str, text: &str) -> Result<UpdateOutcome> {
        let Some(mut table) = self.load()? else {
            warn!("CSV file {} not found!", self.path.display());
            return Ok(UpdateOutcome::MissingFile);
        };

        let updated = table.set_description(subject, text)?;
        if updated == 0 {
            info!("No workshops found matching '{}'", subject);
            return Ok(UpdateOutcome::NoMatch);
        }

        self.save(&table)?;
        info!("Updated {} instances of '{}'", updated, subject);
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Replace the file with `table`.
    ///
    /// The content is serialized up front and lands through a sibling
    /// temporary file plus rename, so the table is never half written.
    pub fn save(&self, table: &WorkshopTable) -> Result<()> {
        let bytes = table.to_bytes()?;
        let tmp = self.sibling(".tmp");
        fs::write(&tmp, &bytes)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    /// Copy the table to `<name>.backup_<YYYYMMDD_HHMMSS>`.
    ///
    /// Failure is only a warning.
    pub fn backup(&self) -> Option<PathBuf> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        match self.backup_with_stamp(&stamp) {
            Ok(path) => {
                info!("Created backup: {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Could not create backup: {}", e);
                None
            }
        }
    }

    /// Copy the table to `<name>.backup_<stamp>`
    pub fn backup_with_stamp(&self, stamp: &str) -> Result<PathBuf> {
        let target = self.backup_path(stamp);
        fs::copy(&self.path, &target)?;
        Ok(target)
    }

    /// Where a backup taken at `stamp` goes
    pub fn backup_path(&self, stamp: &str) -> PathBuf {
        self.sibling(&format!(".backup_{}", stamp))
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }
}
