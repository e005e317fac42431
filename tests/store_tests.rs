//! Table store tests against real files

use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use workshop_sync::{UpdateOutcome, WorkshopStore};

const TABLE: &str = "Subject,Start Date,Start Time,Description,Location,Private\r\n\
    Intro to Lakehouse,01/14/2025,10:00 AM,Lakehouse basics,https://events.example.com/lh,False\r\n\
    End-to-End AI,01/15/2025,11:00 AM,\"Train, track and serve models\",https://events.example.com/ai,False\r\n\
    Intro to Lakehouse,02/11/2025,10:00 AM,Lakehouse basics,https://events.example.com/lh2,False\r\n\
    \"Quoted \"\"Name\"\"\",03/01/2025,9:00 AM,,https://events.example.com/q,True\r\n";

fn table_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("databricks_workshops_EST.csv");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_read_all_keeps_order_and_columns() {
    let (_dir, path) = table_file(TABLE);
    let records = WorkshopStore::new(&path).read_all();

    assert_eq!(records.len(), 4);
    assert_eq!(records[1].subject(), "End-to-End AI");
    assert_eq!(records[1].description(), "Train, track and serve models");
    assert_eq!(records[3].subject(), "Quoted \"Name\"");
    assert_eq!(records[3].get("Private"), Some("True"));
    assert_eq!(
        records[0].columns().collect::<Vec<_>>(),
        ["Subject", "Start Date", "Start Time", "Description", "Location", "Private"]
    );
}

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorkshopStore::new(dir.path().join("absent.csv"));
    assert!(store.read_all().is_empty());
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_unchanged_rewrite_is_byte_identical() {
    let (_dir, path) = table_file(TABLE);
    let store = WorkshopStore::new(&path);
    let table = store.load().unwrap().unwrap();
    store.save(&table).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), TABLE);
}

#[test]
fn test_update_touches_only_matching_rows() {
    let (_dir, path) = table_file(TABLE);
    let store = WorkshopStore::new(&path);

    let outcome = store
        .update_description(" Intro to Lakehouse ", "A longer lakehouse description")
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated(2));

    let after = fs::read_to_string(&path).unwrap();
    let before_lines: Vec<&str> = TABLE.split("\r\n").collect();
    let after_lines: Vec<&str> = after.split("\r\n").collect();
    assert_eq!(before_lines.len(), after_lines.len());

    for (i, (b, a)) in before_lines.iter().zip(&after_lines).enumerate() {
        if i == 1 || i == 3 {
            assert!(a.contains("A longer lakehouse description"));
            assert!(!a.contains("Lakehouse basics"));
        } else {
            assert_eq!(b, a);
        }
    }
}

#[test]
fn test_update_keeps_duplicate_columns_apart() {
    let (_dir, path) = table_file("Subject,Description,Location,Notes,Notes\nA,d,u,first,second\n");
    let store = WorkshopStore::new(&path);

    assert_eq!(store.update_description("A", "new").unwrap(), UpdateOutcome::Updated(1));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Subject,Description,Location,Notes,Notes\nA,new,u,first,second\n"
    );
}

#[test]
fn test_short_row_does_not_hide_the_table() {
    let (_dir, path) = table_file(
        "Subject,Description,Location,Private\n\
        A,d,https://e/a,False\n\
        B,d,https://e/b\n",
    );
    let records = WorkshopStore::new(&path).read_all();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("Private"), Some("False"));
    assert_eq!(records[1].location(), "https://e/b");
    assert_eq!(records[1].get("Private"), Some(""));
}

#[test]
fn test_update_with_no_match_leaves_file_alone() {
    let (_dir, path) = table_file(TABLE);
    let store = WorkshopStore::new(&path);
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    let outcome = store.update_description("Unknown Workshop", "x").unwrap();
    assert_eq!(outcome, UpdateOutcome::NoMatch);
    assert_eq!(fs::read_to_string(&path).unwrap(), TABLE);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
}

#[test]
fn test_update_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorkshopStore::new(dir.path().join("absent.csv"));
    assert_eq!(
        store.update_description("A", "x").unwrap(),
        UpdateOutcome::MissingFile
    );
    assert!(!dir.path().join("absent.csv").exists());
}

#[test]
fn test_update_leaves_no_temp_file() {
    let (dir, path) = table_file(TABLE);
    WorkshopStore::new(&path)
        .update_description("End-to-End AI", "New")
        .unwrap();
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["databricks_workshops_EST.csv"]);
}

#[test]
fn test_backup_copies_table() {
    let (_dir, path) = table_file(TABLE);
    let store = WorkshopStore::new(&path);

    let backup = store.backup().expect("backup should succeed");
    let name = backup.file_name().unwrap().to_string_lossy().into_owned();
    let stamp = name
        .strip_prefix("databricks_workshops_EST.csv.backup_")
        .unwrap();

    // YYYYMMDD_HHMMSS
    assert_eq!(stamp.len(), 15);
    assert_eq!(&stamp[8..9], "_");
    assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    assert_eq!(fs::read_to_string(&backup).unwrap(), TABLE);
}

#[test]
fn test_backup_of_missing_file_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorkshopStore::new(dir.path().join("absent.csv"));
    assert!(store.backup().is_none());
}
