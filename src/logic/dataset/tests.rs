use super::export::unify_attack_logs;
use super::reader::{read_attack_log, read_table};
use super::record::{severity_stats, Event};
use super::writer::{write_jsonl, write_records};
use super::WindowAggregate;
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_empty_table() {
    let dir = tempdir().unwrap();
    let table = read_table(&dir.path().join("nope.csv"));
    assert!(table.is_empty());
    assert!(table.headers.is_empty());
}

#[test]
fn test_empty_file_yields_empty_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();

    let table = read_table(&path);
    assert!(table.headers.is_empty());
}

#[test]
fn test_read_table_with_quoted_newlines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("alerts.csv");
    fs::write(
        &path,
        "signature,RuleAnnotation.mitre_attack.id\nSig A,\"T1059\nT1086\"\n",
    )
    .unwrap();

    let table = read_table(&path);
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0][1], "T1059\nT1086");
}

#[test]
fn test_read_attack_log_loose_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.csv");
    fs::write(
        &path,
        "Codice Attacco,Data Inizio Attacco,Data Fine Attacco\nA1,2024-01-01 10:00:00,2024-01-01 10:05:00\n",
    )
    .unwrap();

    let attacks = read_attack_log(&path).unwrap();
    assert_eq!(attacks.len(), 1);
    assert_eq!(attacks[0].code, "A1");
    assert_eq!(attacks[0].start, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    assert_eq!(attacks[0].end, Utc.with_ymd_and_hms(2024, 1, 1, 10, 5, 0).unwrap());
}

#[test]
fn test_read_attack_log_bad_timestamp_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.csv");
    fs::write(
        &path,
        "Codice attacco,Data inizio attacco,Data fine attacco\nA1,soon,2024-01-01 10:05:00\n",
    )
    .unwrap();

    assert!(read_attack_log(&path).is_err());
}

#[test]
fn test_unify_sorts_by_start() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("run1.csv");
    let second = dir.path().join("run2.csv");
    let out = dir.path().join("all.csv");

    fs::write(
        &first,
        "Codice attacco,Data inizio attacco,Data fine attacco\nB,2024-01-02 00:00:00,2024-01-02 00:01:00\n",
    )
    .unwrap();
    fs::write(
        &second,
        "Codice attacco,Data inizio attacco,Data fine attacco\nA,2024-01-01 00:00:00,2024-01-01 00:01:00\n",
    )
    .unwrap();

    let written = unify_attack_logs(
        &[first, dir.path().join("missing.csv"), second],
        &out,
    )
    .unwrap();
    assert_eq!(written, 2);

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Codice attacco,Data inizio attacco,Data fine attacco");
    assert!(lines[1].starts_with("A,"));
    assert!(lines[2].starts_with("B,"));
}

#[test]
fn test_write_events_csv_uses_export_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labeled.csv");
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let events = vec![Event::new(ts, "Sig", 50.0).labeled(true)];

    assert_eq!(write_records(&path, &events).unwrap(), 1);
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("_time,signature,RuleAnnotation.mitre_attack.id,severity_id"));
    assert!(content.lines().next().unwrap().ends_with(",is_attack"));

    let row = content.lines().nth(1).unwrap();
    assert!(row.ends_with(",1"));
    assert!(!content.contains("true"));
}

#[test]
fn test_benign_events_written_as_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labeled.csv");
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    write_records(&path, &[Event::new(ts, "Sig", 50.0)]).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.lines().nth(1).unwrap().ends_with(",0"));
}

#[test]
fn test_window_jsonl_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("windows.jsonl");
    let mut window = WindowAggregate::new("A1");
    window.push(&Event::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), "Sig", 75.0));
    window.refresh_severity_stats();

    write_jsonl(&path, &[window.clone()]).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let back: WindowAggregate = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(back, window);
}

#[test]
fn test_severity_stats_empty_is_zero() {
    assert_eq!(severity_stats(&[]), (0.0, 0.0, 0.0));
    assert_eq!(severity_stats(&[25.0, 75.0]), (75.0, 50.0, 25.0));
}
