use cycletrack_core::repo::history_repo::{format_history_line, parse_history_line};
use cycletrack_core::{HistoryError, HistoryRepository, PeriodRecord, TextFileHistoryRepository};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn record(start: &str, end: &str) -> PeriodRecord {
    PeriodRecord::new(start.parse().unwrap(), end.parse().unwrap())
}

fn history_fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("periods.txt");
    (dir, path)
}

#[test]
fn save_then_load_round_trips_in_order() {
    let (_dir, path) = history_fixture();
    let repo = TextFileHistoryRepository::new(&path);

    let records = vec![
        record("2024-01-01", "2024-01-05"),
        record("2024-01-29", "2024-02-02"),
        record("2024-02-26", "2024-03-01"),
    ];
    repo.save_history(&records).unwrap();

    let loaded = repo.load_history().unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn missing_file_loads_as_empty_history() {
    let (_dir, path) = history_fixture();
    let repo = TextFileHistoryRepository::new(&path);

    let loaded = repo.load_history().unwrap();
    assert!(loaded.is_empty());
    assert!(!path.exists());
}

#[test]
fn saved_file_uses_exact_line_format() {
    let (_dir, path) = history_fixture();
    let repo = TextFileHistoryRepository::new(&path);

    repo.save_history(&[
        record("2024-01-01", "2024-01-05"),
        record("2024-01-29", "2024-02-02"),
    ])
    .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "2024-01-01,2024-01-05\n2024-01-29,2024-02-02\n");
}

#[test]
fn save_replaces_prior_content_completely() {
    let (_dir, path) = history_fixture();
    fs::write(&path, "this is not a period history\n").unwrap();
    let repo = TextFileHistoryRepository::new(&path);

    repo.save_history(&[record("2024-01-01", "2024-01-05")])
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "2024-01-01,2024-01-05\n");
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let (dir, path) = history_fixture();
    let repo = TextFileHistoryRepository::new(&path);

    repo.save_history(&[record("2024-01-01", "2024-01-05")])
        .unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["periods.txt".to_string()]);
}

#[test]
fn load_rejects_single_token_line() {
    let (_dir, path) = history_fixture();
    fs::write(&path, "2024-01-01\n").unwrap();
    let repo = TextFileHistoryRepository::new(&path);

    let err = repo.load_history().unwrap_err();
    assert!(matches!(err, HistoryError::MalformedRecord { line: 1, .. }));
}

#[test]
fn load_rejects_three_token_line() {
    let (_dir, path) = history_fixture();
    fs::write(&path, "2024-01-01,2024-01-05,2024-01-06\n").unwrap();
    let repo = TextFileHistoryRepository::new(&path);

    let err = repo.load_history().unwrap_err();
    assert!(matches!(err, HistoryError::MalformedRecord { line: 1, .. }));
}

#[test]
fn load_reports_the_offending_line_number() {
    let (_dir, path) = history_fixture();
    fs::write(
        &path,
        "2024-01-01,2024-01-05\n2024-13-40,2024-01-06\n2024-02-26,2024-03-01\n",
    )
    .unwrap();
    let repo = TextFileHistoryRepository::new(&path);

    let err = repo.load_history().unwrap_err();
    match err {
        HistoryError::MalformedRecord { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("2024-13-40"), "unexpected: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_rejects_blank_line() {
    let (_dir, path) = history_fixture();
    fs::write(&path, "2024-01-01,2024-01-05\n\n2024-02-26,2024-03-01\n").unwrap();
    let repo = TextFileHistoryRepository::new(&path);

    let err = repo.load_history().unwrap_err();
    assert!(matches!(err, HistoryError::MalformedRecord { line: 2, .. }));
}

#[test]
fn load_tolerates_surrounding_line_whitespace_but_not_token_whitespace() {
    let (_dir, path) = history_fixture();
    fs::write(&path, "  2024-01-01,2024-01-05  \n").unwrap();
    let repo = TextFileHistoryRepository::new(&path);
    assert_eq!(
        repo.load_history().unwrap(),
        vec![record("2024-01-01", "2024-01-05")]
    );

    fs::write(&path, "2024-01-01, 2024-01-05\n").unwrap();
    let err = repo.load_history().unwrap_err();
    assert!(matches!(err, HistoryError::MalformedRecord { line: 1, .. }));
}

#[test]
fn line_codec_round_trips_one_record() {
    let original = record("2024-02-26", "2024-03-01");

    let line = format_history_line(&original);
    assert_eq!(line, "2024-02-26,2024-03-01");
    assert_eq!(parse_history_line(&line, 1).unwrap(), original);
}
