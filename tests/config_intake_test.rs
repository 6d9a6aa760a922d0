/*!
# Configuration and Intake Integration Tests

TOML configuration, encoding detection and the file checks applied before a
submission is accepted.
*/

use std::fs;

use plagiarism_analyzer::core::read_source_file;
use plagiarism_analyzer::{AnalyzerConfig, AnalyzerError, Language, SubmissionIntake};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_utf8_bom_is_stripped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("main.py");
    fs::write(&path, b"\xEF\xBB\xBFprint('hi')\n").unwrap();

    let decoded = read_source_file(&path).unwrap();
    assert_eq!(decoded.text, "print('hi')\n");
    assert_eq!(decoded.encoding, "utf-8");
}

#[test]
fn test_utf16_le_is_detected_by_bom() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("main.js");
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "let x = 1;".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(&path, bytes).unwrap();

    let decoded = read_source_file(&path).unwrap();
    assert_eq!(decoded.text, "let x = 1;");
    assert_eq!(decoded.encoding, "utf-16le");
}

#[test]
fn test_intake_loads_allowed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("solution.JAVA");
    fs::write(&path, "public class A {}\n").unwrap();

    let submission = SubmissionIntake::default()
        .load(&path, "s-1", "hw-1", "alice")
        .unwrap();

    assert_eq!(submission.id, "s-1");
    assert_eq!(submission.assignment_id, "hw-1");
    assert_eq!(submission.student_id, "alice");
    assert_eq!(submission.language, Language::Java);
    assert_eq!(submission.content(), "public class A {}\n");
    assert_eq!(submission.byte_size, 18);
    assert!(submission.analysis().is_none());
}

#[test]
fn test_intake_rejects_disallowed_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "hello").unwrap();

    let err = SubmissionIntake::default().check(&path).unwrap_err();
    assert!(matches!(err, AnalyzerError::ExtensionNotAllowed { ref extension, .. } if extension == "txt"));
}

#[test]
fn test_intake_rejects_oversized_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.py");
    fs::write(&path, "x = 1\n".repeat(10)).unwrap();

    let config = AnalyzerConfig {
        max_file_size: 16,
        ..AnalyzerConfig::default()
    };
    let err = SubmissionIntake::new(config).check(&path).unwrap_err();
    assert!(matches!(err, AnalyzerError::FileTooLarge { size: 60, limit: 16, .. }));
}

#[test]
fn test_intake_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = SubmissionIntake::default()
        .check(&dir.path().join("missing.py"))
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::Io { .. }));
}

#[test]
fn test_config_round_trip_and_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analyzer.toml");

    let config = AnalyzerConfig {
        threshold: 0.8,
        workers: Some(2),
        allowed_extensions: vec!["py".to_string()],
        ..AnalyzerConfig::default()
    };
    config.save_to_file(&path).unwrap();
    assert_eq!(AnalyzerConfig::load_from_file(&path).unwrap(), config);

    fs::write(&path, "threshold = 0.6\n").unwrap();
    let partial = AnalyzerConfig::load_from_file(&path).unwrap();
    assert_eq!(partial.threshold, 0.6);
    assert_eq!(partial.min_block_size, 20);
    assert_eq!(partial.max_file_size, 10 * 1024 * 1024);
    assert!(partial.allows_extension(".TSX"));
}

#[test]
fn test_config_rejects_out_of_range_threshold() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analyzer.toml");
    fs::write(&path, "threshold = 1.5\n").unwrap();

    assert!(AnalyzerConfig::load_from_file(&path).is_err());
}

#[test]
fn test_config_builds_comparator() {
    let config = AnalyzerConfig {
        threshold: 0.9,
        ..AnalyzerConfig::default()
    };
    assert_eq!(config.comparator().unwrap().threshold(), 0.9);

    let zero_workers = AnalyzerConfig {
        workers: Some(0),
        ..AnalyzerConfig::default()
    };
    assert!(zero_workers.validate().is_err());
}
