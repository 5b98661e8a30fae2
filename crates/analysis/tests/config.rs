//! Configuration files on disk.

use std::io::Write;

use flowcorr_analysis::{AnalysisConfig, AnalysisError, LogFormat};
use tempfile::NamedTempFile;

#[test]
fn test_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"sweep": {{"prefix": "R1", "separator": "_"}}, "logging": {{"filter": "debug", "format": "compact", "with_target": false}}}}"#
    )
    .unwrap();

    let config = AnalysisConfig::from_path(file.path()).unwrap();
    assert_eq!(config.sweep.result_name("psd1"), "R1_psd1");
    assert_eq!(config.logging.filter, "debug");
    assert_eq!(config.logging.format, LogFormat::Compact);
    assert!(!config.logging.with_target);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = AnalysisConfig::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, AnalysisError::Io(_)));
}

#[test]
fn test_round_trip_through_serde() {
    let config = AnalysisConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"format\":\"pretty\""));
    assert_eq!(AnalysisConfig::from_json_str(&json).unwrap(), config);
}
