//! End-to-end session flows driven by scripted console input.

use labdat::{DataProcessor, Error, LabelConfig, MetadataTable, ScriptedInput};
use polars::prelude::*;

fn sample_data() -> DataFrame {
    df!(
        "c0" => &[0.0_f64, 1.0, 2.0, 3.0],
        "c1" => &[Some(1.0_f64), Some(2.0), Some(3.0), None],
        "c2" => &[4.0_f64, 5.0, 6.0, 7.0]
    )
    .unwrap()
}

fn sample_metadata() -> MetadataTable {
    MetadataTable::new(vec![
        ("columns".to_string(), "time|pressure|temp".to_string()),
        ("col_units".to_string(), "s|bar|degC".to_string()),
        ("operator".to_string(), "lg".to_string()),
        ("start_time".to_string(), "2021-01-01 12:00:00".to_string()),
    ])
}

fn session(inputs: &[&str]) -> DataProcessor<ScriptedInput> {
    DataProcessor::new(
        sample_data(),
        sample_metadata(),
        LabelConfig::default(),
        ScriptedInput::new(inputs.to_vec()),
    )
}

#[test]
fn visualize_declining_save_returns_none() {
    // 1 column, index 1 (pressure), decline the save prompt.
    let mut p = session(&["1", "1", "no"]);
    let saved = p.visualize_data().unwrap();
    assert!(saved.is_none());
}

#[test]
fn visualize_saves_through_the_path_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let good = format!("{}/", dir.path().display());
    let bad = format!("{}/missing/", dir.path().display());

    // 1 column, index 1; save the plot; not in cwd; first path fails and
    // re-prompts, second succeeds.
    let mut p = session(&["1", "1", "yes", "no", &bad, "out", &good, "out"]);
    let saved = p.visualize_data().unwrap();
    assert_eq!(saved.as_deref(), Some("out.png"));
    assert!(dir.path().join("out.png").exists());
}

#[test]
fn save_path_concatenation_is_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    // No trailing separator: the filename is glued straight onto the path.
    let prefix = format!("{}/run", dir.path().display());

    let mut p = session(&["1", "1", "yes", "no", &prefix, "x"]);
    let saved = p.visualize_data().unwrap();
    assert_eq!(saved.as_deref(), Some("x.png"));
    assert!(dir.path().join("runx.png").exists());
}

#[test]
fn rundown_reports_for_selected_columns() {
    // Full option count (2): both columns, no index prompts.
    let mut p = session(&["2"]);
    p.data_rundown().unwrap();
}

#[test]
fn rundown_input_exhaustion_is_explicit() {
    let mut p = session(&[]);
    let err = p.data_rundown().unwrap_err();
    assert!(matches!(err, Error::InputClosed));
}

#[test]
fn timestamp_extraction_rebuilds_the_table() {
    let mut p = session(&["yes", "date"]);
    p.extract_timestamp("start_time").unwrap();

    let keys: Vec<&str> = p
        .metadata()
        .rows()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(
        keys,
        vec!["columns", "col_units", "operator", "start_time", "date"]
    );
    let map = p.metadata_map();
    assert_eq!(map.get("start_time").map(String::as_str), Some("12:00:00"));
    assert_eq!(map.get("date").map(String::as_str), Some("2021-01-01"));

    // The JSON export reflects the rebuilt record, order included.
    let json = p.metadata_json().unwrap();
    let parsed: labdat::MetadataMap = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, map);
}

#[test]
fn visualize_with_missing_units_key_is_key_missing() {
    let mut p = DataProcessor::new(
        sample_data(),
        MetadataTable::new(vec![(
            "columns".to_string(),
            "time|pressure|temp".to_string(),
        )]),
        LabelConfig::default(),
        ScriptedInput::new(["1", "1"]),
    );
    let err = p.visualize_data().unwrap_err();
    assert!(matches!(err, Error::KeyMissing { key } if key == "col_units"));
}

#[test]
fn visualize_without_time_column_fails_before_any_prompt() {
    // No scripted lines: a missing time column must error out before the
    // selection dialog reads anything.
    let mut p = DataProcessor::new(
        sample_data(),
        MetadataTable::new(vec![
            ("columns".to_string(), "a|b|c".to_string()),
            ("col_units".to_string(), "x|y|z".to_string()),
        ]),
        LabelConfig::default(),
        ScriptedInput::new(Vec::<String>::new()),
    );
    let err = p.visualize_data().unwrap_err();
    assert!(matches!(err, Error::ColumnNotFound { column } if column == "time"));
}
