//! Tests for loading rule sets from disk.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use fieldmap_model::{ModelError, RuleSet, Trigger};

fn temp_dir(label: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("fieldmap_model_{label}_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn rule_set_loads_from_json_file() {
    let dir = temp_dir("load");
    let mut rules = RuleSet::default();
    rules.version = "custom-7".to_string();
    rules.rules.retain(|rule| matches!(rule.trigger, Trigger::Suffix(_)));
    let path = dir.join("rules.json");
    fs::write(&path, serde_json::to_string_pretty(&rules).expect("serialize")).expect("write");

    let loaded = RuleSet::from_path(&path).expect("load rules");
    assert_eq!(loaded.version, "custom-7");
    assert!(
        loaded
            .rules
            .iter()
            .all(|rule| matches!(rule.trigger, Trigger::Suffix(_)))
    );
    assert_eq!(loaded.phrases, rules.phrases);
    assert_eq!(loaded.group_vocabulary, rules.group_vocabulary);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn minimal_rule_set_fills_optional_sections() {
    let dir = temp_dir("minimal");
    let path = dir.join("rules.json");
    let json = r#"{
        "version": "mini",
        "rules": [
            {
                "trigger": {"match": "suffix", "value": "保费"},
                "priority": 10,
                "classification": {"group": "finance", "kind": "number", "token": "premium"}
            }
        ],
        "phrases": {"保费": "premium"}
    }"#;
    fs::write(&path, json).expect("write");

    let loaded = RuleSet::from_path(&path).expect("load rules");
    assert_eq!(loaded.rules.len(), 1);
    assert_eq!(loaded.naming.max_len, 50);
    assert!(loaded.keywords.quantity.is_empty());
    assert!(loaded.boolean_tokens.is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_rule_file_reports_path() {
    let dir = temp_dir("malformed");
    let path = dir.join("rules.json");
    fs::write(&path, "{ not json").expect("write");

    let error = RuleSet::from_path(&path).unwrap_err();
    match error {
        ModelError::Json { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_rule_file_is_an_io_error() {
    let dir = temp_dir("missing");
    let error = RuleSet::from_path(&dir.join("absent.json")).unwrap_err();
    assert!(matches!(error, ModelError::Io { .. }));
    let _ = fs::remove_dir_all(&dir);
}
