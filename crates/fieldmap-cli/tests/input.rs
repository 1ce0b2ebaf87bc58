//! Integration tests for batch input handling.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use fieldmap_cli::input::{
    DEFAULT_MAPPINGS_DIR, collect_inputs, load_rules, mappings_dir, parse_inputs, read_entries,
    read_inputs, write_json,
};
use fieldmap_map::FieldInput;
use fieldmap_model::{BUILTIN_VERSION, DataKind};

fn temp_dir(label: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("fieldmap_cli_{label}_{stamp}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn mappings_dir_precedence() {
    let explicit = Path::new("/data/mappings");
    assert_eq!(
        mappings_dir(Some(explicit), Some(OsString::from("/env/mappings"))),
        PathBuf::from("/data/mappings")
    );
    assert_eq!(
        mappings_dir(None, Some(OsString::from("/env/mappings"))),
        PathBuf::from("/env/mappings")
    );
    assert_eq!(
        mappings_dir(None, Some(OsString::new())),
        PathBuf::from(DEFAULT_MAPPINGS_DIR)
    );
    assert_eq!(mappings_dir(None, None), PathBuf::from(DEFAULT_MAPPINGS_DIR));
}

#[test]
fn batch_rows_may_be_bare_names() {
    let inputs = parse_inputs(r#"["三级机构", {"name": "签单保费", "samples": [100, "2,000"]}]"#)
        .expect("parse");
    assert_eq!(inputs[0], FieldInput::new("三级机构"));
    assert_eq!(inputs[1].name, "签单保费");
    assert_eq!(inputs[1].samples, vec!["100", "2,000"]);
}

#[test]
fn command_line_names_come_first_and_are_trimmed() {
    let names = vec![" 保单号 ".to_string(), "  ".to_string()];
    let file = vec![FieldInput::new("车架号"), FieldInput::new("")];
    let inputs = collect_inputs(&names, file);
    let collected: Vec<&str> = inputs.iter().map(|input| input.name.as_str()).collect();
    assert_eq!(collected, vec!["保单号", "车架号"]);
}

#[test]
fn unreadable_batch_file_names_the_path() {
    let dir = temp_dir("missing_batch");
    let path = dir.join("absent.json");
    let error = read_inputs(&path).unwrap_err();
    assert!(format!("{error:#}").contains("absent.json"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rules_default_to_builtin() {
    let rules = load_rules(None).expect("builtin");
    assert_eq!(rules.version, BUILTIN_VERSION);
}

#[test]
fn rules_override_file_is_loaded() {
    let dir = temp_dir("rules");
    let mut rules = load_rules(None).expect("builtin");
    rules.version = "test-override".to_string();
    let path = dir.join("rules.json");
    write_json(&path, &rules).expect("write rules");

    let loaded = load_rules(Some(&path)).expect("load override");
    assert_eq!(loaded.version, "test-override");
    assert_eq!(loaded.rules.len(), rules.rules.len());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn entries_in_legacy_layout_are_read() {
    let dir = temp_dir("entries");
    let path = dir.join("nested").join("entries.json");
    write_json(
        &path,
        &serde_json::json!([
            {"cn_name": "保单号", "field_name": "policy_number", "group": "policy", "dtype": "string"}
        ]),
    )
    .expect("write entries");

    let entries = read_entries(&path).expect("read entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry.canonical_name, "policy_number");
    assert_eq!(entries[0].entry.kind, DataKind::String);
    assert_eq!(entries[0].unknown_group(), None);
    let _ = fs::remove_dir_all(&dir);
}
