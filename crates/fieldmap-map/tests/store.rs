use std::fs;
use std::path::PathBuf;

use fieldmap_map::{Classifier, CUSTOM_FILE, FieldInput, MappingSource, MappingStore, StoreError};
use fieldmap_model::{
    Aggregation, BusinessGroup, DataKind, FieldRole, MappingEntry, MatchOrigin, RuleSet,
};

fn temp_store_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("fieldmap_store_{label}_{stamp}"));
    fs::create_dir_all(&dir).expect("create dir");
    dir
}

fn cleanup_dir(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

fn write_source(dir: &PathBuf, file: &str, domain: &str, pairs: &[(&str, &str)]) {
    let mappings: serde_json::Map<String, serde_json::Value> = pairs
        .iter()
        .map(|(key, en_name)| {
            (
                (*key).to_string(),
                serde_json::json!({"en_name": en_name, "group": "general", "dtype": "string"}),
            )
        })
        .collect();
    let json = serde_json::json!({
        "domain": domain,
        "description": "",
        "version": "1.0",
        "mappings": mappings,
        "learn_history": []
    });
    fs::write(dir.join(file), json.to_string()).expect("write source");
}

fn entry(source: &str, canonical: &str, resolved: bool) -> MappingEntry {
    MappingEntry {
        source_name: source.to_string(),
        canonical_name: canonical.to_string(),
        group: BusinessGroup::Finance,
        kind: DataKind::Number,
        role: FieldRole::Measure,
        aggregation: Aggregation::Sum,
        description: String::new(),
        notes: Vec::new(),
        is_resolved: resolved,
        origin: MatchOrigin::Tokenizer,
    }
}

#[test]
fn files_load_in_name_order_and_later_wins() {
    let dir = temp_store_dir("order");
    write_source(&dir, "b_finance.json", "finance", &[("交易金额", "trade_amount")]);
    write_source(&dir, "a_general.json", "general", &[("交易金额", "amount"), ("备注", "remark")]);

    let store = MappingStore::load_dir(&dir).expect("load store");
    assert_eq!(
        store.source_names().collect::<Vec<_>>(),
        vec!["a_general", "b_finance"]
    );
    assert_eq!(store.get("交易金额").map(|m| m.en_name.as_str()), Some("trade_amount"));
    assert_eq!(store.get("备注").map(|m| m.en_name.as_str()), Some("remark"));
    assert!(store.warnings().is_empty());

    cleanup_dir(&dir);
}

#[test]
fn malformed_files_are_skipped_with_warning() {
    let dir = temp_store_dir("malformed");
    write_source(&dir, "good.json", "good", &[("机构", "organization")]);
    fs::write(dir.join("broken.json"), "{ \"domain\": ").expect("write broken");
    fs::write(dir.join("notes.txt"), "ignored").expect("write txt");

    let store = MappingStore::load_dir(&dir).expect("load store");
    assert_eq!(store.len(), 1);
    assert_eq!(store.warnings().len(), 1);
    assert!(store.warnings()[0].path.ends_with("broken.json"));

    cleanup_dir(&dir);
}

#[test]
fn missing_directory_is_an_empty_store() {
    let dir = temp_store_dir("missing");
    let store = MappingStore::load_dir(&dir.join("absent")).expect("load store");
    assert!(store.is_empty());
    cleanup_dir(&dir);
}

#[test]
fn file_path_is_not_a_directory() {
    let dir = temp_store_dir("file");
    let file = dir.join("plain.json");
    fs::write(&file, "{}").expect("write");
    let error = MappingStore::load_dir(&file).unwrap_err();
    assert!(matches!(error, StoreError::NotADirectory { .. }));
    cleanup_dir(&dir);
}

#[test]
fn learn_writes_custom_file_and_takes_precedence() {
    let dir = temp_store_dir("learn");
    write_source(&dir, "general.json", "general", &[("交易金额", "amount")]);
    let mut store = MappingStore::new();
    store.push_source("seed", MappingSource::seed());
    store.extend_from_dir(&dir).expect("load");

    let entries = vec![
        entry("交易金额", "trade_amount", true),
        entry("备注", "remark", false),
    ];
    let path = store.learn(&dir, &entries).expect("learn");
    assert_eq!(path, dir.join(CUSTOM_FILE));

    let written = MappingSource::from_path(&path).expect("read custom");
    assert_eq!(written.domain, "custom");
    assert_eq!(written.version, "1.0");
    assert_eq!(written.mappings.len(), 1);
    assert_eq!(written.learn_history.len(), 1);
    assert_eq!(written.learn_history[0].source_name, "交易金额");
    assert!(chrono::DateTime::parse_from_rfc3339(&written.learn_history[0].learned_at).is_ok());

    assert_eq!(store.get("交易金额").map(|m| m.en_name.as_str()), Some("trade_amount"));
    assert_eq!(store.source_names().last(), Some("custom"));

    // A fresh load sees the same precedence because custom.json sorts after general.json.
    let reloaded = MappingStore::load_dir(&dir).expect("reload");
    assert_eq!(reloaded.get("交易金额").map(|m| m.en_name.as_str()), Some("trade_amount"));

    cleanup_dir(&dir);
}

#[test]
fn learn_appends_history_across_calls() {
    let dir = temp_store_dir("history");
    let mut store = MappingStore::new();
    store.learn(&dir, &[entry("交易金额", "trade_amount", true)]).expect("first");
    store.learn(&dir, &[entry("交易金额", "transaction_amount", true)]).expect("second");

    let written = MappingSource::from_path(&dir.join(CUSTOM_FILE)).expect("read");
    assert_eq!(written.learn_history.len(), 2);
    assert_eq!(written.mappings["交易金额"].en_name, "transaction_amount");
    assert_eq!(store.source_names().count(), 1);

    cleanup_dir(&dir);
}

#[test]
fn failed_learn_leaves_store_untouched() {
    let dir = temp_store_dir("fail");
    let blocker = dir.join("not_a_dir");
    fs::write(&blocker, "x").expect("write");
    let mut store = MappingStore::new();
    store.push_source("seed", MappingSource::seed());
    let before = store.len();

    let error = store.learn(&blocker, &[entry("交易金额", "trade_amount", true)]);
    assert!(error.is_err());
    assert_eq!(store.len(), before);
    assert!(store.get("交易金额").is_none());

    cleanup_dir(&dir);
}

#[test]
fn learn_never_rewrites_stored_mappings() {
    let dir = temp_store_dir("exact");
    let mut store = MappingStore::new();
    store.push_source("seed", MappingSource::seed());
    let rules = RuleSet::default();

    // Both seed keys map to claim_frequency, so the second is renamed in the batch.
    let mut entries = {
        let classifier = Classifier::new(&store, &rules).expect("compile rules");
        classifier
            .classify_batch(&[FieldInput::new("出险次数"), FieldInput::new("出险频度")])
            .entries
    };
    assert_eq!(entries[1].canonical_name, "claim_frequency_1");
    assert!(entries.iter().all(|entry| entry.origin == MatchOrigin::Exact));
    entries.push(entry("交易金额", "trade_amount", true));

    let path = store.learn(&dir, &entries).expect("learn");
    let written = MappingSource::from_path(&path).expect("read custom");
    assert_eq!(
        written.mappings.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["交易金额"]
    );
    assert_eq!(written.learn_history.len(), 1);
    assert_eq!(store.get("出险频度").map(|m| m.en_name.as_str()), Some("claim_frequency"));

    let mut reloaded = MappingStore::new();
    reloaded.push_source("seed", MappingSource::seed());
    reloaded.extend_from_dir(&dir).expect("reload");
    assert_eq!(
        reloaded.get("出险频度").map(|m| m.en_name.as_str()),
        Some("claim_frequency")
    );
    assert_eq!(
        reloaded.get("交易金额").map(|m| m.en_name.as_str()),
        Some("trade_amount")
    );

    cleanup_dir(&dir);
}
