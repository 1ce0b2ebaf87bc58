//! Batch files, rule files and CLI defaults.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fieldmap_map::FieldInput;
use fieldmap_model::RuleSet;
use fieldmap_validate::LoadedEntry;

/// Environment variable naming the mapping directory.
pub const MAPPINGS_DIR_ENV: &str = "FIELDMAP_MAPPINGS_DIR";
pub const DEFAULT_MAPPINGS_DIR: &str = "field_mappings";

/// A batch file row: a bare name or a name with samples.
#[derive(Deserialize)]
#[serde(untagged)]
enum InputRecord {
    Name(String),
    Field(FieldInput),
}

impl From<InputRecord> for FieldInput {
    fn from(record: InputRecord) -> Self {
        match record {
            InputRecord::Name(name) => FieldInput::new(name),
            InputRecord::Field(field) => field,
        }
    }
}

/// Explicit flag first, then the environment value, then the default.
pub fn mappings_dir(explicit: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_MAPPINGS_DIR),
    }
}

pub fn resolve_mappings_dir(explicit: Option<&Path>) -> PathBuf {
    mappings_dir(explicit, std::env::var_os(MAPPINGS_DIR_ENV))
}

pub fn parse_inputs(json: &str) -> serde_json::Result<Vec<FieldInput>> {
    let records: Vec<InputRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(FieldInput::from).collect())
}

pub fn read_inputs(path: &Path) -> Result<Vec<FieldInput>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read batch file {}", path.display()))?;
    parse_inputs(&text).with_context(|| format!("parse batch file {}", path.display()))
}

/// Names from the command line come first, then the batch file rows.
/// Names are trimmed; blank names are dropped.
pub fn collect_inputs(names: &[String], file_inputs: Vec<FieldInput>) -> Vec<FieldInput> {
    names
        .iter()
        .map(FieldInput::new)
        .chain(file_inputs)
        .filter_map(|mut input| {
            let trimmed = input.name.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed.len() != input.name.len() {
                input.name = trimmed.to_string();
            }
            Some(input)
        })
        .collect()
}

pub fn read_entries(path: &Path) -> Result<Vec<LoadedEntry>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read entries {}", path.display()))?;
    LoadedEntry::parse_all(&text).with_context(|| format!("parse entries {}", path.display()))
}

/// Built-in rules unless an override file is given.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => {
            RuleSet::from_path(path).with_context(|| format!("load rules {}", path.display()))
        }
        None => Ok(RuleSet::default()),
    }
}

/// Pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
