//! Entries read from external JSON files.

use serde_json::Value;

use fieldmap_model::{BusinessGroup, MappingEntry};

/// An entry as read from a file, keeping the group text it declared.
///
/// Unknown group names deserialize to `general`; the original text is kept
/// so the validator can report the coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedEntry {
    pub entry: MappingEntry,
    pub declared_group: Option<String>,
}

impl LoadedEntry {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let declared_group = value
            .get("group")
            .and_then(Value::as_str)
            .map(str::to_string);
        let entry = serde_json::from_value(value)?;
        Ok(Self {
            entry,
            declared_group,
        })
    }

    /// Parses a JSON array of entries.
    pub fn parse_all(json: &str) -> serde_json::Result<Vec<Self>> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        values.into_iter().map(Self::from_value).collect()
    }

    /// The declared group text when it names no known group.
    pub fn unknown_group(&self) -> Option<&str> {
        self.declared_group
            .as_deref()
            .filter(|group| group.parse::<BusinessGroup>().is_err())
    }
}
