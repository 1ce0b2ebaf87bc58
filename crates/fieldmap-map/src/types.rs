use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use fieldmap_model::{BusinessGroup, DataKind, MappingEntry};

/// One field to classify: its source name and optional raw cell values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldInput {
    pub name: String,
    #[serde(default, deserialize_with = "samples_as_text")]
    pub samples: Vec<String>,
}

impl FieldInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.samples = samples.into_iter().map(Into::into).collect();
        self
    }
}

/// Spreadsheet exports mix strings, numbers, booleans and nulls in one column.
fn samples_as_text<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .collect())
}

/// Result of classifying a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationBatch {
    /// One entry per input, in input order. Resolved entries have unique
    /// canonical names; unresolved ones have `is_resolved == false` and an
    /// empty name.
    pub entries: Vec<MappingEntry>,
    /// Source names no stage could name, in input order.
    pub unresolved: Vec<String>,
}

impl ClassificationBatch {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn resolved(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter().filter(|entry| entry.is_resolved)
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.len() - self.unresolved.len()
    }

    pub fn kind_counts(&self) -> BTreeMap<DataKind, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn group_counts(&self) -> BTreeMap<BusinessGroup, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.group).or_insert(0) += 1;
        }
        counts
    }
}
