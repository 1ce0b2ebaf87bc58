//! Classification records.

use serde::{Deserialize, Serialize};

use crate::enums::{Aggregation, BusinessGroup, DataKind, FieldRole, MatchOrigin};

/// One classified field.
///
/// Field aliases accept the legacy layout (`cn_name`, `field_name`, `dtype`)
/// written by earlier tools so old mapping exports can be validated as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Original field name as it appeared in the spreadsheet header.
    #[serde(alias = "cn_name")]
    pub source_name: String,
    /// Generated or looked-up identifier, unique within one batch.
    #[serde(alias = "field_name", alias = "en_name")]
    pub canonical_name: String,
    #[serde(default)]
    pub group: BusinessGroup,
    #[serde(alias = "dtype", default)]
    pub kind: DataKind,
    #[serde(default)]
    pub role: FieldRole,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(alias = "is_mapped", default)]
    pub is_resolved: bool,
    #[serde(default)]
    pub origin: MatchOrigin,
}

impl MappingEntry {
    /// Notes joined for single-line display.
    pub fn notes_text(&self) -> String {
        self.notes.join("; ")
    }
}
