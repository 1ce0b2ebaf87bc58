//! Type-safe enumerations for field classification.
//!
//! These enums replace the free-form strings used in mapping files
//! (`"group": "finance"`, `"dtype": "number"`) with closed sets the
//! classifier and the validator can match on exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business group a field belongs to.
///
/// Unknown group names in stored mappings deserialize to [`BusinessGroup::General`]
/// so a single hand-edited entry cannot invalidate a whole mapping file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BusinessGroup {
    /// Premiums, claims, fees, ratios and coefficients.
    Finance,
    /// Branches, agents and sales channels.
    Organization,
    /// Vehicle identity and attributes.
    Vehicle,
    /// Coverages and insurance products.
    Product,
    /// Policyholders, insured parties and contact data.
    Customer,
    /// Dates and timestamps.
    Time,
    /// Yes/no indicators.
    Flag,
    /// Policy, endorsement and application identifiers.
    Policy,
    /// Anything without a more specific home.
    #[default]
    #[serde(other)]
    General,
}

impl BusinessGroup {
    pub const ALL: [BusinessGroup; 9] = [
        BusinessGroup::Finance,
        BusinessGroup::Organization,
        BusinessGroup::Vehicle,
        BusinessGroup::Product,
        BusinessGroup::Customer,
        BusinessGroup::Time,
        BusinessGroup::Flag,
        BusinessGroup::Policy,
        BusinessGroup::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessGroup::Finance => "finance",
            BusinessGroup::Organization => "organization",
            BusinessGroup::Vehicle => "vehicle",
            BusinessGroup::Product => "product",
            BusinessGroup::Customer => "customer",
            BusinessGroup::Time => "time",
            BusinessGroup::Flag => "flag",
            BusinessGroup::Policy => "policy",
            BusinessGroup::General => "general",
        }
    }
}

impl fmt::Display for BusinessGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        BusinessGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == normalized)
            .ok_or_else(|| format!("Unknown business group: {s}"))
    }
}

/// Semantic data kind of a field's values.
///
/// Unrecognized `dtype` values in stored mappings deserialize to
/// [`DataKind::String`], which must stay the last variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    #[serde(alias = "float", alias = "int", alias = "numeric")]
    Number,
    #[serde(alias = "date", alias = "timestamp")]
    Datetime,
    #[serde(alias = "bool")]
    Boolean,
    #[default]
    #[serde(other)]
    String,
}

impl DataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::String => "string",
            DataKind::Number => "number",
            DataKind::Datetime => "datetime",
            DataKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "str" | "text" => Ok(DataKind::String),
            "number" | "numeric" | "float" | "int" => Ok(DataKind::Number),
            "datetime" | "date" | "timestamp" => Ok(DataKind::Datetime),
            "boolean" | "bool" => Ok(DataKind::Boolean),
            _ => Err(format!("Unknown data kind: {s}")),
        }
    }
}

/// Analytic role of a field.
///
/// Measures are aggregatable quantities; dimensions are used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Measure,
    #[default]
    Dimension,
}

impl FieldRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::Measure => "measure",
            FieldRole::Dimension => "dimension",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation policy. Only meaningful when the role is [`FieldRole::Measure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Avg,
    #[default]
    None,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Avg => "avg",
            Aggregation::None => "none",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage that produced a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    /// Looked up verbatim from the mapping store.
    Exact,
    /// Taken from the canonical token of a pattern rule.
    Rule,
    /// Assembled by the greedy phrase tokenizer.
    Tokenizer,
    /// Origin not recorded (entries loaded from older files).
    #[default]
    Unknown,
}

impl MatchOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOrigin::Exact => "exact",
            MatchOrigin::Rule => "rule",
            MatchOrigin::Tokenizer => "tokenizer",
            MatchOrigin::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MatchOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_group_falls_back_to_general() {
        let group: BusinessGroup = serde_json::from_str("\"partner\"").unwrap();
        assert_eq!(group, BusinessGroup::General);
    }

    #[test]
    fn kind_accepts_legacy_aliases() {
        let kind: DataKind = serde_json::from_str("\"bool\"").unwrap();
        assert_eq!(kind, DataKind::Boolean);
        assert_eq!("Float".parse::<DataKind>().unwrap(), DataKind::Number);
    }

    #[test]
    fn unknown_kind_falls_back_to_string() {
        let kind: DataKind = serde_json::from_str("\"decimal128\"").unwrap();
        assert_eq!(kind, DataKind::String);
        let kind: DataKind = serde_json::from_str("\"datetime\"").unwrap();
        assert_eq!(kind, DataKind::Datetime);
        assert_eq!(serde_json::to_string(&DataKind::String).unwrap(), "\"string\"");
    }

    #[test]
    fn group_round_trips_through_display() {
        for group in BusinessGroup::ALL {
            assert_eq!(group.to_string().parse::<BusinessGroup>().unwrap(), group);
        }
    }
}
