//! Validation issue types.
//!
//! Each variant carries only the data its message needs. Severity, the
//! check family and the score weight are derived from the variant.

use std::fmt;

use serde::{Deserialize, Serialize};

use fieldmap_model::{BusinessGroup, DataKind};

use crate::config::ScoreWeights;

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The entry cannot be rated excellent whatever its score.
    Critical,
    /// Should be fixed.
    Error,
    /// Should be reviewed.
    Warning,
}

/// Check family an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Naming,
    Group,
    Semantic,
    Kind,
    Role,
}

impl Check {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Naming => "naming",
            Self::Group => "group",
            Self::Semantic => "semantic",
            Self::Kind => "kind",
            Self::Role => "role",
        }
    }
}

/// What a kind rule expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindRule {
    /// Identifiers and serials lose leading zeros as numbers.
    IdentifierAsString,
    DateAsDatetime,
    FlagAsBoolean,
}

/// Validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum Issue {
    // Naming
    EmptyName,
    Placeholder { pattern: String },
    Naming { detail: String },

    // Group consistency
    GroupMismatch {
        group: BusinessGroup,
        examples: Vec<String>,
    },
    /// The loaded entry named a group outside the known set; it was read as
    /// `general`.
    UnknownGroup { value: String },

    // Semantic accuracy
    MissingToken {
        phrase: String,
        expected: Vec<String>,
    },
    SourceCharacters,
    OverSimplified { source_chars: usize },
    NumericSuffix,

    // Kind consistency
    KindMismatch {
        rule: KindRule,
        keyword: String,
        found: DataKind,
    },

    // Role and aggregation
    RatingSummed { keyword: String },
    RatioSummed { keyword: String },
    CurrencyNotSummed { keyword: String },
}

impl Issue {
    pub fn check(&self) -> Check {
        match self {
            Issue::EmptyName | Issue::Placeholder { .. } | Issue::Naming { .. } => Check::Naming,
            Issue::GroupMismatch { .. } | Issue::UnknownGroup { .. } => Check::Group,
            Issue::MissingToken { .. }
            | Issue::SourceCharacters
            | Issue::OverSimplified { .. }
            | Issue::NumericSuffix => Check::Semantic,
            Issue::KindMismatch { .. } => Check::Kind,
            Issue::RatingSummed { .. }
            | Issue::RatioSummed { .. }
            | Issue::CurrencyNotSummed { .. } => Check::Role,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Issue::EmptyName
            | Issue::Placeholder { .. }
            | Issue::KindMismatch { .. }
            | Issue::RatingSummed { .. } => Severity::Critical,
            Issue::Naming { .. }
            | Issue::MissingToken { .. }
            | Issue::SourceCharacters => Severity::Error,
            Issue::GroupMismatch { .. }
            | Issue::UnknownGroup { .. }
            | Issue::OverSimplified { .. }
            | Issue::NumericSuffix
            | Issue::RatioSummed { .. }
            | Issue::CurrencyNotSummed { .. } => Severity::Warning,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity() == Severity::Critical
    }

    /// Points this issue deducts.
    pub fn weight(&self, weights: &ScoreWeights) -> u32 {
        match self {
            Issue::EmptyName => weights.empty_name,
            Issue::Placeholder { .. } => weights.placeholder,
            Issue::Naming { .. } => weights.naming,
            Issue::GroupMismatch { .. } | Issue::UnknownGroup { .. } => weights.group,
            Issue::MissingToken { .. } => weights.missing_token,
            Issue::SourceCharacters => weights.source_characters,
            Issue::OverSimplified { .. } => weights.over_simplified,
            Issue::NumericSuffix => weights.numeric_suffix,
            Issue::KindMismatch { .. } => weights.kind_mismatch,
            Issue::RatingSummed { .. } => weights.rating_summed,
            Issue::RatioSummed { .. } => weights.ratio_summed,
            Issue::CurrencyNotSummed { .. } => weights.currency_not_summed,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::EmptyName => write!(f, "canonical name is empty"),
            Issue::Placeholder { pattern } => write!(
                f,
                "generic placeholder '{pattern}' carries no business meaning"
            ),
            Issue::Naming { detail } => write!(f, "naming convention: {detail}"),
            Issue::GroupMismatch { group, examples } => {
                if examples.is_empty() {
                    write!(f, "name has no '{group}' vocabulary token")
                } else {
                    write!(
                        f,
                        "name has no '{group}' vocabulary token (e.g. {})",
                        examples.join(", ")
                    )
                }
            }
            Issue::UnknownGroup { value } => {
                write!(f, "unknown group '{value}' was read as general")
            }
            Issue::MissingToken { phrase, expected } => write!(
                f,
                "source contains '{phrase}' but name lacks '{}'",
                expected.join("' or '")
            ),
            Issue::SourceCharacters => write!(f, "name contains untranslated source characters"),
            Issue::OverSimplified { source_chars } => write!(
                f,
                "single-token name for a {source_chars}-character source name is over-simplified"
            ),
            Issue::NumericSuffix => {
                write!(f, "numeric suffix suggests a duplicated definition")
            }
            Issue::KindMismatch {
                rule,
                keyword,
                found,
            } => match rule {
                KindRule::IdentifierAsString => write!(
                    f,
                    "'{keyword}' field is {found}; identifiers must be string to keep leading zeros and letters"
                ),
                KindRule::DateAsDatetime => {
                    write!(f, "'{keyword}' field is {found}; expected datetime")
                }
                KindRule::FlagAsBoolean => {
                    write!(f, "'{keyword}' field is {found}; expected boolean")
                }
            },
            Issue::RatingSummed { keyword } => write!(
                f,
                "'{keyword}' field must not be a summed measure; use a dimension or avg"
            ),
            Issue::RatioSummed { keyword } => {
                write!(f, "'{keyword}' field should use avg or none, not sum")
            }
            Issue::CurrencyNotSummed { keyword } => {
                write!(f, "'{keyword}' is a money amount; sum aggregation is expected")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_critical_and_heavy() {
        let issue = Issue::Placeholder {
            pattern: "field_*".to_string(),
        };
        assert!(issue.is_critical());
        assert_eq!(issue.check(), Check::Naming);
        assert_eq!(issue.weight(&ScoreWeights::default()), 40);
    }

    #[test]
    fn serialized_issue_is_tagged() {
        let issue = Issue::MissingToken {
            phrase: "保费".to_string(),
            expected: vec!["premium".to_string()],
        };
        let json = serde_json::to_value(&issue).expect("serialize");
        assert_eq!(json["issue"], "missing_token");
        assert_eq!(json["phrase"], "保费");
        assert_eq!(
            issue.to_string(),
            "source contains '保费' but name lacks 'premium'"
        );
    }
}
