//! Rule vocabulary shared by the classifier and the validator.
//!
//! A [`RuleSet`] is plain data: pattern rules, the phrase dictionary used by
//! the tokenizer, keyword vocabularies and the naming policy. It is built once
//! (from the built-in tables or a JSON file) and passed by reference into the
//! components that need it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::{BusinessGroup, DataKind};
use crate::error::{ModelError, Result};
use crate::naming::NamingConvention;

/// How a pattern rule recognizes a field name.
///
/// Literal triggers compare ASCII letters case-insensitively. Regex triggers
/// are case-sensitive; a pattern that wants folding says so with `(?i)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum Trigger {
    Prefix(String),
    Suffix(String),
    Contains(String),
    /// Matches when any of the phrases occurs in the name.
    AnyOf(Vec<String>),
    Regex(String),
}

impl Trigger {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Trigger::Prefix(_) => "prefix",
            Trigger::Suffix(_) => "suffix",
            Trigger::Contains(_) => "contains",
            Trigger::AnyOf(_) => "any_of",
            Trigger::Regex(_) => "regex",
        }
    }

    /// Human-readable pattern text for listings.
    pub fn pattern(&self) -> String {
        match self {
            Trigger::Prefix(value) => format!("{value}*"),
            Trigger::Suffix(value) => format!("*{value}"),
            Trigger::Contains(value) => format!("*{value}*"),
            Trigger::AnyOf(values) => values.join(" | "),
            Trigger::Regex(value) => value.clone(),
        }
    }
}

/// Classification assigned by a matching rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleClass {
    pub group: BusinessGroup,
    pub kind: DataKind,
    /// Canonical name to use verbatim. `None` defers naming to the tokenizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub trigger: Trigger,
    pub priority: i32,
    pub classification: RuleClass,
}

/// Keyword vocabularies matched by substring against source names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSets {
    /// Names that plausibly hold quantities; gates numeric upgrades.
    pub quantity: Vec<String>,
    /// Scores, grades and coefficients: never summed measures.
    pub rating: Vec<String>,
    /// Ratios and discounts: averaged, not summed.
    pub ratio: Vec<String>,
    /// Money amounts: summed.
    pub currency: Vec<String>,
    /// Identifiers and serials that must stay strings.
    pub identifier: Vec<String>,
    /// Date and time markers that require a datetime kind.
    pub datetime: Vec<String>,
    /// Prefixes of yes/no questions that require a boolean kind.
    pub boolean_prefixes: Vec<String>,
}

/// Returns the first keyword contained in `name`.
pub fn find_keyword<'a>(name: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .map(String::as_str)
        .find(|keyword| !keyword.is_empty() && name.contains(keyword))
}

pub fn contains_keyword(name: &str, keywords: &[String]) -> bool {
    find_keyword(name, keywords).is_some()
}

/// Immutable, versioned classification vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub version: String,
    #[serde(default)]
    pub naming: NamingConvention,
    /// Pattern rules in declaration order. Ranking happens in the engine.
    pub rules: Vec<PatternRule>,
    /// Phrase to token dictionary for the greedy tokenizer.
    pub phrases: BTreeMap<String, String>,
    #[serde(default)]
    pub keywords: KeywordSets,
    /// Phrase to accepted canonical tokens, used by the semantic check.
    #[serde(default)]
    pub expected_tokens: BTreeMap<String, Vec<String>>,
    /// Controlled vocabulary per business group.
    #[serde(default)]
    pub group_vocabulary: BTreeMap<BusinessGroup, Vec<String>>,
    /// Normalized sample values recognized as yes/no answers.
    #[serde(default)]
    pub boolean_tokens: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        crate::defaults::builtin_rule_set()
    }
}

impl RuleSet {
    /// Loads a rule set from a JSON file and validates it.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules: RuleSet = serde_json::from_str(&text).map_err(|source| ModelError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        rules.validate()?;
        Ok(rules)
    }

    /// Checks structural consistency: non-empty version, compilable regex
    /// triggers, non-empty literal triggers and phrases.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(ModelError::InvalidRuleSet(
                "rule set version must not be empty".to_string(),
            ));
        }
        if self.naming.max_len == 0 {
            return Err(ModelError::InvalidRuleSet(
                "naming.max_len must be positive".to_string(),
            ));
        }
        for rule in &self.rules {
            match &rule.trigger {
                Trigger::Regex(pattern) => {
                    regex::Regex::new(pattern).map_err(|source| ModelError::InvalidPattern {
                        priority: rule.priority,
                        source,
                    })?;
                }
                Trigger::Prefix(value) | Trigger::Suffix(value) | Trigger::Contains(value) => {
                    if value.is_empty() {
                        return Err(ModelError::InvalidRuleSet(format!(
                            "empty {} trigger at priority {}",
                            rule.trigger.kind_label(),
                            rule.priority
                        )));
                    }
                }
                Trigger::AnyOf(values) => {
                    if values.is_empty() || values.iter().any(String::is_empty) {
                        return Err(ModelError::InvalidRuleSet(format!(
                            "any_of trigger at priority {} needs non-empty phrases",
                            rule.priority
                        )));
                    }
                }
            }
        }
        if let Some((phrase, _)) = self
            .phrases
            .iter()
            .find(|(phrase, token)| phrase.is_empty() || token.is_empty())
        {
            return Err(ModelError::InvalidRuleSet(format!(
                "phrase dictionary entry '{phrase}' is incomplete"
            )));
        }
        Ok(())
    }

    /// Vocabulary for a group. Empty for groups without a controlled list.
    pub fn vocabulary(&self, group: BusinessGroup) -> &[String] {
        self.group_vocabulary
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True when the normalized sample value is a known yes/no answer.
    pub fn is_boolean_token(&self, value: &str) -> bool {
        self.boolean_tokens.iter().any(|token| token == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rule_set_is_valid() {
        let rules = RuleSet::default();
        rules.validate().expect("builtin rules validate");
        assert!(!rules.rules.is_empty());
        assert!(rules.phrases.contains_key("三级机构"));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let mut rules = RuleSet::default();
        rules.rules.push(PatternRule {
            trigger: Trigger::Regex("(unclosed".to_string()),
            priority: 42,
            classification: RuleClass {
                group: BusinessGroup::General,
                kind: DataKind::String,
                token: None,
            },
        });
        let error = rules.validate().unwrap_err();
        assert!(matches!(error, ModelError::InvalidPattern { priority: 42, .. }));
    }

    #[test]
    fn trigger_serializes_as_tagged_value() {
        let trigger = Trigger::Suffix("保费".to_string());
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json, serde_json::json!({"match": "suffix", "value": "保费"}));
    }

    #[test]
    fn find_keyword_returns_first_declared_hit() {
        let keywords = vec!["率".to_string(), "费用".to_string()];
        assert_eq!(find_keyword("费用率", &keywords), Some("率"));
        assert_eq!(find_keyword("机构", &keywords), None);
    }
}
