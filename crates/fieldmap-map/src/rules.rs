//! Priority-ordered pattern rule engine.
//!
//! Rules are compiled and ranked once: descending priority, declaration
//! order on ties (stable sort). Classification is a pure function of the
//! field name over that frozen list; the first satisfied rule wins and
//! evaluation stops.

use regex::Regex;

use fieldmap_model::{ModelError, PatternRule, RuleClass, Trigger};

#[derive(Debug, Clone)]
enum Matcher {
    Prefix(String),
    Suffix(String),
    Contains(String),
    AnyOf(Vec<String>),
    Regex(Regex),
}

impl Matcher {
    fn compile(rule: &PatternRule) -> Result<Self, ModelError> {
        Ok(match &rule.trigger {
            Trigger::Prefix(value) => Self::Prefix(value.to_ascii_lowercase()),
            Trigger::Suffix(value) => Self::Suffix(value.to_ascii_lowercase()),
            Trigger::Contains(value) => Self::Contains(value.to_ascii_lowercase()),
            Trigger::AnyOf(values) => {
                Self::AnyOf(values.iter().map(|v| v.to_ascii_lowercase()).collect())
            }
            Trigger::Regex(pattern) => {
                Self::Regex(Regex::new(pattern).map_err(|source| ModelError::InvalidPattern {
                    priority: rule.priority,
                    source,
                })?)
            }
        })
    }

    /// `folded` is the ASCII-lowercased name; regexes see the original and
    /// are case-sensitive unless the pattern opts in with `(?i)`.
    fn is_match(&self, name: &str, folded: &str) -> bool {
        match self {
            Self::Prefix(value) => folded.starts_with(value.as_str()),
            Self::Suffix(value) => folded.ends_with(value.as_str()),
            Self::Contains(value) => folded.contains(value.as_str()),
            Self::AnyOf(values) => values.iter().any(|value| folded.contains(value.as_str())),
            Self::Regex(regex) => regex.is_match(name),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: PatternRule,
    matcher: Matcher,
}

/// A rule that matched a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub rule: &'a PatternRule,
}

impl RuleMatch<'_> {
    pub fn classification(&self) -> &RuleClass {
        &self.rule.classification
    }
}

#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
}

impl RuleEngine {
    pub fn new(rules: &[PatternRule]) -> Result<Self, ModelError> {
        let mut compiled = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    rule: rule.clone(),
                    matcher: Matcher::compile(rule)?,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;
        // `sort_by` is stable: equal priorities keep declaration order.
        compiled.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));
        Ok(Self { rules: compiled })
    }

    /// First rule, by rank, whose trigger matches `name`.
    pub fn classify(&self, name: &str) -> Option<RuleMatch<'_>> {
        let folded = name.to_ascii_lowercase();
        self.rules
            .iter()
            .find(|compiled| compiled.matcher.is_match(name, &folded))
            .map(|compiled| RuleMatch {
                rule: &compiled.rule,
            })
    }

    /// Rules in evaluation order.
    pub fn ranked(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
