//! Naming convention shared by the classifier and the validator.
//!
//! Canonical names are snake_case ASCII identifiers. The same policy object
//! normalizes generated names and audits produced ones, so the two sides
//! cannot drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy for canonical field identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    /// Maximum identifier length in characters.
    pub max_len: usize,
    /// Names that carry no business meaning at all.
    pub placeholder_names: Vec<String>,
    /// Prefixes marking a generated placeholder (`field_1234`).
    pub placeholder_prefixes: Vec<String>,
    /// Suffixes marking a placeholder head noun (`premium_field`).
    pub placeholder_suffixes: Vec<String>,
    /// Unit suffixes that must not be appended to canonical names.
    pub forbidden_suffixes: Vec<String>,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            max_len: 50,
            placeholder_names: vec!["field".to_string(), "unknown_field".to_string()],
            placeholder_prefixes: vec!["field_".to_string()],
            placeholder_suffixes: vec!["_field".to_string()],
            forbidden_suffixes: vec![
                "_yuan".to_string(),
                "_rmb".to_string(),
                "_cny".to_string(),
            ],
        }
    }
}

/// A single way a name breaks the convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingViolation {
    Empty,
    /// Not `[a-z][a-z0-9_]*`.
    Charset,
    TooLong { len: usize, max: usize },
    EdgeUnderscore,
    DoubleUnderscore,
    /// Generic placeholder such as `field_1234` or `fee_field_2`.
    Placeholder(String),
    ForbiddenSuffix(String),
}

impl NamingViolation {
    /// Critical violations strip the name of all business meaning.
    pub fn is_critical(&self) -> bool {
        matches!(self, NamingViolation::Empty | NamingViolation::Placeholder(_))
    }
}

impl fmt::Display for NamingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingViolation::Empty => write!(f, "canonical name is empty"),
            NamingViolation::Charset => write!(
                f,
                "not snake_case (expected lowercase letters, digits and underscores, starting with a letter)"
            ),
            NamingViolation::TooLong { len, max } => {
                write!(f, "name is {len} characters long, limit is {max}")
            }
            NamingViolation::EdgeUnderscore => {
                write!(f, "name must not start or end with an underscore")
            }
            NamingViolation::DoubleUnderscore => write!(f, "name contains consecutive underscores"),
            NamingViolation::Placeholder(pattern) => write!(
                f,
                "generic placeholder '{pattern}' carries no business meaning"
            ),
            NamingViolation::ForbiddenSuffix(suffix) => {
                write!(f, "unit suffix '{suffix}' is not allowed in canonical names")
            }
        }
    }
}

impl NamingConvention {
    /// Normalizes a generated name into snake_case.
    ///
    /// Returns `None` when nothing usable is left, so callers report the
    /// field as unresolved instead of inventing a name.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let mut name = String::with_capacity(raw.len());
        let mut last_underscore = false;
        for ch in raw.trim().chars().flat_map(char::to_lowercase) {
            let mapped = if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                ch
            } else {
                '_'
            };
            if mapped == '_' {
                if last_underscore {
                    continue;
                }
                last_underscore = true;
            } else {
                last_underscore = false;
            }
            name.push(mapped);
        }
        let mut name = name.trim_matches('_').to_string();

        while let Some(suffix) = self.forbidden_suffix(&name) {
            let cut = name.len() - suffix.len();
            name.truncate(cut);
            name = name.trim_end_matches('_').to_string();
        }

        if name.len() > self.max_len {
            let parts: Vec<&str> = name.split('_').collect();
            if parts.len() > 3 {
                name = parts[..3].join("_");
            }
            if name.len() > self.max_len {
                name.truncate(self.max_len);
            }
            name = name.trim_end_matches('_').to_string();
        }

        if name.is_empty() { None } else { Some(name) }
    }

    /// Returns the forbidden unit suffix the name ends with, if any.
    pub fn forbidden_suffix(&self, name: &str) -> Option<&str> {
        self.forbidden_suffixes
            .iter()
            .map(String::as_str)
            .find(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
    }

    /// Returns the placeholder pattern the name matches, if any.
    pub fn placeholder(&self, name: &str) -> Option<String> {
        if let Some(exact) = self.placeholder_names.iter().find(|p| p.as_str() == name) {
            return Some(exact.clone());
        }
        if let Some(prefix) = self
            .placeholder_prefixes
            .iter()
            .find(|p| name.starts_with(p.as_str()))
        {
            return Some(format!("{prefix}*"));
        }
        for suffix in &self.placeholder_suffixes {
            if name.ends_with(suffix.as_str()) {
                return Some(format!("*{suffix}"));
            }
            // Numbered placeholder: `<head>_field_<n>`.
            let numbered = format!("{suffix}_");
            if let Some(pos) = name.rfind(&numbered) {
                let tail = &name[pos + numbered.len()..];
                if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
                    return Some(format!("*{suffix}_<n>"));
                }
            }
        }
        None
    }

    /// First convention violation found in `name`, in severity-agnostic
    /// check order.
    pub fn check(&self, name: &str) -> Option<NamingViolation> {
        if name.is_empty() {
            return Some(NamingViolation::Empty);
        }
        if !is_snake_case(name) {
            return Some(NamingViolation::Charset);
        }
        let len = name.chars().count();
        if len > self.max_len {
            return Some(NamingViolation::TooLong {
                len,
                max: self.max_len,
            });
        }
        if name.ends_with('_') {
            return Some(NamingViolation::EdgeUnderscore);
        }
        if name.contains("__") {
            return Some(NamingViolation::DoubleUnderscore);
        }
        if let Some(pattern) = self.placeholder(name) {
            return Some(NamingViolation::Placeholder(pattern));
        }
        if let Some(suffix) = self.forbidden_suffix(name) {
            return Some(NamingViolation::ForbiddenSuffix(suffix.to_string()));
        }
        None
    }
}

fn is_snake_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_separators() {
        let naming = NamingConvention::default();
        assert_eq!(
            naming.normalize(" Written--Premium "),
            Some("written_premium".to_string())
        );
        assert_eq!(naming.normalize("签单"), None);
    }

    #[test]
    fn normalize_strips_unit_suffix() {
        let naming = NamingConvention::default();
        assert_eq!(
            naming.normalize("premium_yuan"),
            Some("premium".to_string())
        );
    }

    #[test]
    fn normalize_truncates_long_names_to_three_parts() {
        let naming = NamingConvention::default();
        let raw = "application_confirmation_time_of_the_policy_holder_signature";
        assert_eq!(
            naming.normalize(raw),
            Some("application_confirmation_time".to_string())
        );
    }

    #[test]
    fn placeholders_are_detected() {
        let naming = NamingConvention::default();
        assert!(naming.placeholder("field").is_some());
        assert!(naming.placeholder("field_abc123").is_some());
        assert!(naming.placeholder("premium_field").is_some());
        assert!(naming.placeholder("premium_field_2").is_some());
        assert!(naming.placeholder("field_office").is_some());
        assert!(naming.placeholder("written_premium").is_none());
    }

    #[test]
    fn check_reports_first_violation() {
        let naming = NamingConvention::default();
        assert_eq!(naming.check(""), Some(NamingViolation::Empty));
        assert_eq!(naming.check("Premium"), Some(NamingViolation::Charset));
        assert_eq!(naming.check("_premium"), Some(NamingViolation::Charset));
        assert_eq!(
            naming.check("written__premium"),
            Some(NamingViolation::DoubleUnderscore)
        );
        assert_eq!(
            naming.check("premium_yuan"),
            Some(NamingViolation::ForbiddenSuffix("_yuan".to_string()))
        );
        assert_eq!(naming.check("level_3_organization"), None);
    }

    #[test]
    fn only_empty_and_placeholder_are_critical() {
        assert!(NamingViolation::Empty.is_critical());
        assert!(NamingViolation::Placeholder("field".to_string()).is_critical());
        assert!(!NamingViolation::Charset.is_critical());
    }
}
