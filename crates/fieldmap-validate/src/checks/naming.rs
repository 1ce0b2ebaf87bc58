//! Canonical name convention check.

use fieldmap_model::{MappingEntry, NamingViolation, RuleSet};

use crate::issue::Issue;

pub fn check(entry: &MappingEntry, rules: &RuleSet) -> Option<Issue> {
    let violation = rules.naming.check(&entry.canonical_name)?;
    Some(match violation {
        NamingViolation::Empty => Issue::EmptyName,
        NamingViolation::Placeholder(pattern) => Issue::Placeholder { pattern },
        other => Issue::Naming {
            detail: other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> MappingEntry {
        serde_json::from_value(serde_json::json!({
            "source_name": "测试",
            "canonical_name": name,
        }))
        .expect("entry")
    }

    #[test]
    fn clean_name_passes() {
        assert_eq!(check(&entry("written_premium"), &RuleSet::default()), None);
    }

    #[test]
    fn placeholder_variants_are_flagged() {
        let rules = RuleSet::default();
        for name in ["field", "unknown_field", "field_abc123", "premium_field", "fee_field_2"] {
            assert!(
                matches!(check(&entry(name), &rules), Some(Issue::Placeholder { .. })),
                "{name}"
            );
        }
    }

    #[test]
    fn unit_suffix_is_a_plain_naming_issue() {
        let issue = check(&entry("premium_yuan"), &RuleSet::default());
        assert!(matches!(issue, Some(Issue::Naming { ref detail }) if detail.contains("_yuan")));
    }

    #[test]
    fn empty_name_is_its_own_issue() {
        assert_eq!(check(&entry(""), &RuleSet::default()), Some(Issue::EmptyName));
    }
}
