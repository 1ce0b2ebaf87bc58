//! Semantic accuracy: does the name say what the source name says?

use fieldmap_model::{MappingEntry, RuleSet};

use crate::issue::Issue;

/// Source names longer than this should not collapse into a single token.
const SIMPLE_SOURCE_CHARS: usize = 4;

pub fn check(entry: &MappingEntry, rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    let source = entry.source_name.as_str();
    let name = entry.canonical_name.to_lowercase();

    for (phrase, expected) in &rules.expected_tokens {
        if expected.is_empty() || !source.contains(phrase.as_str()) {
            continue;
        }
        if !expected.iter().any(|token| name.contains(token.as_str())) {
            issues.push(Issue::MissingToken {
                phrase: phrase.clone(),
                expected: expected.clone(),
            });
        }
    }

    if has_source_characters(&name) {
        issues.push(Issue::SourceCharacters);
    }

    let source_chars = source.chars().count();
    if !name.is_empty() && !name.contains('_') && source_chars > SIMPLE_SOURCE_CHARS {
        issues.push(Issue::OverSimplified { source_chars });
    }

    if has_numeric_suffix(&name) {
        issues.push(Issue::NumericSuffix);
    }

    issues
}

/// CJK unified ideographs left untranslated in a canonical name.
pub fn has_source_characters(name: &str) -> bool {
    name.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

/// `amount_1`, `fee_12`: the tail after the last underscore is all digits.
fn has_numeric_suffix(name: &str) -> bool {
    name.rsplit_once('_')
        .is_some_and(|(_, tail)| !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: &str, name: &str) -> MappingEntry {
        serde_json::from_value(serde_json::json!({
            "source_name": source,
            "canonical_name": name,
        }))
        .expect("entry")
    }

    #[test]
    fn accurate_name_has_no_issues() {
        let rules = RuleSet::default();
        assert!(check(&entry("签单保费", "written_premium"), &rules).is_empty());
        assert!(check(&entry("保险起期", "policy_start_date"), &rules).is_empty());
    }

    #[test]
    fn each_missing_phrase_token_is_reported() {
        let rules = RuleSet::default();
        let issues = check(&entry("签单保费", "amount"), &rules);
        let phrases: Vec<&str> = issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::MissingToken { phrase, .. } => Some(phrase.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(phrases, vec!["保费", "签单"]);
    }

    #[test]
    fn untranslated_characters_are_flagged() {
        let issues = check(&entry("备注", "备注_note"), &RuleSet::default());
        assert!(issues.contains(&Issue::SourceCharacters));
    }

    #[test]
    fn long_source_with_one_token_is_over_simplified() {
        let issues = check(&entry("车辆使用性质", "nature"), &RuleSet::default());
        assert!(issues.contains(&Issue::OverSimplified { source_chars: 6 }));
        let short = check(&entry("品牌", "brand"), &RuleSet::default());
        assert!(short.is_empty());
    }

    #[test]
    fn numeric_suffix_is_a_warning_only() {
        let issues = check(&entry("结算金额", "amount_1"), &RuleSet::default());
        assert_eq!(issues, vec![Issue::NumericSuffix]);
        assert!(!has_numeric_suffix("level_3_organization"));
        assert!(!has_numeric_suffix("amount_"));
    }
}
