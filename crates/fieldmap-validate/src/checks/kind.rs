//! Kind consistency: identifiers, dates and yes/no flags.

use fieldmap_model::{DataKind, MappingEntry, RuleSet, find_keyword};

use crate::issue::{Issue, KindRule};

pub fn check(entry: &MappingEntry, rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    let source = entry.source_name.as_str();
    let keywords = &rules.keywords;

    if entry.kind == DataKind::Number
        && let Some(keyword) = find_keyword(source, &keywords.identifier)
    {
        issues.push(mismatch(KindRule::IdentifierAsString, keyword, entry.kind));
    }

    if entry.kind != DataKind::Datetime
        && let Some(keyword) = find_keyword(source, &keywords.datetime)
    {
        issues.push(mismatch(KindRule::DateAsDatetime, keyword, entry.kind));
    }

    if entry.kind != DataKind::Boolean
        && let Some(prefix) = keywords
            .boolean_prefixes
            .iter()
            .find(|prefix| !prefix.is_empty() && source.starts_with(prefix.as_str()))
    {
        issues.push(mismatch(KindRule::FlagAsBoolean, prefix, entry.kind));
    }

    issues
}

fn mismatch(rule: KindRule, keyword: &str, found: DataKind) -> Issue {
    Issue::KindMismatch {
        rule,
        keyword: keyword.to_string(),
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: &str, kind: DataKind) -> MappingEntry {
        let mut entry: MappingEntry = serde_json::from_value(serde_json::json!({
            "source_name": source,
            "canonical_name": "x",
        }))
        .expect("entry");
        entry.kind = kind;
        entry
    }

    #[test]
    fn numeric_policy_number_is_critical() {
        let issues = check(&entry("保单号", DataKind::Number), &RuleSet::default());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_critical());
        assert!(matches!(
            issues[0],
            Issue::KindMismatch {
                rule: KindRule::IdentifierAsString,
                ..
            }
        ));
        assert!(check(&entry("保单号", DataKind::String), &RuleSet::default()).is_empty());
    }

    #[test]
    fn dates_must_be_datetime() {
        let issues = check(&entry("签单日期", DataKind::String), &RuleSet::default());
        assert_eq!(
            issues,
            vec![Issue::KindMismatch {
                rule: KindRule::DateAsDatetime,
                keyword: "日期".to_string(),
                found: DataKind::String,
            }]
        );
    }

    #[test]
    fn yes_no_questions_must_be_boolean() {
        let rules = RuleSet::default();
        assert_eq!(check(&entry("是否续保", DataKind::String), &rules).len(), 1);
        assert!(check(&entry("是否续保", DataKind::Boolean), &rules).is_empty());
        assert!(check(&entry("续保是否", DataKind::String), &rules).is_empty());
    }
}
