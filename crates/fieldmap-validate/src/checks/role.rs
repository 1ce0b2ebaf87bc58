//! Role and aggregation sanity.

use fieldmap_model::{Aggregation, DataKind, FieldRole, MappingEntry, RuleSet, find_keyword};

use crate::issue::Issue;

pub fn check(entry: &MappingEntry, rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();
    let source = entry.source_name.as_str();
    let keywords = &rules.keywords;
    let summed = entry.aggregation == Aggregation::Sum;
    let measure = entry.role == FieldRole::Measure;
    let ratio = find_keyword(source, &keywords.ratio);

    if measure
        && summed
        && let Some(keyword) = find_keyword(source, &keywords.rating)
    {
        issues.push(Issue::RatingSummed {
            keyword: keyword.to_string(),
        });
    }

    if entry.kind == DataKind::Number
        && summed
        && let Some(keyword) = ratio
    {
        issues.push(Issue::RatioSummed {
            keyword: keyword.to_string(),
        });
    }

    // Ratios of money (`费用率`) are averaged, so only plain amounts count.
    if measure
        && !summed
        && ratio.is_none()
        && let Some(keyword) = find_keyword(source, &keywords.currency)
    {
        issues.push(Issue::CurrencyNotSummed {
            keyword: keyword.to_string(),
        });
    }

    issues
}
