//! Group vocabulary check.

use std::collections::BTreeSet;

use fieldmap_model::{BusinessGroup, MappingEntry, RuleSet};

use crate::issue::Issue;

/// The name must share a whole `_`-separated token with the vocabulary of
/// its group. `general` and groups without a vocabulary always pass.
pub fn check(entry: &MappingEntry, rules: &RuleSet) -> Option<Issue> {
    if entry.group == BusinessGroup::General {
        return None;
    }
    let vocabulary = rules.vocabulary(entry.group);
    if vocabulary.is_empty() {
        return None;
    }
    let lowered = entry.canonical_name.to_lowercase();
    let tokens: BTreeSet<&str> = lowered.split('_').collect();
    if vocabulary.iter().any(|term| tokens.contains(term.as_str())) {
        return None;
    }
    Some(Issue::GroupMismatch {
        group: entry.group,
        examples: vocabulary.iter().take(3).cloned().collect(),
    })
}
