//! Validation check modules.
//!
//! Each module audits one aspect of an entry and returns the issues it
//! found. Checks never fail: a broken entry just yields more issues.

mod group;
mod kind;
mod naming;
mod role;
mod semantic;

use fieldmap_model::{MappingEntry, RuleSet};

use crate::issue::Issue;

/// Run every check on one entry, in a fixed order.
pub fn run_all(entry: &MappingEntry, rules: &RuleSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. Canonical name charset, length and placeholders
    issues.extend(naming::check(entry, rules));

    // 2. Name shares a token with the group vocabulary
    issues.extend(group::check(entry, rules));

    // 3. Expected tokens, untranslated text, over-simplification
    issues.extend(semantic::check(entry, rules));

    // 4. Identifiers, dates and flags carry the right kind
    issues.extend(kind::check(entry, rules));

    // 5. Role and aggregation sanity
    issues.extend(role::check(entry, rules));

    issues
}
