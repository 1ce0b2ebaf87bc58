//! Quality validation for field classifications.
//!
//! Re-derives what a classification should look like from the source name
//! alone and scores the produced entry against it:
//!
//! - **Naming**: snake_case, length, underscores, placeholders, unit suffixes
//! - **Group**: the name shares a token with the group vocabulary
//! - **Semantic**: expected tokens, untranslated text, over-simplified names
//! - **Kind**: identifiers stay strings, dates are datetimes, flags are booleans
//! - **Role**: ratings are not summed, ratios are averaged, amounts are summed
//!
//! Scores start at 100 and lose each failed check's weight, floored at 0.
//! Validation never fails; a broken entry just scores low.

mod checks;
mod config;
mod issue;
mod loaded;
mod report;

use std::time::Instant;

use tracing::{debug, info};

use fieldmap_map::Tokenizer;
use fieldmap_model::{MappingEntry, RuleSet};

pub use config::{ScoreWeights, ValidatorConfig};
pub use issue::{Check, Issue, KindRule, Severity};
pub use loaded::LoadedEntry;
pub use report::{BatchReport, BatchSummary, QualityTier, ReviewItem, ValidationOutcome};

/// Scores entries against a rule set.
///
/// Shares the rule set (naming convention, keyword vocabularies, expected
/// tokens) with the classifier, so both sides apply the same policy.
#[derive(Debug, Clone)]
pub struct Validator<'a> {
    rules: &'a RuleSet,
    config: ValidatorConfig,
    suggester: Tokenizer,
}

impl<'a> Validator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self::with_config(rules, ValidatorConfig::default())
    }

    pub fn with_config(rules: &'a RuleSet, config: ValidatorConfig) -> Self {
        // First accepted token per phrase drives name suggestions.
        let suggester = Tokenizer::from_pairs(rules.expected_tokens.iter().filter_map(
            |(phrase, tokens)| tokens.first().map(|token| (phrase.clone(), token.clone())),
        ));
        Self {
            rules,
            config,
            suggester,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn validate_entry(&self, entry: &MappingEntry) -> ValidationOutcome {
        self.score(entry, checks::run_all(entry, self.rules))
    }

    /// Like [`Validator::validate_entry`], and also reports a declared group
    /// that was coerced to `general` on load.
    pub fn validate_loaded(&self, loaded: &LoadedEntry) -> ValidationOutcome {
        let mut found = checks::run_all(&loaded.entry, self.rules);
        if let Some(value) = loaded.unknown_group() {
            found.push(Issue::UnknownGroup {
                value: value.to_string(),
            });
        }
        self.score(&loaded.entry, found)
    }

    fn score(&self, entry: &MappingEntry, found: Vec<Issue>) -> ValidationOutcome {
        let weights = &self.config.weights;
        let deducted = found
            .iter()
            .fold(0u32, |total, issue| total.saturating_add(issue.weight(weights)));
        let overall_score = 100u32.saturating_sub(deducted);
        let has_critical_issues = found.iter().any(Issue::is_critical);
        let quality_tier = QualityTier::from_score(overall_score).capped(has_critical_issues);

        let (warnings, issues): (Vec<Issue>, Vec<Issue>) = found
            .into_iter()
            .partition(|issue| issue.severity() == Severity::Warning);

        let mut suggestions = Vec::new();
        if overall_score < self.config.suggestion_threshold {
            suggestions.push("manual review recommended".to_string());
            if let Some(name) = self.suggest_name(&entry.source_name)
                && name != entry.canonical_name
            {
                suggestions.push(format!("suggested name: {name}"));
            }
        }

        debug!(
            field = %entry.source_name,
            canonical = %entry.canonical_name,
            score = overall_score,
            tier = %quality_tier,
            issues = issues.len(),
            warnings = warnings.len(),
            "validated entry"
        );

        ValidationOutcome {
            source_name: entry.source_name.clone(),
            canonical_name: entry.canonical_name.clone(),
            overall_score,
            quality_tier,
            has_critical_issues,
            issues,
            warnings,
            suggestions,
        }
    }

    pub fn validate_batch(&self, entries: &[MappingEntry]) -> BatchReport {
        let started = Instant::now();
        let outcomes = entries
            .iter()
            .map(|entry| self.validate_entry(entry))
            .collect();
        self.report(outcomes, started)
    }

    pub fn validate_loaded_batch(&self, entries: &[LoadedEntry]) -> BatchReport {
        let started = Instant::now();
        let outcomes = entries
            .iter()
            .map(|loaded| self.validate_loaded(loaded))
            .collect();
        self.report(outcomes, started)
    }

    fn report(&self, outcomes: Vec<ValidationOutcome>, started: Instant) -> BatchReport {
        let summary = BatchSummary::from_outcomes(&outcomes, self.config.review_threshold);
        info!(
            entries = summary.total,
            mean_score = summary.mean_score,
            critical = summary.critical_count,
            needs_review = summary.needs_review.len(),
            duration_ms = started.elapsed().as_millis(),
            "validation complete"
        );
        BatchReport { outcomes, summary }
    }

    /// Greedy name built from the expected-token table.
    pub fn suggest_name(&self, source_name: &str) -> Option<String> {
        let joined = self.suggester.tokenize(source_name).joined()?;
        self.rules.naming.normalize(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_model::{Aggregation, BusinessGroup, DataKind, FieldRole};

    fn entry(source: &str, name: &str, group: BusinessGroup, kind: DataKind) -> MappingEntry {
        let mut entry: MappingEntry = serde_json::from_value(serde_json::json!({
            "source_name": source,
            "canonical_name": name,
        }))
        .expect("entry");
        entry.group = group;
        entry.kind = kind;
        entry
    }

    #[test]
    fn clean_entry_is_excellent() {
        let rules = RuleSet::default();
        let validator = Validator::new(&rules);
        let mut premium = entry("签单保费", "written_premium", BusinessGroup::Finance, DataKind::Number);
        premium.role = FieldRole::Measure;
        premium.aggregation = Aggregation::Sum;

        let outcome = validator.validate_entry(&premium);
        assert_eq!(outcome.overall_score, 100);
        assert_eq!(outcome.quality_tier, QualityTier::Excellent);
        assert!(outcome.issues.is_empty());
        assert!(outcome.warnings.is_empty());
        assert!(outcome.suggestions.is_empty());
    }

    #[test]
    fn warnings_and_issues_are_split() {
        let rules = RuleSet::default();
        let validator = Validator::new(&rules);
        let outcome = validator.validate_entry(&entry(
            "结算金额",
            "amount_1",
            BusinessGroup::Finance,
            DataKind::Number,
        ));
        assert_eq!(outcome.overall_score, 95);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.warnings, vec![Issue::NumericSuffix]);
    }

    #[test]
    fn low_score_gets_a_suggested_name() {
        let rules = RuleSet::default();
        let validator = Validator::new(&rules);
        let outcome = validator.validate_entry(&entry(
            "签单保费",
            "qian_dan",
            BusinessGroup::Finance,
            DataKind::Number,
        ));
        // finance vocabulary 15, two missing tokens 30
        assert_eq!(outcome.overall_score, 55);
        assert_eq!(
            outcome.suggestions,
            vec![
                "manual review recommended".to_string(),
                "suggested name: premium_issuance".to_string(),
            ]
        );
    }

    #[test]
    fn empty_name_scores_zero() {
        let rules = RuleSet::default();
        let validator = Validator::new(&rules);
        let outcome = validator.validate_entry(&entry("", "", BusinessGroup::General, DataKind::String));
        assert_eq!(outcome.overall_score, 0);
        assert_eq!(outcome.quality_tier, QualityTier::Poor);
        assert!(outcome.has_critical_issues);
    }
}
