//! Batch classification engine.
//!
//! Stages per field: exact lookup, then pattern rules, then the greedy
//! tokenizer as the naming fallback. Sample refinement and the role overlay
//! post-process the result. Uniqueness is enforced once over the whole batch
//! after every field has been classified.

use std::time::Instant;

use tracing::{debug, info};

use fieldmap_model::{
    BusinessGroup, DataKind, MappingEntry, MatchOrigin, ModelError, RuleSet,
};

use crate::dedupe::dedupe_entries;
use crate::exact;
use crate::inference::{self, ClassifierOptions};
use crate::overlay;
use crate::rules::RuleEngine;
use crate::store::MappingStore;
use crate::tokenizer::Tokenizer;
use crate::types::{ClassificationBatch, FieldInput};

/// Classifies field names against a mapping store and a rule set.
///
/// Both are borrowed: the classifier never mutates the store, and learning
/// new mappings is a separate step on [`MappingStore::learn`].
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    store: &'a MappingStore,
    rules: &'a RuleSet,
    engine: RuleEngine,
    tokenizer: Tokenizer,
    options: ClassifierOptions,
}

impl<'a> Classifier<'a> {
    /// Compiles the rule set. Fails only on an invalid regex trigger.
    pub fn new(store: &'a MappingStore, rules: &'a RuleSet) -> Result<Self, ModelError> {
        Ok(Self {
            store,
            rules,
            engine: RuleEngine::new(&rules.rules)?,
            tokenizer: Tokenizer::new(&rules.phrases),
            options: ClassifierOptions::default(),
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: ClassifierOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    pub fn rule_engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Classifies one field without batch uniqueness.
    ///
    /// Always yields an entry. When no stage can produce a name the entry has
    /// `is_resolved == false` and an empty canonical name, but still carries
    /// the group, refined kind, role and aggregation derived for it.
    pub fn classify_field(&self, input: &FieldInput) -> MappingEntry {
        let name = input.name.as_str();

        if let Some(mut entry) = exact::lookup(self.store, name) {
            let assigned = overlay::assign(name, entry.kind, &self.rules.keywords);
            entry.role = assigned.role;
            entry.aggregation = assigned.aggregation;
            entry.notes = assigned.notes;
            debug!(field = %name, stage = "exact", canonical = %entry.canonical_name, "classified field");
            return entry;
        }

        let hit = self.engine.classify(name);
        let (group, kind, token) = match hit {
            Some(hit) => {
                let class = hit.classification();
                (class.group, class.kind, class.token.clone())
            }
            None => (BusinessGroup::General, DataKind::String, None),
        };

        let (raw, origin) = match token {
            Some(token) => (Some(token), MatchOrigin::Rule),
            None => (
                self.tokenizer.tokenize(name).joined(),
                MatchOrigin::Tokenizer,
            ),
        };
        let canonical = raw.and_then(|raw| self.rules.naming.normalize(&raw));

        let refinement = inference::refine(name, kind, &input.samples, self.rules, &self.options);
        let assigned = overlay::assign(name, refinement.kind, &self.rules.keywords);
        let mut notes = refinement.notes;
        notes.extend(assigned.notes);

        let (canonical_name, origin, is_resolved) = match canonical {
            Some(canonical) => {
                debug!(
                    field = %name,
                    stage = origin.as_str(),
                    rule_priority = hit.map(|hit| hit.rule.priority),
                    canonical = %canonical,
                    kind = %refinement.kind,
                    "classified field"
                );
                (canonical, origin, true)
            }
            None => {
                debug!(field = %name, matched_rule = hit.is_some(), kind = %refinement.kind, "field unresolved");
                notes.push("no rule or phrase produced a name".to_string());
                (String::new(), MatchOrigin::Unknown, false)
            }
        };

        MappingEntry {
            source_name: name.to_string(),
            canonical_name,
            group,
            kind: refinement.kind,
            role: assigned.role,
            aggregation: assigned.aggregation,
            description: describe(name, refinement.kind),
            notes,
            is_resolved,
            origin,
        }
    }

    /// Classifies all inputs, then makes canonical names unique across the
    /// batch in input order. Unresolved fields stay in place in `entries`
    /// and are also listed by name in `unresolved`.
    pub fn classify_batch(&self, inputs: &[FieldInput]) -> ClassificationBatch {
        let started = Instant::now();
        let mut entries: Vec<MappingEntry> =
            inputs.iter().map(|input| self.classify_field(input)).collect();
        let unresolved: Vec<String> = entries
            .iter()
            .filter(|entry| !entry.is_resolved)
            .map(|entry| entry.source_name.clone())
            .collect();
        let renamed = dedupe_entries(&mut entries);
        info!(
            fields = inputs.len(),
            resolved = entries.len() - unresolved.len(),
            unresolved = unresolved.len(),
            renamed,
            duration_ms = started.elapsed().as_millis(),
            "classification complete"
        );
        ClassificationBatch {
            entries,
            unresolved,
        }
    }
}

fn describe(name: &str, kind: DataKind) -> String {
    match kind {
        DataKind::Number => {
            format!("{name}: numeric value, aggregatable by time, organization or other dimensions")
        }
        DataKind::Datetime => format!("{name}: time field for time-series statistics and trends"),
        DataKind::String | DataKind::Boolean => {
            format!("{name}: categorical field for grouping and dimension statistics")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_model::{Aggregation, FieldRole};

    #[test]
    fn exact_hit_skips_refinement() {
        let mut store = MappingStore::new();
        store.push_source("seed", crate::store::MappingSource::seed());
        let rules = RuleSet::default();
        let classifier = Classifier::new(&store, &rules).unwrap();

        let input = FieldInput::new("保单号").with_samples(["2024-01-01", "2024-01-02"]);
        let entry = classifier.classify_field(&input);
        assert_eq!(entry.kind, DataKind::String);
        assert_eq!(entry.origin, MatchOrigin::Exact);
        assert_eq!(entry.role, FieldRole::Dimension);
    }

    #[test]
    fn rule_token_is_used_verbatim() {
        let store = MappingStore::new();
        let rules = RuleSet::default();
        let classifier = Classifier::new(&store, &rules).unwrap();

        let entry = classifier.classify_field(&FieldInput::new("二手车架号"));
        assert_eq!(entry.canonical_name, "vin");
        assert_eq!(entry.origin, MatchOrigin::Rule);
        assert_eq!(entry.group, BusinessGroup::Vehicle);
    }

    #[test]
    fn unmatched_name_is_kept_as_unresolved_entry() {
        let store = MappingStore::new();
        let rules = RuleSet::default();
        let classifier = Classifier::new(&store, &rules).unwrap();

        let entry = classifier.classify_field(&FieldInput::new("备注"));
        assert!(!entry.is_resolved);
        assert!(entry.canonical_name.is_empty());
        assert_eq!(entry.origin, MatchOrigin::Unknown);

        let batch = classifier.classify_batch(&[FieldInput::new("备注"), FieldInput::new("机构")]);
        assert_eq!(batch.unresolved, vec!["备注"]);
        assert_eq!(batch.entries.len(), 2);
        assert_eq!(batch.entries[0].source_name, "备注");
        assert!(!batch.entries[0].is_resolved);
        assert_eq!(batch.entries[1].canonical_name, "organization");
        assert_eq!(batch.entries[1].aggregation, Aggregation::None);
    }

    #[test]
    fn unresolved_entry_still_carries_sample_kind() {
        let store = MappingStore::new();
        let rules = RuleSet::default();
        let classifier = Classifier::new(&store, &rules).unwrap();

        let input = FieldInput::new("备注").with_samples(["2024-03-01", "2024-03-02"]);
        let entry = classifier.classify_field(&input);
        assert!(!entry.is_resolved);
        assert_eq!(entry.kind, DataKind::Datetime);
        assert_eq!(entry.role, FieldRole::Dimension);
        assert_eq!(entry.group, BusinessGroup::General);
    }
}
