//! Per-entry outcomes and batch summaries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Discrete quality level derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Excellent,
        QualityTier::Good,
        QualityTier::Fair,
        QualityTier::Poor,
    ];

    /// Excellent at 95, good at 80, fair at 65.
    pub fn from_score(score: u32) -> Self {
        match score {
            95.. => QualityTier::Excellent,
            80..=94 => QualityTier::Good,
            65..=79 => QualityTier::Fair,
            _ => QualityTier::Poor,
        }
    }

    /// A critical issue rules out excellent.
    pub fn capped(self, critical: bool) -> Self {
        if critical && self == QualityTier::Excellent {
            QualityTier::Good
        } else {
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Excellent => "excellent",
            QualityTier::Good => "good",
            QualityTier::Fair => "fair",
            QualityTier::Poor => "poor",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation result for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub source_name: String,
    pub canonical_name: String,
    /// 0 to 100.
    pub overall_score: u32,
    pub quality_tier: QualityTier,
    pub has_critical_issues: bool,
    /// Critical and error issues.
    pub issues: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub suggestions: Vec<String>,
}

impl ValidationOutcome {
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().chain(&self.warnings)
    }
}

/// Entry scored below the review threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub source_name: String,
    pub canonical_name: String,
    pub score: u32,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl From<&ValidationOutcome> for ReviewItem {
    fn from(outcome: &ValidationOutcome) -> Self {
        Self {
            source_name: outcome.source_name.clone(),
            canonical_name: outcome.canonical_name.clone(),
            score: outcome.overall_score,
            issues: outcome.issues.iter().map(ToString::to_string).collect(),
            warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
            suggestions: outcome.suggestions.clone(),
        }
    }
}

/// Batch statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub tier_counts: BTreeMap<QualityTier, usize>,
    /// Mean score rounded to two decimals; 0 for an empty batch.
    pub mean_score: f64,
    /// Entries with at least one critical issue.
    pub critical_count: usize,
    pub needs_review: Vec<ReviewItem>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ValidationOutcome], review_threshold: u32) -> Self {
        let mut tier_counts: BTreeMap<QualityTier, usize> =
            QualityTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        let mut total_score: u64 = 0;
        let mut critical_count = 0;
        let mut needs_review = Vec::new();

        for outcome in outcomes {
            *tier_counts.entry(outcome.quality_tier).or_insert(0) += 1;
            total_score += u64::from(outcome.overall_score);
            if outcome.has_critical_issues {
                critical_count += 1;
            }
            if outcome.overall_score < review_threshold {
                needs_review.push(ReviewItem::from(outcome));
            }
        }

        let mean_score = if outcomes.is_empty() {
            0.0
        } else {
            let mean = total_score as f64 / outcomes.len() as f64;
            (mean * 100.0).round() / 100.0
        };

        Self {
            total: outcomes.len(),
            tier_counts,
            mean_score,
            critical_count,
            needs_review,
        }
    }

    pub fn count(&self, tier: QualityTier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }
}

/// Outcomes in input order plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<ValidationOutcome>,
    pub summary: BatchSummary,
}
