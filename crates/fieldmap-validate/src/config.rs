//! Scoring configuration.

use serde::{Deserialize, Serialize};

/// Points deducted from 100 for each failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub placeholder: u32,
    pub naming: u32,
    pub empty_name: u32,
    pub group: u32,
    /// Per phrase whose expected token is missing.
    pub missing_token: u32,
    pub source_characters: u32,
    pub over_simplified: u32,
    pub numeric_suffix: u32,
    /// Per kind rule broken.
    pub kind_mismatch: u32,
    pub rating_summed: u32,
    pub ratio_summed: u32,
    pub currency_not_summed: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            placeholder: 40,
            naming: 20,
            empty_name: 100,
            group: 15,
            missing_token: 15,
            source_characters: 30,
            over_simplified: 10,
            numeric_suffix: 5,
            kind_mismatch: 20,
            rating_summed: 25,
            ratio_summed: 15,
            currency_not_summed: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub weights: ScoreWeights,
    /// Entries scoring below this land on the review list.
    pub review_threshold: u32,
    /// Entries scoring below this get suggestions.
    pub suggestion_threshold: u32,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            review_threshold: 80,
            suggestion_threshold: 70,
        }
    }
}
