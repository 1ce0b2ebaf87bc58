use std::path::PathBuf;

use fieldmap_map::{ClassificationBatch, StoreWarning};
use fieldmap_validate::BatchReport;

#[derive(Debug)]
pub struct ClassifyResult {
    pub batch: ClassificationBatch,
    pub report: Option<BatchReport>,
    /// Mapping sources in load order.
    pub sources: Vec<String>,
    pub store_warnings: Vec<StoreWarning>,
    pub output: Option<PathBuf>,
    pub learned: Option<PathBuf>,
    /// Set when `--learn` was requested and persisting failed.
    pub learn_error: Option<String>,
}

impl ClassifyResult {
    pub fn has_errors(&self) -> bool {
        !self.batch.is_complete() || self.learn_error.is_some()
    }
}

#[derive(Debug)]
pub struct ValidateResult {
    pub report: BatchReport,
    pub output: Option<PathBuf>,
}
