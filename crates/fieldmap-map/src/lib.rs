//! Field name classification pipeline.
//!
//! Turns spreadsheet column names into [`fieldmap_model::MappingEntry`]
//! records: a canonical identifier, business group, data kind, analytic role
//! and aggregation.

pub mod dedupe;
pub mod engine;
pub mod error;
pub mod exact;
pub mod inference;
pub mod overlay;
pub mod rules;
pub mod seed;
pub mod store;
pub mod tokenizer;
pub mod types;

pub use dedupe::{dedupe_entries, make_unique};
pub use engine::Classifier;
pub use error::StoreError;
pub use inference::{ClassifierOptions, Refinement};
pub use overlay::RoleAssignment;
pub use rules::{RuleEngine, RuleMatch};
pub use seed::SEED_DOMAIN;
pub use store::{
    CUSTOM_DOMAIN, CUSTOM_FILE, LearnRecord, MappingSource, MappingStore, StoreWarning,
    StoredMapping,
};
pub use tokenizer::{Tokenization, Tokenizer};
pub use types::{ClassificationBatch, FieldInput};
