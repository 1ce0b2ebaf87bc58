//! Mapping store: persisted field name dictionaries.
//!
//! A store is an ordered list of named sources. Each source is one JSON file
//! (one business domain). Lookups go through a merged view in which a later
//! source overrides an earlier one for the same key; load order is the only
//! tie-break.
//!
//! # File format
//!
//! ```json
//! {
//!   "domain": "finance",
//!   "description": "premium and claim fields",
//!   "version": "1.0",
//!   "mappings": {
//!     "签单保费": {"en_name": "written_premium", "group": "finance", "dtype": "number", "description": ""}
//!   },
//!   "learn_history": [
//!     {"source_name": "签单保费", "en_name": "written_premium", "learned_at": "2024-05-01T08:00:00+08:00"}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use fieldmap_model::{BusinessGroup, DataKind, MappingEntry, MatchOrigin};

use crate::error::{Result, StoreError};

/// File written by [`MappingStore::learn`].
pub const CUSTOM_FILE: &str = "custom.json";
pub const CUSTOM_DOMAIN: &str = "custom";

fn default_version() -> String {
    "1.0".to_string()
}

/// Stored classification for one source name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMapping {
    pub en_name: String,
    #[serde(default)]
    pub group: BusinessGroup,
    #[serde(default)]
    pub dtype: DataKind,
    #[serde(default)]
    pub description: String,
}

/// One learned mapping, recorded when it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnRecord {
    #[serde(alias = "cn_field")]
    pub source_name: String,
    pub en_name: String,
    /// RFC 3339 timestamp.
    pub learned_at: String,
}

/// One mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSource {
    pub domain: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub mappings: BTreeMap<String, StoredMapping>,
    #[serde(default)]
    pub learn_history: Vec<LearnRecord>,
}

impl MappingSource {
    pub fn new(domain: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            description: description.into(),
            version: default_version(),
            mappings: BTreeMap::new(),
            learn_history: Vec::new(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::io(path, source))?;
        serde_json::from_str(&text).map_err(|source| StoreError::json(path, source))
    }

    /// Writes the source in full. The file is replaced atomically so a failed
    /// write never leaves a truncated mapping file behind.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|source| StoreError::json(path, source))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::io(&tmp, source))?;
        fs::rename(&tmp, path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            StoreError::io(path, source)
        })
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// A mapping file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreWarning {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone)]
struct NamedSource {
    name: String,
    source: MappingSource,
}

/// Ordered collection of mapping sources with a merged lookup view.
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    sources: Vec<NamedSource>,
    merged: BTreeMap<String, StoredMapping>,
    warnings: Vec<StoreWarning>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` file in `dir`, in file name order.
    ///
    /// Malformed or unreadable files are skipped and recorded as warnings. A
    /// missing directory yields an empty store; a path that exists but is not
    /// a directory is an error.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut store = Self::new();
        store.extend_from_dir(dir)?;
        Ok(store)
    }

    /// Appends the sources found in `dir` after the ones already loaded.
    pub fn extend_from_dir(&mut self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            debug!(dir = %dir.display(), "mapping directory does not exist");
            return Ok(());
        }
        if !dir.is_dir() {
            return Err(StoreError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(|source| StoreError::io(dir, source))? {
            let entry = entry.map_err(|source| StoreError::io(dir, source))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let before = self.sources.len();
        for path in files {
            match MappingSource::from_path(&path) {
                Ok(source) => {
                    let name = path
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_else(|| source.domain.clone());
                    debug!(file = %path.display(), mappings = source.len(), "loaded mapping source");
                    self.push_source(name, source);
                }
                Err(error) => {
                    warn!(file = %path.display(), %error, "skipping mapping source");
                    self.warnings.push(StoreWarning {
                        path,
                        message: error.to_string(),
                    });
                }
            }
        }
        info!(
            dir = %dir.display(),
            sources = self.sources.len() - before,
            skipped = self.warnings.len(),
            mappings = self.merged.len(),
            "mapping store loaded"
        );
        Ok(())
    }

    /// Appends a source; its entries override existing keys.
    pub fn push_source(&mut self, name: impl Into<String>, source: MappingSource) {
        for (key, mapping) in &source.mappings {
            self.merged.insert(key.clone(), mapping.clone());
        }
        self.sources.push(NamedSource {
            name: name.into(),
            source,
        });
    }

    pub fn get(&self, source_name: &str) -> Option<&StoredMapping> {
        self.merged.get(source_name)
    }

    /// Number of distinct keys in the merged view.
    pub fn len(&self) -> usize {
        self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// Source names in load order.
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|named| named.name.as_str())
    }

    pub fn warnings(&self) -> &[StoreWarning] {
        &self.warnings
    }

    /// Persists resolved entries into `dir/custom.json`.
    ///
    /// Entries that came from the store itself ([`MatchOrigin::Exact`]) are
    /// skipped: a stored mapping is never rewritten by a batch, even when
    /// batch uniqueness renamed it.
    ///
    /// The file is read (or created), extended with the entries and a learn
    /// history record per entry, and rewritten in full. Only after the write
    /// succeeds is the updated source installed as the highest-precedence
    /// source in memory; on error the store is unchanged.
    pub fn learn(&mut self, dir: &Path, entries: &[MappingEntry]) -> Result<PathBuf> {
        if dir.exists() && !dir.is_dir() {
            return Err(StoreError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        fs::create_dir_all(dir).map_err(|source| StoreError::io(dir, source))?;
        let path = dir.join(CUSTOM_FILE);

        let mut custom = if path.exists() {
            MappingSource::from_path(&path)?
        } else {
            MappingSource::new(CUSTOM_DOMAIN, "user-confirmed field mappings")
        };

        let learned_at = Local::now().to_rfc3339();
        let mut learned = 0usize;
        let mut skipped = 0usize;
        for entry in entries.iter().filter(|entry| entry.is_resolved) {
            if entry.origin == MatchOrigin::Exact {
                skipped += 1;
                continue;
            }
            let description = if entry.description.is_empty() {
                format!("custom mapping for {}", entry.source_name)
            } else {
                entry.description.clone()
            };
            custom.mappings.insert(
                entry.source_name.clone(),
                StoredMapping {
                    en_name: entry.canonical_name.clone(),
                    group: entry.group,
                    dtype: entry.kind,
                    description,
                },
            );
            custom.learn_history.push(LearnRecord {
                source_name: entry.source_name.clone(),
                en_name: entry.canonical_name.clone(),
                learned_at: learned_at.clone(),
            });
            learned += 1;
        }

        custom.write(&path)?;
        info!(file = %path.display(), learned, skipped, "learned mappings");

        self.sources.retain(|named| named.name != CUSTOM_DOMAIN);
        self.rebuild_merged();
        self.push_source(CUSTOM_DOMAIN, custom);
        Ok(path)
    }

    fn rebuild_merged(&mut self) {
        self.merged.clear();
        for named in &self.sources {
            for (key, mapping) in &named.source.mappings {
                self.merged.insert(key.clone(), mapping.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(domain: &str, pairs: &[(&str, &str)]) -> MappingSource {
        let mut source = MappingSource::new(domain, "");
        for (key, en_name) in pairs {
            source.mappings.insert(
                (*key).to_string(),
                StoredMapping {
                    en_name: (*en_name).to_string(),
                    group: BusinessGroup::General,
                    dtype: DataKind::String,
                    description: String::new(),
                },
            );
        }
        source
    }

    #[test]
    fn later_source_wins() {
        let mut store = MappingStore::new();
        store.push_source("a", source("a", &[("机构", "org"), ("渠道", "channel")]));
        store.push_source("b", source("b", &[("机构", "organization")]));

        assert_eq!(store.get("机构").map(|m| m.en_name.as_str()), Some("organization"));
        assert_eq!(store.get("渠道").map(|m| m.en_name.as_str()), Some("channel"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.source_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn legacy_history_key_is_accepted() {
        let json = r#"{
            "domain": "custom",
            "mappings": {},
            "learn_history": [{"cn_field": "机构", "en_name": "organization", "learned_at": "2024-01-01T00:00:00"}]
        }"#;
        let source: MappingSource = serde_json::from_str(json).expect("parse");
        assert_eq!(source.version, "1.0");
        assert_eq!(source.learn_history[0].source_name, "机构");
    }
}
