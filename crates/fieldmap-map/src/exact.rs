//! Exact lookup against the merged mapping store.

use fieldmap_model::{MappingEntry, MatchOrigin};

use crate::store::MappingStore;

/// Looks up `name` verbatim. A hit is authoritative: its name, group, kind
/// and description are returned unchanged and no heuristic stage may
/// contradict them.
pub fn lookup(store: &MappingStore, name: &str) -> Option<MappingEntry> {
    let stored = store.get(name)?;
    Some(MappingEntry {
        source_name: name.to_string(),
        canonical_name: stored.en_name.clone(),
        group: stored.group,
        kind: stored.dtype,
        role: Default::default(),
        aggregation: Default::default(),
        description: stored.description.clone(),
        notes: Vec::new(),
        is_resolved: true,
        origin: MatchOrigin::Exact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MappingSource;
    use fieldmap_model::{BusinessGroup, DataKind};

    #[test]
    fn hit_returns_stored_fields() {
        let mut store = MappingStore::new();
        store.push_source("seed", MappingSource::seed());

        let entry = lookup(&store, "三级机构").expect("seeded");
        assert_eq!(entry.canonical_name, "level_3_organization");
        assert_eq!(entry.group, BusinessGroup::Organization);
        assert_eq!(entry.kind, DataKind::String);
        assert_eq!(entry.origin, MatchOrigin::Exact);
        assert!(entry.is_resolved);
    }

    #[test]
    fn lookup_is_exact() {
        let mut store = MappingStore::new();
        store.push_source("seed", MappingSource::seed());
        assert!(lookup(&store, "三级机构 ").is_none());
        assert!(lookup(&store, "三级").is_none());
    }
}
