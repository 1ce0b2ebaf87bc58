//! Batch-wide uniqueness of canonical names.

use std::collections::{BTreeMap, BTreeSet};

use fieldmap_model::MappingEntry;

/// Makes names unique in input order.
///
/// The first occurrence of a name is kept. Each later occurrence gets
/// `_<n>` appended, with `n` counting up from 1 per base name. A candidate
/// that is already taken (because an input literally used it) is skipped,
/// so the output never contains duplicates.
pub fn make_unique<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counters: BTreeMap<String, usize> = BTreeMap::new();
    let mut taken: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::new();
    for name in names {
        let name = name.into();
        let unique = if taken.contains(&name) {
            let counter = counters.entry(name.clone()).or_insert(0);
            loop {
                *counter += 1;
                let candidate = format!("{name}_{counter}");
                if !taken.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            name
        };
        taken.insert(unique.clone());
        out.push(unique);
    }
    out
}

/// Renames colliding entries in place; returns how many were renamed.
///
/// Unresolved entries have no name to protect and are left alone.
pub fn dedupe_entries(entries: &mut [MappingEntry]) -> usize {
    let resolved: Vec<&mut MappingEntry> =
        entries.iter_mut().filter(|entry| entry.is_resolved).collect();
    let unique = make_unique(resolved.iter().map(|entry| entry.canonical_name.clone()));
    let mut renamed = 0;
    for (entry, name) in resolved.into_iter().zip(unique) {
        if entry.canonical_name != name {
            entry
                .notes
                .push(format!("renamed from '{}' to keep names unique", entry.canonical_name));
            entry.canonical_name = name;
            renamed += 1;
        }
    }
    renamed
}
