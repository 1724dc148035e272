//! Snapshot change detection between runs.
//!
//! Each extracted snapshot is keyed by its kind and qualified name and
//! compared, by fingerprint, against the snapshot recorded under the same key
//! in the previous completed run.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use weave_common::ContentHash;
use weave_snapshot::Snapshot;

/// Whether a snapshot donates or receives members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// A mixin source.
    Mixin,
    /// A mixin target.
    Target,
}

/// Run-independent name of a declaration.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DeclKey {
    /// Source or target.
    pub kind: DeclKind,
    /// Qualified name.
    pub name: String,
}

impl DeclKey {
    /// The key and fingerprint of `snapshot`.
    pub fn of(snapshot: &Snapshot) -> (Self, ContentHash) {
        match snapshot {
            Snapshot::Source(source) => (
                Self {
                    kind: DeclKind::Mixin,
                    name: source.qualified_name(),
                },
                source.fingerprint(),
            ),
            Snapshot::Target(target) => (
                Self {
                    kind: DeclKind::Target,
                    name: target.qualified_name(),
                },
                target.fingerprint(),
            ),
        }
    }
}

impl fmt::Display for DeclKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DeclKind::Mixin => write!(f, "mixin {}", self.name),
            DeclKind::Target => write!(f, "target {}", self.name),
        }
    }
}

/// How the extracted snapshots differ from the previous run's.
///
/// Every list is sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    /// Declarations not seen in the previous run.
    pub new: Vec<DeclKey>,
    /// Declarations whose snapshot changed.
    pub modified: Vec<DeclKey>,
    /// Declarations of the previous run that are gone.
    pub removed: Vec<DeclKey>,
    /// Declarations whose snapshot is equal to last run's.
    pub unchanged: Vec<DeclKey>,
}

impl ChangeSet {
    /// Returns `true` if nothing was added, modified, or removed.
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    /// Number of declarations that are new or modified.
    pub fn dirty_count(&self) -> usize {
        self.new.len() + self.modified.len()
    }
}

/// Compares fingerprints keyed by declaration against the previous run's.
pub fn detect_changes(
    current: &HashMap<DeclKey, ContentHash>,
    previous: &HashMap<DeclKey, ContentHash>,
) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (key, hash) in current {
        match previous.get(key) {
            Some(old) if old == hash => changes.unchanged.push(key.clone()),
            Some(_) => changes.modified.push(key.clone()),
            None => changes.new.push(key.clone()),
        }
    }
    changes.removed = previous
        .keys()
        .filter(|k| !current.contains_key(*k))
        .cloned()
        .collect();

    changes.new.sort();
    changes.modified.sort();
    changes.removed.sort();
    changes.unchanged.sort();
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(kind: DeclKind, name: &str) -> DeclKey {
        DeclKey {
            kind,
            name: name.to_string(),
        }
    }

    fn map(entries: &[(DeclKey, &[u8])]) -> HashMap<DeclKey, ContentHash> {
        entries
            .iter()
            .map(|(k, content)| (k.clone(), ContentHash::from_bytes(content)))
            .collect()
    }

    #[test]
    fn first_run_is_all_new() {
        let current = map(&[
            (key(DeclKind::Mixin, "A"), b"a"),
            (key(DeclKind::Target, "T"), b"t"),
        ]);
        let cs = detect_changes(&current, &HashMap::new());
        assert_eq!(cs.new, [key(DeclKind::Mixin, "A"), key(DeclKind::Target, "T")]);
        assert_eq!(cs.dirty_count(), 2);
        assert!(!cs.is_empty());
    }

    #[test]
    fn categorizes_every_kind_of_change() {
        let previous = map(&[
            (key(DeclKind::Mixin, "Kept"), b"1"),
            (key(DeclKind::Mixin, "Edited"), b"1"),
            (key(DeclKind::Target, "Gone"), b"1"),
        ]);
        let current = map(&[
            (key(DeclKind::Mixin, "Kept"), b"1"),
            (key(DeclKind::Mixin, "Edited"), b"2"),
            (key(DeclKind::Target, "Fresh"), b"1"),
        ]);
        let cs = detect_changes(&current, &previous);
        assert_eq!(cs.unchanged, [key(DeclKind::Mixin, "Kept")]);
        assert_eq!(cs.modified, [key(DeclKind::Mixin, "Edited")]);
        assert_eq!(cs.new, [key(DeclKind::Target, "Fresh")]);
        assert_eq!(cs.removed, [key(DeclKind::Target, "Gone")]);
    }

    #[test]
    fn identical_runs_are_empty() {
        let snapshot = map(&[(key(DeclKind::Target, "T"), b"t")]);
        let cs = detect_changes(&snapshot, &snapshot);
        assert!(cs.is_empty());
        assert_eq!(cs.unchanged.len(), 1);
    }

    #[test]
    fn kinds_do_not_collide() {
        let previous = map(&[(key(DeclKind::Mixin, "X"), b"x")]);
        let current = map(&[(key(DeclKind::Target, "X"), b"x")]);
        let cs = detect_changes(&current, &previous);
        assert_eq!(cs.new.len(), 1);
        assert_eq!(cs.removed.len(), 1);
    }

    #[test]
    fn display_names_kind() {
        assert_eq!(key(DeclKind::Mixin, "Geometry.Shape").to_string(), "mixin Geometry.Shape");
    }
}
