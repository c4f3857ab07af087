use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

/// Dependency names not yet seen in any scanned line.
///
/// The set only ever shrinks. Removal is idempotent, so files may be
/// scanned in any order on any thread and still leave the same survivors.
#[derive(Debug, Default)]
pub struct CandidateSet {
    names: RwLock<BTreeSet<String>>,
}

impl CandidateSet {
    /// Build the set from declared names; duplicates collapse, order is lexicographic
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: RwLock::new(names.into_iter().map(Into::into).collect()),
        }
    }

    // Removal cannot leave the set half-updated, so a poisoned lock is still usable
    fn read(&self) -> RwLockReadGuard<'_, BTreeSet<String>> {
        self.names.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeSet<String>> {
        self.names.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Remove every candidate that occurs in `line` as a substring.
    ///
    /// Lines are matched under the shared read lock; the write lock is only
    /// taken for a line that hits. Returns the number of candidates removed.
    pub fn eliminate_matches(&self, line: &str) -> usize {
        if !self.read().iter().any(|name| line.contains(name.as_str())) {
            return 0;
        }

        // Another worker may have removed the match in between; retain re-checks
        let mut names = self.write();
        let before = names.len();
        names.retain(|name| {
            let found = line.contains(name.as_str());
            if found {
                trace!("'{}' is used", name);
            }
            !found
        });
        before - names.len()
    }

    /// Surviving names, sorted
    pub fn remaining(&self) -> Vec<String> {
        self.read().iter().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains(name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Consume the set, returning the survivors
    pub fn into_remaining(self) -> Vec<String> {
        self.names
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .into_iter()
            .collect()
    }
}
