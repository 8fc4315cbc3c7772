use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::key::ProblemKey;

/// Flat completion flags for one user, keyed by positional `ProblemKey`.
///
/// Keys are not checked against any curriculum: entries for problems that no
/// longer exist are kept and still count as completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMap(BTreeMap<ProblemKey, bool>);

impl CompletionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the flag for `key`, returning the previous value.
    pub fn set(&mut self, key: ProblemKey, completed: bool) -> Option<bool> {
        self.0.insert(key, completed)
    }

    #[must_use]
    pub fn get(&self, key: ProblemKey) -> Option<bool> {
        self.0.get(&key).copied()
    }

    /// Missing keys read as not completed.
    #[must_use]
    pub fn is_completed(&self, key: ProblemKey) -> bool {
        self.get(key).unwrap_or(false)
    }

    /// Number of `true` entries, including stale keys.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProblemKey, bool)> + '_ {
        self.0.iter().map(|(key, done)| (*key, *done))
    }

    /// Applies every entry of `other` on top of `self`; keys absent from
    /// `other` are left untouched.
    pub fn merge_from(&mut self, other: &CompletionMap) {
        for (key, done) in other.iter() {
            self.0.insert(key, done);
        }
    }
}

impl FromIterator<(ProblemKey, bool)> for CompletionMap {
    fn from_iter<I: IntoIterator<Item = (ProblemKey, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
