//! DeprecationRegistry — append-only collector for one test run.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use depwatch_core::types::{Deprecation, GroupCounts};

/// Collects every captured deprecation in insertion order. Unbounded.
#[derive(Debug, Default)]
pub struct DeprecationRegistry {
    records: Mutex<Vec<Deprecation>>,
}

impl DeprecationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one occurrence.
    pub fn record(&self, deprecation: Deprecation) {
        self.lock().push(deprecation);
    }

    /// Immutable copy of everything collected so far.
    pub fn snapshot(&self) -> DeprecationSnapshot {
        DeprecationSnapshot::from(self.lock().clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Records stay valid after a panic poisoned the lock.
    fn lock(&self) -> MutexGuard<'_, Vec<Deprecation>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read-only view of the registry at one point in time. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DeprecationSnapshot {
    records: Arc<[Deprecation]>,
}

impl DeprecationSnapshot {
    pub fn records(&self) -> &[Deprecation] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Deprecation> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn group_counts(&self) -> GroupCounts {
        let mut counts = GroupCounts::default();
        for record in self.records.iter() {
            counts.add(record.group());
        }
        counts
    }
}

impl Default for DeprecationSnapshot {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl From<Vec<Deprecation>> for DeprecationSnapshot {
    fn from(records: Vec<Deprecation>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl<'a> IntoIterator for &'a DeprecationSnapshot {
    type Item = &'a Deprecation;
    type IntoIter = std::slice::Iter<'a, Deprecation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
