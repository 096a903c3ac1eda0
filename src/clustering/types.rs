//! Data types shared by the builder and the aggregator.

use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::records::{MaintenanceRecord, PmStatus};

/// Identity of a cluster: normalized city, then `", "` and the state when one is present.
///
/// Ordering is plain byte order of the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterKey(String);

impl ClusterKey {
    /// Joins an already-normalized city with a state code. The state is
    /// trimmed and uppercased so its spelling never splits a cluster.
    pub fn new(normalized_city: &str, state: &str) -> Self {
        let state = state.trim().to_uppercase();
        if state.is_empty() {
            ClusterKey(normalized_city.to_string())
        } else {
            ClusterKey(format!("{normalized_city}, {state}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ClusterKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Running state for one cluster while records are being grouped.
#[derive(Debug, Clone)]
pub struct ClusterAccumulator {
    pub key: ClusterKey,
    pub city: String,
    pub state: String,
    pub members: Vec<MaintenanceRecord>,
    pub postal_codes: BTreeSet<String>,
    pub overdue: usize,
    pub due_soon: usize,
}

impl ClusterAccumulator {
    pub(crate) fn new(key: ClusterKey, city: String, state: String) -> Self {
        Self {
            key,
            city,
            state,
            members: Vec::new(),
            postal_codes: BTreeSet::new(),
            overdue: 0,
            due_soon: 0,
        }
    }

    pub(crate) fn push(&mut self, record: MaintenanceRecord, status: PmStatus) {
        if let Some(zip) = record.postal_code() {
            self.postal_codes.insert(zip.to_string());
        }

        match status {
            PmStatus::Overdue => self.overdue += 1,
            PmStatus::DueSoon => self.due_soon += 1,
        }

        self.members.push(record);
    }
}

/// Accumulators keyed by [`ClusterKey`], iterated in first-seen order.
#[derive(Debug, Default)]
pub struct ClusterMap {
    index: HashMap<ClusterKey, usize>,
    entries: Vec<ClusterAccumulator>,
    pub stats: BuildStats,
}

impl ClusterMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &ClusterKey) -> Option<&ClusterAccumulator> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Returns the accumulator for `key`, creating it with `make` on first use.
    pub(crate) fn entry_or_insert_with(
        &mut self,
        key: ClusterKey,
        make: impl FnOnce(ClusterKey) -> ClusterAccumulator,
    ) -> &mut ClusterAccumulator {
        let i = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push(make(key.clone()));
                self.index.insert(key, i);
                i
            }
        };
        &mut self.entries[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClusterAccumulator> {
        self.entries.iter()
    }

    /// Consumes the map, yielding accumulators in insertion order.
    pub fn into_accumulators(self) -> Vec<ClusterAccumulator> {
        self.entries
    }
}

/// Diagnostic counters from one build pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub accepted: usize,
    pub dropped_status: usize,
}

/// A finished cluster ready for display or export.
#[derive(Debug, Clone, Serialize)]
pub struct Cluster {
    pub key: ClusterKey,
    pub city: String,
    pub state: String,
    pub members: Vec<MaintenanceRecord>,
    pub postal_codes: Vec<String>,
    pub total: usize,
    pub overdue: usize,
    pub due_soon: usize,
    /// Smallest `days_until_due` among members; the most overdue unit.
    pub most_overdue_days: Option<i64>,
}
