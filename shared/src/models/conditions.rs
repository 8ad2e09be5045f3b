//! Growing-condition tallies
//!
//! A crop's plantings are grouped by `(planted_from, sunniness)` and counted;
//! the most common pair is what gets recommended.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CropRecord, PlantingEntry};

/// Label used when a planting left a condition blank
pub const UNKNOWN_CONDITION: &str = "unknown";

/// The grouping key for tallying plantings.
///
/// Ordered lexicographically by `planted_from`, then `sunniness`, with a
/// blank condition sorting before any recorded one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConditionKey {
    pub planted_from: Option<String>,
    pub sunniness: Option<String>,
}

impl ConditionKey {
    pub fn new(planted_from: impl Into<String>, sunniness: impl Into<String>) -> Self {
        Self {
            planted_from: Some(planted_from.into()),
            sunniness: Some(sunniness.into()),
        }
    }

    /// Propagation method, or `unknown` when none was recorded
    pub fn planted_from_label(&self) -> &str {
        self.planted_from.as_deref().unwrap_or(UNKNOWN_CONDITION)
    }

    /// Sun exposure, or `unknown` when none was recorded
    pub fn sunniness_label(&self) -> &str {
        self.sunniness.as_deref().unwrap_or(UNKNOWN_CONDITION)
    }
}

impl From<&PlantingEntry> for ConditionKey {
    fn from(entry: &PlantingEntry) -> Self {
        Self {
            planted_from: entry.planted_from.clone(),
            sunniness: entry.sunniness.clone(),
        }
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.planted_from_label(), self.sunniness_label())
    }
}

/// How many plantings used each condition pair.
///
/// Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<ConditionKey, u32>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more planting under `key`
    pub fn record(&mut self, key: ConditionKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &ConditionKey) -> Option<u32> {
        self.counts.get(key).copied()
    }

    /// Number of distinct condition pairs
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of plantings tallied
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConditionKey, u32)> {
        self.counts.iter().map(|(k, &c)| (k, c))
    }
}

impl FromIterator<ConditionKey> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = ConditionKey>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.record(key);
        }
        table
    }
}

/// Selector failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Cannot select the most common conditions from an empty table")]
    EmptyTable,
}

/// Count plantings per condition pair.
///
/// Returns the table together with the record's `plantings_count`, passed
/// through untouched. The two are independent: an empty planting list gives
/// an empty table whatever the count says.
pub fn tally(record: &CropRecord) -> (FrequencyTable, u64) {
    let table = record.plantings.iter().map(ConditionKey::from).collect();
    (table, record.plantings_count)
}

/// Pick the most frequent condition pair.
///
/// Ties go to the smallest key, so the answer does not depend on the order
/// plantings were returned in.
pub fn select_mode(table: &FrequencyTable) -> Result<ConditionKey, SelectionError> {
    table
        .iter()
        .max_by(|(key_a, count_a), (key_b, count_b)| {
            count_a.cmp(count_b).then_with(|| key_b.cmp(key_a))
        })
        .map(|(key, _)| key.clone())
        .ok_or(SelectionError::EmptyTable)
}
