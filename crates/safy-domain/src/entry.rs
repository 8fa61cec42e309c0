//! One savings record and the identity used to deduplicate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A snapshot of the user's savings state at one point in time.
///
/// `remaining`, `progress_fraction`, and `happiness_fraction` are always
/// recomputable from the three raw amounts; [`SavingsEntry::recompute`]
/// refreshes them after the raw fields are edited.
pub struct SavingsEntry {
    pub timestamp: DateTime<Utc>,
    pub goal: f64,
    pub monthly_target: f64,
    pub current_saved: f64,
    pub remaining: f64,
    pub progress_fraction: f64,
    pub happiness_fraction: f64,
}

impl SavingsEntry {
    /// Builds an entry with derived fields computed from the raw inputs.
    pub fn new(
        timestamp: DateTime<Utc>,
        goal: f64,
        monthly_target: f64,
        current_saved: f64,
    ) -> Self {
        let metrics = Metrics::compute(goal, monthly_target, current_saved);
        Self {
            timestamp,
            goal,
            monthly_target,
            current_saved,
            remaining: metrics.remaining,
            progress_fraction: metrics.progress_fraction,
            happiness_fraction: metrics.happiness_fraction,
        }
    }

    /// Refreshes the derived fields from the raw fields.
    pub fn recompute(&mut self) {
        let metrics = Metrics::compute(self.goal, self.monthly_target, self.current_saved);
        self.remaining = metrics.remaining;
        self.progress_fraction = metrics.progress_fraction;
        self.happiness_fraction = metrics.happiness_fraction;
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            progress_fraction: self.progress_fraction,
            happiness_fraction: self.happiness_fraction,
            remaining: self.remaining,
        }
    }

    /// Identity used for merge deduplication.
    ///
    /// The saved amount is quantized to cents so a re-uploaded export
    /// matches the entry it came from.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            timestamp: self.timestamp,
            saved_cents: to_cents(self.current_saved),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Composite dedup key: `(timestamp, current_saved)`.
pub struct EntryKey {
    timestamp: DateTime<Utc>,
    saved_cents: i64,
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
