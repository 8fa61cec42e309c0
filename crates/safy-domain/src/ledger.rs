//! The ordered, deduplicated history of savings entries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{EntryKey, SavingsEntry};

/// Goal seeded into the input form when the ledger has no history yet.
pub const DEFAULT_GOAL: f64 = 6000.0;
/// Monthly target seeded into the input form when the ledger is empty.
pub const DEFAULT_MONTHLY_TARGET: f64 = 3000.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
/// Savings history owned by one session or share context.
pub struct Ledger {
    entries: Vec<SavingsEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from a raw batch, applying the merge invariants
    /// (dedup by key, sorted by timestamp).
    pub fn from_entries(entries: Vec<SavingsEntry>) -> Self {
        let mut ledger = Self::default();
        ledger.merge(entries);
        ledger
    }

    pub fn entries(&self) -> &[SavingsEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_entry(&self) -> Option<&SavingsEntry> {
        self.entries.last()
    }

    /// Appends one entry as-is. A plain save always lands at the end;
    /// ordering and dedup are re-established by the next merge.
    pub fn append(&mut self, entry: SavingsEntry) {
        self.entries.push(entry);
    }

    /// Merges a batch of entries into the history.
    ///
    /// The combined set is deduplicated on `(timestamp, current_saved)`
    /// keeping the later occurrence, then sorted ascending by timestamp.
    /// Merging the same batch twice is a no-op.
    pub fn merge(&mut self, incoming: Vec<SavingsEntry>) {
        let combined: Vec<SavingsEntry> = self.entries.drain(..).chain(incoming).collect();
        let mut last_by_key: HashMap<EntryKey, usize> = HashMap::with_capacity(combined.len());
        for (ix, entry) in combined.iter().enumerate() {
            last_by_key.insert(entry.key(), ix);
        }
        let mut merged: Vec<SavingsEntry> = combined
            .into_iter()
            .enumerate()
            .filter(|(ix, entry)| last_by_key[&entry.key()] == *ix)
            .map(|(_, entry)| entry)
            .collect();
        merged.sort_by_key(|entry| entry.timestamp);
        self.entries = merged;
    }

    /// Replaces the whole history, recomputing derived fields from the
    /// raw fields of every entry. Stored fractions are never trusted.
    pub fn replace(&mut self, mut entries: Vec<SavingsEntry>) {
        for entry in &mut entries {
            entry.recompute();
        }
        self.entries = entries;
    }

    /// Recomputes derived fields in place for every entry.
    pub fn recompute_all(&mut self) {
        for entry in &mut self.entries {
            entry.recompute();
        }
    }

    /// Running total of `current_saved` in timestamp order. Empty ledger
    /// gives an empty sequence.
    pub fn cumulative_saved(&self) -> Vec<(DateTime<Utc>, f64)> {
        let mut ordered: Vec<&SavingsEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|entry| entry.timestamp);
        let mut running = 0.0;
        ordered
            .into_iter()
            .map(|entry| {
                running += entry.current_saved;
                (entry.timestamp, running)
            })
            .collect()
    }

    pub fn total_saved(&self) -> f64 {
        self.entries.iter().map(|entry| entry.current_saved).sum()
    }

    /// The most recent entry's goal, or the form default when empty.
    pub fn last_goal(&self) -> f64 {
        self.entries
            .last()
            .map(|entry| entry.goal)
            .unwrap_or(DEFAULT_GOAL)
    }

    /// The most recent entry's monthly target, or the form default when
    /// empty.
    pub fn last_monthly_target(&self) -> f64 {
        self.entries
            .last()
            .map(|entry| entry.monthly_target)
            .unwrap_or(DEFAULT_MONTHLY_TARGET)
    }

    /// Last `count` entries in ascending timestamp order.
    pub fn recent(&self, count: usize) -> Vec<&SavingsEntry> {
        let mut ordered: Vec<&SavingsEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|entry| entry.timestamp);
        let skip = ordered.len().saturating_sub(count);
        ordered.into_iter().skip(skip).collect()
    }
}
