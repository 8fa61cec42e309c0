//! Helper functions for recording and reshaping session history.

use chrono::{DateTime, Utc};

use safy_domain::{Ledger, SavingsEntry, SessionState};

/// Provides append, merge, and edit helpers for session ledgers.
pub struct LedgerService;

impl LedgerService {
    /// Appends a fully derived entry to the session history.
    ///
    /// The store performs no carry-over of goal or target values; callers
    /// pass the current form values each time (see
    /// [`Self::input_defaults`]).
    pub fn record_entry(
        state: &mut SessionState,
        goal: f64,
        monthly_target: f64,
        current_saved: f64,
        timestamp: DateTime<Utc>,
    ) -> SavingsEntry {
        let entry = SavingsEntry::new(timestamp, goal, monthly_target, current_saved);
        state.ledger.append(entry.clone());
        tracing::debug!(saved = current_saved, "entry recorded");
        entry
    }

    /// Same as [`Self::record_entry`], stamped with the current instant.
    pub fn record_entry_now(
        state: &mut SessionState,
        goal: f64,
        monthly_target: f64,
        current_saved: f64,
    ) -> SavingsEntry {
        Self::record_entry(state, goal, monthly_target, current_saved, Utc::now())
    }

    /// Merges uploaded history into the ledger: dedup by
    /// `(timestamp, current_saved)` keeping the later occurrence, sorted
    /// ascending by timestamp.
    pub fn merge_entries(ledger: &mut Ledger, incoming: Vec<SavingsEntry>) {
        let before = ledger.len();
        ledger.merge(incoming);
        tracing::debug!(before, after = ledger.len(), "history merged");
    }

    /// Substitutes the whole history after an inline edit. Derived fields
    /// are recomputed from the edited raw values.
    pub fn replace_entries(ledger: &mut Ledger, entries: Vec<SavingsEntry>) {
        ledger.replace(entries);
    }

    /// Values seeding the next input form: the most recent entry's goal
    /// and monthly target, or the hardcoded defaults for an empty ledger.
    pub fn input_defaults(ledger: &Ledger) -> (f64, f64) {
        (ledger.last_goal(), ledger.last_monthly_target())
    }
}
