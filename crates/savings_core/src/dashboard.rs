//! Facade that coordinates session state, computation, and persistence.

use std::path::Path;

use chrono::{DateTime, Utc};

use safy_config::Config;
use safy_core::{
    AllocationService, LedgerService, ReportService, Result, ShareService, ShareStore,
};
use safy_domain::{
    CategoryAllocation, CategoryBreakdown, HappinessLevel, Ledger, Metrics, Reconciliation,
    Report, SavingsEntry, SessionState, ShareId,
};
use safy_storage_csv::{codec, CsvShareStore};

/// Coordinates one dashboard session over a persistence backend.
///
/// Every interaction a frontend offers maps to one method here; the
/// frontend owns rendering and input handling only.
pub struct Dashboard {
    config: Config,
    store: Box<dyn ShareStore>,
    state: SessionState,
}

impl Dashboard {
    /// Opens a dashboard against the configured data directory.
    pub fn new(config: Config) -> Result<Self> {
        let store = CsvShareStore::with_base_dir(config.resolve_data_dir())?;
        Ok(Self::with_store(config, Box::new(store)))
    }

    /// Opens a dashboard over an explicit backend.
    pub fn with_store(config: Config, store: Box<dyn ShareStore>) -> Self {
        Self {
            config,
            store,
            state: SessionState::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn ledger(&self) -> &Ledger {
        &self.state.ledger
    }

    /// Goal and monthly-target values seeding the input form: the last
    /// entry's values, else the configured defaults.
    pub fn input_defaults(&self) -> (f64, f64) {
        if self.state.ledger.is_empty() {
            (self.config.default_goal, self.config.default_monthly_target)
        } else {
            LedgerService::input_defaults(&self.state.ledger)
        }
    }

    /// Live metrics for the current form values, before any save.
    pub fn preview(
        &self,
        goal: f64,
        monthly_target: f64,
        current_saved: f64,
    ) -> (Metrics, HappinessLevel) {
        (
            Metrics::compute(goal, monthly_target, current_saved),
            HappinessLevel::classify(current_saved, monthly_target),
        )
    }

    /// Saves one entry into the session history, stamped now.
    pub fn record_entry(
        &mut self,
        goal: f64,
        monthly_target: f64,
        current_saved: f64,
    ) -> SavingsEntry {
        LedgerService::record_entry_now(&mut self.state, goal, monthly_target, current_saved)
    }

    /// Saves one entry with an explicit timestamp.
    pub fn record_entry_at(
        &mut self,
        timestamp: DateTime<Utc>,
        goal: f64,
        monthly_target: f64,
        current_saved: f64,
    ) -> SavingsEntry {
        LedgerService::record_entry(
            &mut self.state,
            goal,
            monthly_target,
            current_saved,
            timestamp,
        )
    }

    /// Merges an uploaded history CSV into the session, returning how many
    /// rows the file held. On a parse failure the session ledger is left
    /// untouched.
    pub fn merge_history_csv(&mut self, path: &Path) -> Result<usize> {
        let incoming = codec::import_history(path)?;
        let count = incoming.len();
        LedgerService::merge_entries(&mut self.state.ledger, incoming);
        Ok(count)
    }

    pub fn export_history_csv(&self, path: &Path) -> Result<()> {
        codec::export_history(path, &self.state.ledger)
    }

    /// Replaces the history after an inline table edit. Derived fields are
    /// recomputed from the edited raw values.
    pub fn update_history(&mut self, entries: Vec<SavingsEntry>) {
        LedgerService::replace_entries(&mut self.state.ledger, entries);
    }

    /// Replaces the allocation table after a direct edit.
    pub fn update_allocations(&mut self, categories: Vec<CategoryAllocation>) {
        AllocationService::replace(&mut self.state.allocations, categories);
    }

    /// Replaces the allocation table from an uploaded CSV, returning the
    /// row count. On a parse failure the current table is left untouched.
    pub fn import_allocations_csv(&mut self, path: &Path) -> Result<usize> {
        let table = codec::import_allocations(path)?;
        let count = table.len();
        self.state.allocations = table;
        Ok(count)
    }

    pub fn export_allocations_csv(&self, path: &Path) -> Result<()> {
        codec::export_allocations(path, &self.state.allocations)
    }

    /// Compares the allocation table against a goal amount.
    pub fn reconcile(&self, goal: f64) -> Reconciliation {
        AllocationService::reconcile(&self.state.allocations, goal)
    }

    /// Per-category progress against a goal, proportional to total
    /// historical savings.
    pub fn breakdown(&self, goal: f64) -> Vec<CategoryBreakdown> {
        AllocationService::breakdown(&self.state.allocations, goal, self.state.ledger.total_saved())
    }

    /// Points for the savings-over-time chart.
    pub fn cumulative_saved(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.state.ledger.cumulative_saved()
    }

    /// Assembles the summary report from both session tables.
    pub fn report(&self) -> Report {
        ReportService::build(&self.state.ledger, &self.state.allocations)
    }

    /// Persists the session under its share id, minting one if needed.
    pub fn share(&mut self) -> Result<ShareId> {
        ShareService::save_session(self.store.as_ref(), &mut self.state)
    }

    /// Loads the session behind a share link. An unknown id degrades to a
    /// fresh session with a warning.
    pub fn open_share(&mut self, id: &ShareId) {
        self.state = ShareService::load_session_or_default(self.store.as_ref(), id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use safy_domain::ReconcileStatus;
    use tempfile::tempdir;

    fn dashboard(dir: &Path) -> Dashboard {
        let config = Config {
            data_dir: Some(dir.to_path_buf()),
            ..Config::default()
        };
        Dashboard::new(config).expect("dashboard")
    }

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn input_defaults_start_from_config_then_track_history() {
        let dir = tempdir().expect("tempdir");
        let mut dashboard = dashboard(dir.path());
        assert_eq!(dashboard.input_defaults(), (6000.0, 3000.0));

        dashboard.record_entry_at(at(1, 5), 9000.0, 1500.0, 100.0);
        assert_eq!(dashboard.input_defaults(), (9000.0, 1500.0));
    }

    #[test]
    fn preview_matches_the_saved_entry() {
        let dir = tempdir().expect("tempdir");
        let mut dashboard = dashboard(dir.path());
        let (metrics, level) = dashboard.preview(6000.0, 3000.0, 3000.0);
        assert_eq!(metrics.progress_fraction, 0.5);
        assert_eq!(metrics.happiness_fraction, 1.0);
        assert_eq!(level, HappinessLevel::Exceeded);

        let entry = dashboard.record_entry_at(at(1, 5), 6000.0, 3000.0, 3000.0);
        assert_eq!(entry.progress_fraction, metrics.progress_fraction);
        assert_eq!(entry.remaining, metrics.remaining);
    }

    #[test]
    fn reconcile_and_breakdown_use_the_session_tables() {
        let dir = tempdir().expect("tempdir");
        let mut dashboard = dashboard(dir.path());
        dashboard.record_entry_at(at(1, 5), 10000.0, 3000.0, 2000.0);
        dashboard.record_entry_at(at(2, 5), 10000.0, 3000.0, 3000.0);
        dashboard.update_allocations(vec![
            CategoryAllocation::new("Housing", 10000.0),
            CategoryAllocation::new("Food", 0.0),
        ]);

        let reconciliation = dashboard.reconcile(10000.0);
        assert_eq!(reconciliation.status, ReconcileStatus::Exact);

        let rows = dashboard.breakdown(10000.0);
        assert_eq!(rows[0].saved_so_far, 5000.0);
        assert_eq!(rows[0].remaining_in_category, 5000.0);
        assert_eq!(rows[1].saved_so_far, 0.0);
    }
}
