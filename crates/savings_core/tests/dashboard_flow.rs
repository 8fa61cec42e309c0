use chrono::{DateTime, TimeZone, Utc};
use savings_core::{CategoryAllocation, Config, Dashboard, HappinessLevel, ReconcileStatus};
use std::fs;
use tempfile::tempdir;

fn dashboard(dir: &std::path::Path) -> Dashboard {
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
fn saving_entries_builds_a_consistent_report() {
    let dir = tempdir().expect("tempdir");
    let mut dashboard = dashboard(dir.path());

    dashboard.record_entry_at(at(1, 10), 6000.0, 3000.0, 1000.0);
    dashboard.record_entry_at(at(2, 10), 6000.0, 3000.0, 2000.0);
    dashboard.update_allocations(vec![
        CategoryAllocation::new("Housing", 4000.0),
        CategoryAllocation::new("Food", 2000.0),
    ]);

    let report = dashboard.report();
    assert_eq!(report.total_saved, 3000.0);
    assert_eq!(report.months_spanned, 2);
    assert_eq!(report.avg_per_month, 1500.0);
    assert_eq!(report.goal, 6000.0);
    assert_eq!(report.pct_to_goal, 0.5);
    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.categories[0].saved_so_far, 2000.0);
    assert_eq!(report.recent.len(), 2);

    let chart = dashboard.cumulative_saved();
    assert_eq!(chart.last().map(|point| point.1), Some(3000.0));
}

#[test]
fn happiness_meter_follows_the_monthly_target() {
    let dir = tempdir().expect("tempdir");
    let dashboard = dashboard(dir.path());

    let (_, exceeded) = dashboard.preview(6000.0, 3000.0, 3000.0);
    assert_eq!(exceeded, HappinessLevel::Exceeded);

    let (metrics, halfway) = dashboard.preview(0.0, 3000.0, 1500.0);
    assert_eq!(metrics.progress_fraction, 0.0);
    assert_eq!(metrics.happiness_fraction, 0.5);
    assert_eq!(metrics.remaining, 0.0);
    assert_eq!(halfway, HappinessLevel::Halfway);
}

#[test]
fn share_round_trip_restores_both_tables() {
    let dir = tempdir().expect("tempdir");
    let mut original = dashboard(dir.path());
    original.record_entry_at(at(3, 1), 6000.0, 3000.0, 1500.0);
    original.update_allocations(vec![CategoryAllocation::new("Travel", 1000.0)]);

    let id = original.share().expect("share");
    assert_eq!(id.as_str().len(), 8);

    let mut restored = dashboard(dir.path());
    restored.open_share(&id);
    assert_eq!(restored.ledger().len(), 1);
    assert_eq!(restored.ledger().total_saved(), 1500.0);
    assert_eq!(restored.state().allocations.len(), 1);
    assert_eq!(restored.state().share_id, Some(id));
}

#[test]
fn opening_an_unknown_share_degrades_to_a_fresh_session() {
    let dir = tempdir().expect("tempdir");
    let mut dashboard = dashboard(dir.path());
    dashboard.record_entry_at(at(3, 1), 6000.0, 3000.0, 1500.0);

    dashboard.open_share(&"ffffffff".parse().expect("id"));
    assert!(dashboard.ledger().is_empty());
    assert!(dashboard.state().share_id.is_none());
}

#[test]
fn reuploading_an_export_is_a_no_op() {
    let dir = tempdir().expect("tempdir");
    let mut dashboard = dashboard(dir.path());
    dashboard.record_entry_at(at(1, 5), 6000.0, 3000.0, 500.0);
    dashboard.record_entry_at(at(2, 5), 6000.0, 3000.0, 700.0);

    let export = dir.path().join("history.csv");
    dashboard.export_history_csv(&export).expect("export");

    let first = dashboard.merge_history_csv(&export).expect("first merge");
    assert_eq!(first, 2);
    assert_eq!(dashboard.ledger().len(), 2);

    dashboard.merge_history_csv(&export).expect("second merge");
    assert_eq!(dashboard.ledger().len(), 2);
}

#[test]
fn failed_upload_leaves_the_session_untouched() {
    let dir = tempdir().expect("tempdir");
    let mut dashboard = dashboard(dir.path());
    dashboard.record_entry_at(at(1, 5), 6000.0, 3000.0, 500.0);

    let upload = dir.path().join("broken.csv");
    fs::write(&upload, "timestamp,goal,monthly_target,current_saved\nnope,1,2,3\n")
        .expect("write broken file");

    assert!(dashboard.merge_history_csv(&upload).is_err());
    assert_eq!(dashboard.ledger().len(), 1);
    assert_eq!(dashboard.ledger().total_saved(), 500.0);
}

#[test]
fn allocation_upload_replaces_the_table_with_permissive_amounts() {
    let dir = tempdir().expect("tempdir");
    let mut dashboard = dashboard(dir.path());
    dashboard.update_allocations(vec![CategoryAllocation::new("Old", 1.0)]);

    let upload = dir.path().join("categories.csv");
    fs::write(&upload, "Usage,Goal Allocation\nHousing,4000\nMisc,n/a\n").expect("write upload");

    let count = dashboard.import_allocations_csv(&upload).expect("import");
    assert_eq!(count, 2);
    let categories = dashboard.state().allocations.categories();
    assert_eq!(categories[0].goal_allocation, 4000.0);
    assert_eq!(categories[1].goal_allocation, 0.0);

    let reconciliation = dashboard.reconcile(6000.0);
    assert_eq!(reconciliation.status, ReconcileStatus::Under);
    assert_eq!(reconciliation.delta, -2000.0);
}

#[test]
fn inline_edit_recomputes_derived_fields() {
    let dir = tempdir().expect("tempdir");
    let mut dashboard = dashboard(dir.path());
    dashboard.record_entry_at(at(1, 5), 6000.0, 3000.0, 500.0);

    let mut edited = dashboard.ledger().entries().to_vec();
    edited[0].current_saved = 3000.0;
    dashboard.update_history(edited);

    let entry = &dashboard.ledger().entries()[0];
    assert_eq!(entry.progress_fraction, 0.5);
    assert_eq!(entry.happiness_fraction, 1.0);
    assert_eq!(entry.remaining, 3000.0);
}
