use safy_domain::{AllocationTable, Ledger, Report};

pub struct ReportService;

impl ReportService {
    /// Assembles the shareable summary document from both session tables.
    pub fn build(ledger: &Ledger, allocations: &AllocationTable) -> Report {
        Report::build(ledger, allocations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use safy_domain::{CategoryAllocation, SavingsEntry};

    #[test]
    fn build_reflects_both_tables() {
        let mut ledger = Ledger::new();
        ledger.append(SavingsEntry::new(
            Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap(),
            6000.0,
            3000.0,
            3000.0,
        ));
        let allocations =
            AllocationTable::from_categories(vec![CategoryAllocation::new("Housing", 6000.0)]);
        let report = ReportService::build(&ledger, &allocations);
        assert_eq!(report.total_saved, 3000.0);
        assert_eq!(report.goal, 6000.0);
        assert_eq!(report.categories[0].saved_so_far, 3000.0);
        assert_eq!(report.recent.len(), 1);
    }
}
