//! Structured summary assembled from the ledger and allocation table.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    allocation::{AllocationTable, CategoryBreakdown},
    ledger::Ledger,
};

/// Number of history rows echoed into the report.
pub const RECENT_ENTRY_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Shareable summary document. Rendering it to a concrete file format is
/// a presentation concern outside this crate.
pub struct Report {
    pub total_saved: f64,
    pub months_spanned: usize,
    pub avg_per_month: f64,
    pub goal: f64,
    pub pct_to_goal: f64,
    pub categories: Vec<CategoryBreakdown>,
    pub recent: Vec<RecentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentEntry {
    pub timestamp: DateTime<Utc>,
    pub current_saved: f64,
}

impl Report {
    /// Assembles the summary from both session tables. Purely derived.
    pub fn build(ledger: &Ledger, allocations: &AllocationTable) -> Self {
        let total_saved = ledger.total_saved();
        let months: BTreeSet<(i32, u32)> = ledger
            .entries()
            .iter()
            .map(|entry| (entry.timestamp.year(), entry.timestamp.month()))
            .collect();
        let months_spanned = months.len().max(1);
        let goal = ledger.last_entry().map(|entry| entry.goal).unwrap_or(0.0);
        Self {
            total_saved,
            months_spanned,
            avg_per_month: total_saved / months_spanned as f64,
            goal,
            pct_to_goal: total_saved / goal.max(1.0),
            categories: allocations.breakdown(goal, total_saved),
            recent: ledger
                .recent(RECENT_ENTRY_COUNT)
                .into_iter()
                .map(|entry| RecentEntry {
                    timestamp: entry.timestamp,
                    current_saved: entry.current_saved,
                })
                .collect(),
        }
    }

    /// Plain-text rendition of the report, one line per stat or row.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total saved: {:.2}", self.total_saved),
            format!("Months tracked: {}", self.months_spanned),
            format!("Average saved per month: {:.2}", self.avg_per_month),
            format!(
                "Goal: {:.2} ({:.1}% reached)",
                self.goal,
                self.pct_to_goal * 100.0
            ),
        ];
        for category in &self.categories {
            lines.push(format!(
                "{}: allocated {:.2}, saved {:.2}, remaining {:.2}",
                category.usage,
                category.goal_allocation,
                category.saved_so_far,
                category.remaining_in_category
            ));
        }
        for entry in &self.recent {
            lines.push(format!(
                "{}: {:.2}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.current_saved
            ));
        }
        lines
    }
}
