//! Allocation reconciliation and permissive amount parsing.

use safy_domain::{AllocationTable, CategoryAllocation, CategoryBreakdown, Reconciliation};

pub struct AllocationService;

impl AllocationService {
    /// Compares the allocated total against the overall goal.
    pub fn reconcile(table: &AllocationTable, goal: f64) -> Reconciliation {
        table.reconcile(goal)
    }

    /// Per-category saved/remaining amounts proportional to total
    /// historical savings.
    pub fn breakdown(
        table: &AllocationTable,
        goal: f64,
        total_saved: f64,
    ) -> Vec<CategoryBreakdown> {
        table.breakdown(goal, total_saved)
    }

    /// Substitutes the whole table (direct edit or bulk upload).
    pub fn replace(table: &mut AllocationTable, categories: Vec<CategoryAllocation>) {
        table.replace(categories);
    }

    /// Parses an allocation amount, coercing anything non-numeric to zero.
    ///
    /// Upload cells arrive as free text; currency symbols, grouping
    /// separators, and whitespace are stripped before parsing.
    pub fn parse_amount(raw: &str) -> f64 {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
            .collect();
        match cleaned.parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                if !raw.trim().is_empty() {
                    tracing::warn!(cell = raw, "non-numeric allocation coerced to 0");
                }
                0.0
            }
        }
    }
}
