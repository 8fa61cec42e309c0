//! Category allocations carved out of the overall savings goal.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One named sub-goal. Labels are free text and not required unique.
pub struct CategoryAllocation {
    pub usage: String,
    pub goal_allocation: f64,
}

impl CategoryAllocation {
    pub fn new(usage: impl Into<String>, goal_allocation: f64) -> Self {
        Self {
            usage: usage.into(),
            goal_allocation,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
/// Ordered allocation table owned by one session or share context.
pub struct AllocationTable {
    categories: Vec<CategoryAllocation>,
}

impl AllocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(categories: Vec<CategoryAllocation>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[CategoryAllocation] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn push(&mut self, allocation: CategoryAllocation) {
        self.categories.push(allocation);
    }

    /// Substitutes the whole table (direct edit or bulk upload).
    pub fn replace(&mut self, categories: Vec<CategoryAllocation>) {
        self.categories = categories;
    }

    pub fn total_allocated(&self) -> f64 {
        self.categories
            .iter()
            .map(|category| category.goal_allocation)
            .sum()
    }

    /// Compares the allocated total against the overall goal.
    ///
    /// A mismatch is informational status, not an error; it never blocks
    /// saving or sharing.
    pub fn reconcile(&self, goal: f64) -> Reconciliation {
        let total_allocated = self.total_allocated();
        let delta = total_allocated - goal;
        let status = if delta > 0.0 {
            ReconcileStatus::Over
        } else if delta < 0.0 {
            ReconcileStatus::Under
        } else {
            ReconcileStatus::Exact
        };
        Reconciliation {
            total_allocated,
            delta,
            status,
        }
    }

    /// Splits total historical savings across categories in proportion to
    /// each category's share of the goal.
    ///
    /// A zero goal substitutes 1 as the denominator rather than dividing
    /// by zero. Amounts are rounded to two decimal places.
    pub fn breakdown(&self, goal: f64, total_saved: f64) -> Vec<CategoryBreakdown> {
        let denominator = goal.max(1.0);
        self.categories
            .iter()
            .map(|category| {
                let saved_so_far = round2(category.goal_allocation / denominator * total_saved);
                let remaining_in_category = round2((category.goal_allocation - saved_so_far).max(0.0));
                CategoryBreakdown {
                    usage: category.usage.clone(),
                    goal_allocation: category.goal_allocation,
                    saved_so_far,
                    remaining_in_category,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One category row with its derived proportional amounts.
pub struct CategoryBreakdown {
    pub usage: String,
    pub goal_allocation: f64,
    pub saved_so_far: f64,
    pub remaining_in_category: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Outcome of comparing the allocation table against the goal.
pub struct Reconciliation {
    pub total_allocated: f64,
    pub delta: f64,
    pub status: ReconcileStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Whether the allocation table matches the overall goal.
pub enum ReconcileStatus {
    Over,
    Under,
    Exact,
}

impl fmt::Display for ReconcileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReconcileStatus::Over => "Over",
            ReconcileStatus::Under => "Under",
            ReconcileStatus::Exact => "Exact",
        };
        f.write_str(label)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
