//! Progress and happiness arithmetic for a single set of savings inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Derived fractions computed from one set of raw savings inputs.
pub struct Metrics {
    pub progress_fraction: f64,
    pub happiness_fraction: f64,
    pub remaining: f64,
}

impl Metrics {
    /// Computes progress toward the overall goal and happiness against the
    /// monthly target.
    ///
    /// Fractions are clamped to `[0, 1]`. A zero goal or target yields a
    /// zero fraction instead of dividing.
    pub fn compute(goal: f64, monthly_target: f64, current_saved: f64) -> Self {
        let progress_fraction = if goal > 0.0 {
            clamp_fraction(current_saved / goal)
        } else {
            0.0
        };
        let happiness_fraction = if monthly_target > 0.0 {
            clamp_fraction(current_saved / monthly_target)
        } else {
            0.0
        };
        Self {
            progress_fraction,
            happiness_fraction,
            remaining: (goal - current_saved).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Classifies how the saved amount compares to the monthly target.
pub enum HappinessLevel {
    Exceeded,
    Halfway,
    Behind,
}

impl HappinessLevel {
    pub fn classify(current_saved: f64, monthly_target: f64) -> Self {
        if current_saved >= monthly_target {
            HappinessLevel::Exceeded
        } else if current_saved >= 0.5 * monthly_target {
            HappinessLevel::Halfway
        } else {
            HappinessLevel::Behind
        }
    }

    /// Returns the encouragement line shown next to the happiness meter.
    pub fn message(&self) -> &'static str {
        match self {
            HappinessLevel::Exceeded => "You hit or exceeded this month's savings target!",
            HappinessLevel::Halfway => "You're halfway to your monthly target.",
            HappinessLevel::Behind => "Behind this month's target. Keep going!",
        }
    }
}

impl fmt::Display for HappinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HappinessLevel::Exceeded => "Exceeded",
            HappinessLevel::Halfway => "Halfway",
            HappinessLevel::Behind => "Behind",
        };
        f.write_str(label)
    }
}

fn clamp_fraction(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_fractions_for_ordinary_inputs() {
        let metrics = Metrics::compute(6000.0, 3000.0, 3000.0);
        assert_eq!(metrics.progress_fraction, 0.5);
        assert_eq!(metrics.happiness_fraction, 1.0);
        assert_eq!(metrics.remaining, 3000.0);
        assert_eq!(
            HappinessLevel::classify(3000.0, 3000.0),
            HappinessLevel::Exceeded
        );
    }

    #[test]
    fn zero_goal_yields_zero_progress() {
        let metrics = Metrics::compute(0.0, 3000.0, 1500.0);
        assert_eq!(metrics.progress_fraction, 0.0);
        assert_eq!(metrics.happiness_fraction, 0.5);
        assert_eq!(metrics.remaining, 0.0);
        assert_eq!(
            HappinessLevel::classify(1500.0, 3000.0),
            HappinessLevel::Halfway
        );
    }

    #[test]
    fn zero_target_yields_zero_happiness() {
        let metrics = Metrics::compute(6000.0, 0.0, 1000.0);
        assert_eq!(metrics.happiness_fraction, 0.0);
    }

    #[test]
    fn fractions_clamp_to_unit_interval() {
        let metrics = Metrics::compute(1000.0, 500.0, 2500.0);
        assert_eq!(metrics.progress_fraction, 1.0);
        assert_eq!(metrics.happiness_fraction, 1.0);
        assert_eq!(metrics.remaining, 0.0);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(
            HappinessLevel::classify(1499.0, 3000.0),
            HappinessLevel::Behind
        );
        assert_eq!(
            HappinessLevel::classify(1500.0, 3000.0),
            HappinessLevel::Halfway
        );
        assert_eq!(
            HappinessLevel::classify(3000.0, 3000.0),
            HappinessLevel::Exceeded
        );
    }

    #[test]
    fn labels_and_messages_are_stable() {
        assert_eq!(HappinessLevel::Exceeded.to_string(), "Exceeded");
        assert_eq!(
            HappinessLevel::Halfway.message(),
            "You're halfway to your monthly target."
        );
        assert!(HappinessLevel::Behind.message().starts_with("Behind"));
    }
}
