//! Date-based prize bonus selection.
//!
//! The strategy is chosen purely from the tournament start date. Multipliers
//! are kept as whole percentages so applying them to a prize pool in cents
//! never goes through floating point.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Prize multiplier rule selected from a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusStrategy {
    /// No bonus (×1.0).
    Standard,
    /// Saturday or Sunday (×1.5).
    Weekend,
    /// Dec 24–26, Dec 31 or Jan 1 (×2.0).
    Holiday,
}

impl BonusStrategy {
    /// Selects the strategy for a date. Holidays take precedence over weekends.
    pub fn for_date(date: NaiveDate) -> Self {
        if is_holiday(date) {
            BonusStrategy::Holiday
        } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            BonusStrategy::Weekend
        } else {
            BonusStrategy::Standard
        }
    }

    /// Returns the multiplier as a whole percentage (150 = ×1.5).
    pub fn multiplier_percent(&self) -> i64 {
        match self {
            BonusStrategy::Standard => 100,
            BonusStrategy::Weekend => 150,
            BonusStrategy::Holiday => 200,
        }
    }

    /// Returns the multiplier as a float, for display.
    pub fn multiplier(&self) -> f64 {
        self.multiplier_percent() as f64 / 100.0
    }

    /// Applies the multiplier to a prize pool, rounding toward zero.
    pub fn apply(&self, prize_pool: i64) -> i64 {
        prize_pool.saturating_mul(self.multiplier_percent()) / 100
    }
}

fn is_holiday(date: NaiveDate) -> bool {
    matches!(
        (date.month(), date.day()),
        (12, 24) | (12, 25) | (12, 26) | (12, 31) | (1, 1)
    )
}
