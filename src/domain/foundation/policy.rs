//! Rental policy configuration.

use serde::{Deserialize, Serialize};

/// Store-wide rental policy constants.
///
/// Applied by the rental repository when a checkout omits optional fields
/// and when computing late fees at return time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentalPolicy {
    /// Loan period in days; due date defaults to rental date plus this.
    pub loan_period_days: i64,
    /// Daily rate applied when a checkout does not specify one.
    pub default_daily_rate: f64,
    /// Flat fee charged per day past the due date, assessed at return.
    pub late_fee_per_day: f64,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: 7,
            default_daily_rate: 3.99,
            late_fee_per_day: 1.50,
        }
    }
}
