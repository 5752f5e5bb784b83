//! Rental entity, lifecycle math, and statistics.
//!
//! A rental keeps a denormalized snapshot of the customer and movie names
//! taken at checkout time; later edits to those entities do not rewrite
//! rental history. Status, cost, and overdue figures are pure functions of
//! the record plus "today", so every read path derives them the same way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::foundation::{
    money, CustomerId, MovieId, RentalId, RentalStatus, ValidationError,
};
use super::movie::MAX_NAME_LEN;

/// Lowest daily rate a rental may carry.
pub const MIN_DAILY_RATE: f64 = 0.01;
/// Highest daily rate a rental may carry.
pub const MAX_DAILY_RATE: f64 = 999.99;

/// A single rental of a movie by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: RentalId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub movie_id: MovieId,
    pub movie_name: String,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub daily_rate: f64,
    /// Accumulates only at return time; zero while the rental is open.
    pub late_fee: f64,
    pub status: RentalStatus,
}

impl Rental {
    /// Status as of `today`: an open rental past its due date reads as
    /// Overdue. A Returned rental never leaves Returned.
    pub fn derived_status(&self, today: NaiveDate) -> RentalStatus {
        match self.status {
            RentalStatus::Returned => RentalStatus::Returned,
            _ if today > self.due_date => RentalStatus::Overdue,
            _ => RentalStatus::Active,
        }
    }

    /// Days the movie has been out, charged with a one-day minimum.
    ///
    /// Open rentals are measured up to `today`, returned rentals up to
    /// their return date.
    pub fn days_rented(&self, today: NaiveDate) -> i64 {
        let end = self.return_date.unwrap_or(today);
        (end - self.rental_date).num_days().max(1)
    }

    /// Total cost as of `today`: charged days times the daily rate, plus
    /// any late fee, rounded to cents.
    pub fn total_cost(&self, today: NaiveDate) -> f64 {
        money::round_cents(self.days_rented(today) as f64 * self.daily_rate + self.late_fee)
    }

    /// Days past the due date: measured against the return date once
    /// returned, against `today` while open, zero when on schedule.
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        let end = match self.return_date {
            Some(returned) => returned,
            None => today,
        };
        (end - self.due_date).num_days().max(0)
    }

    /// Returns true if a returned rental came back on or before its due date.
    pub fn returned_on_time(&self) -> bool {
        matches!(self.return_date, Some(returned) if returned <= self.due_date)
    }

    /// Validates the rental's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::empty_field("customerName"));
        }
        if self.movie_name.trim().is_empty() {
            return Err(ValidationError::empty_field("movieName"));
        }
        if self.movie_name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::too_long(
                "movieName",
                MAX_NAME_LEN,
                self.movie_name.chars().count(),
            ));
        }
        if !(MIN_DAILY_RATE..=MAX_DAILY_RATE).contains(&self.daily_rate) {
            return Err(ValidationError::out_of_range(
                "dailyRate",
                MIN_DAILY_RATE,
                MAX_DAILY_RATE,
                self.daily_rate,
            ));
        }
        if self.late_fee < 0.0 {
            return Err(ValidationError::out_of_range(
                "lateFee",
                0.0,
                f64::MAX,
                self.late_fee,
            ));
        }
        Ok(())
    }
}

/// Checkout input. The store assigns the id and fills the optional fields
/// from the rental policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRental {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub movie_id: MovieId,
    pub movie_name: String,
    /// Defaults to today.
    pub rental_date: Option<NaiveDate>,
    /// Defaults to the rental date plus the policy loan period.
    pub due_date: Option<NaiveDate>,
    /// Defaults to the policy daily rate.
    pub daily_rate: Option<f64>,
}

impl NewRental {
    /// Creates a checkout request with all optional fields left to policy
    /// defaults.
    pub fn new(
        customer_id: CustomerId,
        customer_name: impl Into<String>,
        movie_id: MovieId,
        movie_name: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            customer_name: customer_name.into(),
            movie_id,
            movie_name: movie_name.into(),
            rental_date: None,
            due_date: None,
            daily_rate: None,
        }
    }

    /// Sets an explicit rental date.
    pub fn with_rental_date(mut self, date: NaiveDate) -> Self {
        self.rental_date = Some(date);
        self
    }

    /// Sets an explicit due date.
    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Sets an explicit daily rate.
    pub fn with_daily_rate(mut self, rate: f64) -> Self {
        self.daily_rate = Some(rate);
        self
    }
}

/// Fleet-wide rental statistics, computed in one pass under the store lock
/// after refreshing derived statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalStats {
    pub total_rentals: usize,
    pub active_rentals: usize,
    pub overdue_rentals: usize,
    pub returned_rentals: usize,
    /// Sum of every rental's total cost as of today, rounded to cents.
    pub total_revenue: f64,
    pub total_late_fees: f64,
}
