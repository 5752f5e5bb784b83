//! Clock abstraction for date-only business time.
//!
//! Repositories and services never call `Utc::now()` directly; they ask an
//! injected clock for "today". Production code uses [`SystemClock`], tests use
//! [`FixedClock`] so overdue derivation and late-fee math are deterministic.

use chrono::{NaiveDate, Utc};
use std::sync::Mutex;

/// Source of the current business date.
pub trait Clock: Send + Sync {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time, UTC.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a settable date. Intended for tests and demos.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Creates a clock pinned to the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Moves the clock to a new date.
    pub fn set_today(&self, today: NaiveDate) {
        *self.today.lock().expect("clock lock poisoned") = today;
    }

    /// Advances the clock by the given number of days.
    pub fn advance_days(&self, days: i64) {
        let mut guard = self.today.lock().expect("clock lock poisoned");
        *guard += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().expect("clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn system_clock_returns_a_plausible_date() {
        let today = SystemClock.today();
        assert!(today.format("%Y").to_string().parse::<i32>().unwrap() >= 2024);
    }

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let clock = FixedClock::new(date(2026, 3, 15));
        assert_eq!(clock.today(), date(2026, 3, 15));
    }

    #[test]
    fn fixed_clock_can_be_moved() {
        let clock = FixedClock::new(date(2026, 3, 15));
        clock.set_today(date(2026, 4, 1));
        assert_eq!(clock.today(), date(2026, 4, 1));
    }

    #[test]
    fn fixed_clock_advances_by_days() {
        let clock = FixedClock::new(date(2026, 3, 15));
        clock.advance_days(10);
        assert_eq!(clock.today(), date(2026, 3, 25));
    }
}
