//! Monetary helpers.
//!
//! Amounts are plain `f64` with two-decimal currency semantics. Arithmetic
//! happens in full precision; [`round_cents`] is applied at aggregation
//! boundaries so reported figures always line up with displayed currency.

/// Rounds an amount to two decimal places (half away from zero).
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Divides `total` by `count`, rounded to cents; zero when `count` is zero.
pub fn average_or_zero(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round_cents(total / count as f64)
    }
}
