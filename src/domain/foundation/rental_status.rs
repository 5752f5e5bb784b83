//! RentalStatus enum for tracking the rental lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a rental.
///
/// `Overdue` is a derived state: a rental becomes Overdue lazily on read
/// whenever today is past its due date and it has not been returned.
/// `Returned` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    #[default]
    Active,
    Overdue,
    Returned,
}

impl RentalStatus {
    /// Returns true if the rental still holds its movie (Active or Overdue).
    pub fn is_open(&self) -> bool {
        !matches!(self, RentalStatus::Returned)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Active -> Overdue (derived)
    /// - Active -> Returned
    /// - Overdue -> Returned
    pub fn can_transition_to(&self, target: &RentalStatus) -> bool {
        use RentalStatus::*;
        matches!(
            (self, target),
            (Active, Overdue) | (Active, Returned) | (Overdue, Returned)
        )
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RentalStatus::Active => "Active",
            RentalStatus::Overdue => "Overdue",
            RentalStatus::Returned => "Returned",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(RentalStatus::default(), RentalStatus::Active);
    }

    #[test]
    fn active_and_overdue_are_open() {
        assert!(RentalStatus::Active.is_open());
        assert!(RentalStatus::Overdue.is_open());
        assert!(!RentalStatus::Returned.is_open());
    }

    #[test]
    fn active_can_become_overdue_or_returned() {
        assert!(RentalStatus::Active.can_transition_to(&RentalStatus::Overdue));
        assert!(RentalStatus::Active.can_transition_to(&RentalStatus::Returned));
    }

    #[test]
    fn overdue_can_only_become_returned() {
        assert!(RentalStatus::Overdue.can_transition_to(&RentalStatus::Returned));
        assert!(!RentalStatus::Overdue.can_transition_to(&RentalStatus::Active));
    }

    #[test]
    fn returned_is_terminal() {
        assert!(!RentalStatus::Returned.can_transition_to(&RentalStatus::Active));
        assert!(!RentalStatus::Returned.can_transition_to(&RentalStatus::Overdue));
        assert!(!RentalStatus::Returned.can_transition_to(&RentalStatus::Returned));
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(format!("{}", RentalStatus::Active), "Active");
        assert_eq!(format!("{}", RentalStatus::Overdue), "Overdue");
        assert_eq!(format!("{}", RentalStatus::Returned), "Returned");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&RentalStatus::Overdue).unwrap(),
            "\"overdue\""
        );
    }
}
