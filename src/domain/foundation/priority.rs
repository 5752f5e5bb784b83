//! Watchlist priority enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How eagerly a customer wants to watch a movie, ordered low to high.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WatchPriority {
    #[default]
    Normal,
    High,
    MustWatch,
}

impl WatchPriority {
    /// Returns the display name for this priority.
    pub fn display_name(&self) -> &'static str {
        match self {
            WatchPriority::Normal => "Normal",
            WatchPriority::High => "High",
            WatchPriority::MustWatch => "Must Watch",
        }
    }
}

impl fmt::Display for WatchPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_normal() {
        assert_eq!(WatchPriority::default(), WatchPriority::Normal);
    }

    #[test]
    fn priorities_are_ordered() {
        assert!(WatchPriority::Normal < WatchPriority::High);
        assert!(WatchPriority::High < WatchPriority::MustWatch);
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(format!("{}", WatchPriority::MustWatch), "Must Watch");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&WatchPriority::MustWatch).unwrap(),
            "\"must_watch\""
        );
    }
}
