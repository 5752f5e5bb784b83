//! Strongly-typed identifier value objects.
//!
//! Ids are store-assigned, monotonically increasing integers. They are never
//! reused, even after the entity they identified is removed.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id value.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw id value.
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a movie in the catalog.
    MovieId
}

entity_id! {
    /// Unique identifier for a customer.
    CustomerId
}

entity_id! {
    /// Unique identifier for a rental record.
    RentalId
}

entity_id! {
    /// Unique identifier for a watchlist entry.
    WatchlistItemId
}

/// Monotonic id counter owned by each entity store.
///
/// Starts at 1; the zero value is reserved as a "not yet assigned" marker on
/// draft entities.
#[derive(Debug)]
pub struct IdSequence(u64);

impl IdSequence {
    /// Creates a sequence that will hand out ids starting at 1.
    pub fn new() -> Self {
        Self(0)
    }

    /// Returns the next id, advancing the sequence.
    pub fn next_value(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
