//! Star rating value object (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Movie star rating: 1 (poor) to 5 (excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    /// The highest possible rating.
    pub const MAX: StarRating = StarRating(5);

    /// Creates a StarRating from an integer, returning an error if out of range.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        if (1..=5).contains(&value) {
            Ok(StarRating(value))
        } else {
            Err(ValidationError::out_of_range(
                "rating",
                1.0,
                5.0,
                value as f64,
            ))
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns true if this is a 4 or 5 star rating.
    pub fn is_high(&self) -> bool {
        self.0 >= 4
    }
}

impl TryFrom<u8> for StarRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        StarRating::try_from_u8(value)
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> u8 {
        rating.0
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}
