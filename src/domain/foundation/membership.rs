//! Membership tier definitions.
//!
//! Represents the customer membership levels of the rental store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer membership tier, ordered lowest to highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    /// Entry tier, assigned when no tier is specified.
    #[default]
    Basic,
    Silver,
    Gold,
    Platinum,
}

impl MembershipTier {
    /// All tiers, lowest to highest.
    pub const ALL: [MembershipTier; 4] = [
        MembershipTier::Basic,
        MembershipTier::Silver,
        MembershipTier::Gold,
        MembershipTier::Platinum,
    ];

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            MembershipTier::Basic => "Basic",
            MembershipTier::Silver => "Silver",
            MembershipTier::Gold => "Gold",
            MembershipTier::Platinum => "Platinum",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = higher tier. Used for upgrade checks and ordering.
    pub fn rank(&self) -> u8 {
        match self {
            MembershipTier::Basic => 0,
            MembershipTier::Silver => 1,
            MembershipTier::Gold => 2,
            MembershipTier::Platinum => 3,
        }
    }

    /// Points this tier contributes to a customer's loyalty score.
    pub fn loyalty_bonus(&self) -> u32 {
        match self {
            MembershipTier::Basic => 1,
            MembershipTier::Silver => 4,
            MembershipTier::Gold => 7,
            MembershipTier::Platinum => 10,
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tier_is_basic() {
        assert_eq!(MembershipTier::default(), MembershipTier::Basic);
    }

    #[test]
    fn tiers_are_ordered_low_to_high() {
        assert!(MembershipTier::Basic < MembershipTier::Silver);
        assert!(MembershipTier::Silver < MembershipTier::Gold);
        assert!(MembershipTier::Gold < MembershipTier::Platinum);
    }

    #[test]
    fn rank_matches_ordering() {
        let mut previous = None;
        for tier in MembershipTier::ALL {
            if let Some(prev) = previous {
                assert!(tier.rank() > MembershipTier::rank(&prev));
            }
            previous = Some(tier);
        }
    }

    #[test]
    fn loyalty_bonus_values_are_correct() {
        assert_eq!(MembershipTier::Basic.loyalty_bonus(), 1);
        assert_eq!(MembershipTier::Silver.loyalty_bonus(), 4);
        assert_eq!(MembershipTier::Gold.loyalty_bonus(), 7);
        assert_eq!(MembershipTier::Platinum.loyalty_bonus(), 10);
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MembershipTier::Gold).unwrap(),
            "\"gold\""
        );
    }

    #[test]
    fn tier_deserializes_from_lowercase() {
        let tier: MembershipTier = serde_json::from_str("\"platinum\"").unwrap();
        assert_eq!(tier, MembershipTier::Platinum);
    }
}
