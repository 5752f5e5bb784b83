//! Customer entity and statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::foundation::{CustomerId, MembershipTier, ValidationError};
use super::movie::MAX_NAME_LEN;

/// A rental-store customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned id; zero on a draft that has not been added yet.
    pub id: CustomerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub member_since: Option<NaiveDate>,
    pub membership: MembershipTier,
}

impl Customer {
    /// Creates a draft customer with the given name and Basic membership.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(0),
            name: name.into(),
            email: None,
            phone: None,
            member_since: None,
            membership: MembershipTier::Basic,
        }
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the membership start date.
    pub fn with_member_since(mut self, date: NaiveDate) -> Self {
        self.member_since = Some(date);
        self
    }

    /// Sets the membership tier.
    pub fn with_membership(mut self, tier: MembershipTier) -> Self {
        self.membership = tier;
        self
    }

    /// Validates the customer's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::too_long(
                "name",
                MAX_NAME_LEN,
                self.name.chars().count(),
            ));
        }
        Ok(())
    }
}

/// Customer-base statistics, computed in one pass under the store lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_customers: usize,
    /// Count of customers per membership tier, every tier present.
    pub by_tier: BTreeMap<MembershipTier, usize>,
}
