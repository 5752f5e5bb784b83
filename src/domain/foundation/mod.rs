//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the rental domain.

mod calendar;
mod clock;
mod errors;
mod genre;
mod ids;
mod membership;
pub mod money;
mod policy;
mod priority;
mod rating;
mod rental_status;

pub use calendar::{trailing_months, whole_months_between, YearMonth};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{DomainError, ErrorKind, ValidationError};
pub use genre::Genre;
pub use ids::{CustomerId, IdSequence, MovieId, RentalId, WatchlistItemId};
pub use membership::MembershipTier;
pub use policy::RentalPolicy;
pub use priority::WatchPriority;
pub use rating::StarRating;
pub use rental_status::RentalStatus;
