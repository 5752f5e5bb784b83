//! Error types for the domain layer.

use thiserror::Error;

use super::ids::{CustomerId, MovieId, RentalId, WatchlistItemId};

/// Errors that occur during value object or entity validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at most {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a too-long validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }
}

/// Coarse classification of a [`DomainError`].
///
/// Callers branch on the kind: a `NotFound` is typically surfaced as a
/// 404-equivalent, a `Conflict` as a user-facing business-rule message,
/// the remaining two indicate caller bugs and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidArgument,
    NullArgument,
}

/// Errors produced by repositories and services.
///
/// Variants carry the ids involved so callers can build precise messages;
/// [`DomainError::kind`] collapses them into the four categories callers
/// actually branch on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Movie {0} was not found")]
    MovieNotFound(MovieId),

    #[error("Customer {0} was not found")]
    CustomerNotFound(CustomerId),

    #[error("Rental {0} was not found")]
    RentalNotFound(RentalId),

    #[error("Watchlist item {0} was not found")]
    WatchlistItemNotFound(WatchlistItemId),

    #[error("Movie {0} is already rented out")]
    MovieAlreadyRented(MovieId),

    #[error("Rental {0} has already been returned")]
    RentalAlreadyReturned(RentalId),

    #[error("Customer {customer_id} already has movie {movie_id} on their watchlist")]
    DuplicateWatchlistEntry {
        customer_id: CustomerId,
        movie_id: MovieId,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Required argument '{0}' is missing")]
    MissingArgument(&'static str),
}

impl DomainError {
    /// Creates an invalid-argument error from any displayable message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DomainError::InvalidArgument(message.into())
    }

    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::MovieNotFound(_)
            | DomainError::CustomerNotFound(_)
            | DomainError::RentalNotFound(_)
            | DomainError::WatchlistItemNotFound(_) => ErrorKind::NotFound,
            DomainError::MovieAlreadyRented(_)
            | DomainError::RentalAlreadyReturned(_)
            | DomainError::DuplicateWatchlistEntry { .. } => ErrorKind::Conflict,
            DomainError::InvalidArgument(_) | DomainError::Validation(_) => {
                ErrorKind::InvalidArgument
            }
            DomainError::MissingArgument(_) => ErrorKind::NullArgument,
        }
    }

    /// Returns true if this error is a business-rule conflict.
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// Returns true if this error is a missing-entity error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_too_long_displays_correctly() {
        let err = ValidationError::too_long("note", 500, 612);
        assert_eq!(
            format!("{}", err),
            "Field 'note' must be at most 500 characters, got 612"
        );
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("dailyRate", 0.01, 999.99, 1500.0);
        assert_eq!(
            format!("{}", err),
            "Field 'dailyRate' must be between 0.01 and 999.99, got 1500"
        );
    }

    #[test]
    fn not_found_variants_classify_as_not_found() {
        assert_eq!(
            DomainError::MovieNotFound(MovieId::new(7)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::RentalNotFound(RentalId::new(3)).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn conflict_variants_classify_as_conflict() {
        assert!(DomainError::MovieAlreadyRented(MovieId::new(1)).is_conflict());
        assert!(DomainError::RentalAlreadyReturned(RentalId::new(1)).is_conflict());
        assert!(DomainError::DuplicateWatchlistEntry {
            customer_id: CustomerId::new(1),
            movie_id: MovieId::new(2),
        }
        .is_conflict());
    }

    #[test]
    fn invalid_argument_classifies_correctly() {
        let err = DomainError::invalid_argument("limit must be at least 1");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn validation_error_converts_into_invalid_argument_kind() {
        let err: DomainError = ValidationError::empty_field("name").into();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn missing_argument_classifies_as_null_argument() {
        assert_eq!(
            DomainError::MissingArgument("rental").kind(),
            ErrorKind::NullArgument
        );
    }

    #[test]
    fn already_rented_displays_movie_id() {
        let err = DomainError::MovieAlreadyRented(MovieId::new(42));
        assert_eq!(format!("{}", err), "Movie 42 is already rented out");
    }
}
