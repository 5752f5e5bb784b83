//! Watchlist entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::foundation::{
    CustomerId, Genre, MovieId, StarRating, ValidationError, WatchPriority, WatchlistItemId,
};
use super::movie::MAX_NAME_LEN;

/// Maximum length of a watchlist note.
pub const MAX_NOTE_LEN: usize = 500;

/// A movie a customer has marked to watch later.
///
/// Carries a denormalized snapshot of the movie's name, genre, and rating
/// taken when the entry was added. At most one entry may exist per
/// (customer, movie) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: WatchlistItemId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub movie_id: MovieId,
    pub movie_name: String,
    pub movie_genre: Option<Genre>,
    pub movie_rating: Option<StarRating>,
    pub added_date: NaiveDate,
    pub note: Option<String>,
    pub priority: WatchPriority,
}

impl WatchlistItem {
    /// Validates the entry's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::empty_field("customerName"));
        }
        if self.movie_name.trim().is_empty() {
            return Err(ValidationError::empty_field("movieName"));
        }
        if self.movie_name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::too_long(
                "movieName",
                MAX_NAME_LEN,
                self.movie_name.chars().count(),
            ));
        }
        if let Some(note) = &self.note {
            if note.chars().count() > MAX_NOTE_LEN {
                return Err(ValidationError::too_long(
                    "note",
                    MAX_NOTE_LEN,
                    note.chars().count(),
                ));
            }
        }
        Ok(())
    }
}

/// Input for adding a watchlist entry. The store assigns the id and stamps
/// the added date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWatchlistItem {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub movie_id: MovieId,
    pub movie_name: String,
    pub movie_genre: Option<Genre>,
    pub movie_rating: Option<StarRating>,
    pub note: Option<String>,
    pub priority: WatchPriority,
}

impl NewWatchlistItem {
    /// Creates an entry request with Normal priority and no note.
    pub fn new(
        customer_id: CustomerId,
        customer_name: impl Into<String>,
        movie_id: MovieId,
        movie_name: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            customer_name: customer_name.into(),
            movie_id,
            movie_name: movie_name.into(),
            movie_genre: None,
            movie_rating: None,
            note: None,
            priority: WatchPriority::Normal,
        }
    }

    /// Sets the movie snapshot fields.
    pub fn with_movie_details(mut self, genre: Option<Genre>, rating: Option<StarRating>) -> Self {
        self.movie_genre = genre;
        self.movie_rating = rating;
        self
    }

    /// Sets the free-text note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: WatchPriority) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> WatchlistItem {
        WatchlistItem {
            id: WatchlistItemId::new(1),
            customer_id: CustomerId::new(1),
            customer_name: "Ada".to_string(),
            movie_id: MovieId::new(1),
            movie_name: "Heat".to_string(),
            movie_genre: Some(Genre::Thriller),
            movie_rating: None,
            added_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            note: None,
            priority: WatchPriority::Normal,
        }
    }

    #[test]
    fn validate_accepts_well_formed_item() {
        assert!(sample_item().validate().is_ok());
    }

    #[test]
    fn validate_rejects_overlong_note() {
        let mut item = sample_item();
        item.note = Some("n".repeat(MAX_NOTE_LEN + 1));
        assert!(item.validate().is_err());
    }

    #[test]
    fn validate_accepts_note_at_limit() {
        let mut item = sample_item();
        item.note = Some("n".repeat(MAX_NOTE_LEN));
        assert!(item.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_customer_name() {
        let mut item = sample_item();
        item.customer_name = String::new();
        assert!(item.validate().is_err());
    }

    #[test]
    fn new_item_defaults_to_normal_priority() {
        let draft = NewWatchlistItem::new(CustomerId::new(1), "Ada", MovieId::new(2), "Alien");
        assert_eq!(draft.priority, WatchPriority::Normal);
        assert!(draft.note.is_none());
    }

    #[test]
    fn builder_sets_details_note_and_priority() {
        let draft = NewWatchlistItem::new(CustomerId::new(1), "Ada", MovieId::new(2), "Alien")
            .with_movie_details(Some(Genre::SciFi), StarRating::try_from_u8(5).ok())
            .with_note("rewatch with commentary")
            .with_priority(WatchPriority::MustWatch);

        assert_eq!(draft.movie_genre, Some(Genre::SciFi));
        assert_eq!(draft.priority, WatchPriority::MustWatch);
        assert_eq!(draft.note.as_deref(), Some("rewatch with commentary"));
    }
}
