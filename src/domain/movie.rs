//! Movie catalog entity and statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::foundation::{Genre, MovieId, StarRating, ValidationError};

/// Maximum length of a movie name.
pub const MAX_NAME_LEN: usize = 255;

/// A movie in the rental catalog.
///
/// Rentals and watchlist entries reference movies by id only and keep a
/// denormalized snapshot of the fields they need; mutating a movie never
/// rewrites history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Store-assigned id; zero on a draft that has not been added yet.
    pub id: MovieId,
    pub name: String,
    pub release_date: Option<NaiveDate>,
    pub genre: Option<Genre>,
    pub rating: Option<StarRating>,
}

impl Movie {
    /// Creates a draft movie with the given name. The id is assigned by the
    /// repository on `add`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MovieId::new(0),
            name: name.into(),
            release_date: None,
            genre: None,
            rating: None,
        }
    }

    /// Sets the genre.
    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    /// Sets the star rating.
    pub fn with_rating(mut self, rating: StarRating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the release date.
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    /// Validates the movie's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
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

/// Catalog-wide statistics, computed in one pass under the store lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieStats {
    pub total_movies: usize,
    pub rated_movies: usize,
    /// Count of movies per star value (1..=5). Unrated movies are excluded.
    pub by_rating: BTreeMap<u8, usize>,
    /// Mean star value over rated movies, rounded to two decimals.
    pub average_rating: Option<f64>,
}
