//! Recommendation scoring service.
//!
//! Builds a per-customer genre preference profile from rental history and
//! scores every movie the customer has not rented yet. Recent rentals
//! weigh more: each adds a base point to its genre plus a bonus that
//! decays linearly to zero over thirty days.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Clock, CustomerId, DomainError, Genre, MovieId};
use crate::domain::Movie;
use crate::store::{MovieRepository, RentalRepository};

/// Days over which the recency bonus decays to zero.
const RECENCY_WINDOW_DAYS: i64 = 30;
/// Maximum recency bonus a single rental can contribute.
const RECENCY_BONUS: f64 = 0.5;
/// Weight applied to the genre preference score.
const GENRE_WEIGHT: f64 = 2.0;
/// Extra credit for a perfect five-star rating.
const TOP_RATED_BONUS: f64 = 1.0;

/// A scored movie suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub movie: Movie,
    pub score: f64,
    pub reason: String,
}

/// Produces per-customer movie recommendations.
#[derive(Clone)]
pub struct RecommendationService {
    movies: MovieRepository,
    rentals: RentalRepository,
    clock: Arc<dyn Clock>,
}

impl RecommendationService {
    /// Creates the service over the given repositories.
    pub fn new(movies: MovieRepository, rentals: RentalRepository, clock: Arc<dyn Clock>) -> Self {
        Self {
            movies,
            rentals,
            clock,
        }
    }

    /// Returns up to `max_recommendations` suggestions for the customer,
    /// best first. Movies the customer has already rented are never
    /// suggested.
    pub fn recommendations(
        &self,
        customer_id: CustomerId,
        max_recommendations: usize,
    ) -> Result<Vec<Recommendation>, DomainError> {
        if max_recommendations < 1 {
            return Err(DomainError::invalid_argument(
                "max recommendations must be at least 1",
            ));
        }

        let today = self.clock.today();
        let catalog = self.movies.get_all();
        let movie_index: HashMap<MovieId, &Movie> =
            catalog.iter().map(|m| (m.id, m)).collect();

        let history: Vec<_> = self
            .rentals
            .get_all()
            .into_iter()
            .filter(|r| r.customer_id == customer_id)
            .collect();

        let mut genre_preferences: HashMap<Genre, f64> = HashMap::new();
        let mut already_rented: HashSet<MovieId> = HashSet::new();
        for rental in &history {
            already_rented.insert(rental.movie_id);
            let genre = match movie_index.get(&rental.movie_id).and_then(|m| m.genre) {
                Some(genre) => genre,
                None => continue,
            };
            let days_since = (today - rental.rental_date).num_days();
            let recency_bonus = if (0..=RECENCY_WINDOW_DAYS).contains(&days_since) {
                RECENCY_BONUS * (1.0 - days_since as f64 / RECENCY_WINDOW_DAYS as f64)
            } else {
                0.0
            };
            *genre_preferences.entry(genre).or_insert(0.0) += 1.0 + recency_bonus;
        }

        let mut suggestions: Vec<Recommendation> = catalog
            .iter()
            .filter(|movie| !already_rented.contains(&movie.id))
            .map(|movie| {
                let preference = movie
                    .genre
                    .and_then(|g| genre_preferences.get(&g))
                    .copied()
                    .unwrap_or(0.0);
                let rating_value = movie.rating.map(|r| r.value() as f64).unwrap_or(0.0);
                let top_rated = movie.rating.map_or(false, |r| r.value() == 5);

                let mut score = preference * GENRE_WEIGHT + rating_value;
                if top_rated {
                    score += TOP_RATED_BONUS;
                }

                Recommendation {
                    movie: movie.clone(),
                    score,
                    reason: Self::reason_for(movie, preference > 0.0),
                }
            })
            .collect();

        suggestions.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.movie.rating.cmp(&a.movie.rating))
                .then_with(|| {
                    a.movie
                        .name
                        .to_lowercase()
                        .cmp(&b.movie.name.to_lowercase())
                })
        });
        suggestions.truncate(max_recommendations);
        Ok(suggestions)
    }

    /// Picks the most specific applicable reason, in precedence order:
    /// preferred genre with a high rating, preferred genre, high rating,
    /// then the exploration fallback.
    fn reason_for(movie: &Movie, preferred_genre: bool) -> String {
        let high_rating = movie.rating.map_or(false, |r| r.is_high());
        match (preferred_genre, high_rating, movie.genre) {
            (true, true, Some(genre)) => format!(
                "Highly rated {} pick, one of your favorite genres",
                genre.display_name()
            ),
            (true, false, Some(genre)) => {
                format!("Because you often rent {} movies", genre.display_name())
            }
            (_, true, _) => "Highly rated by our customers".to_string(),
            _ => "Try something new and explore a different genre".to_string(),
        }
    }
}
