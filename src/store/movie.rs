//! In-memory movie store and repository.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{money, DomainError, Genre, IdSequence, MovieId, StarRating};
use crate::domain::movie::{Movie, MovieStats};

/// Process-wide movie storage: one mutex, one id counter.
///
/// Constructed once at startup and shared between repository instances.
/// Entries keep insertion order; ids are never reused.
#[derive(Debug, Default)]
pub struct MovieStore {
    inner: Mutex<MovieStoreInner>,
}

#[derive(Debug, Default)]
struct MovieStoreInner {
    movies: Vec<Movie>,
    ids: IdSequence,
}

impl MovieStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Thread-safe CRUD and catalog queries over a shared [`MovieStore`].
///
/// Every read returns owned clones; callers may mutate results freely
/// without affecting the store.
#[derive(Debug, Clone)]
pub struct MovieRepository {
    store: Arc<MovieStore>,
}

impl MovieRepository {
    /// Creates a repository over the given shared store.
    pub fn new(store: Arc<MovieStore>) -> Self {
        Self { store }
    }

    /// Returns the movie with the given id.
    pub fn get(&self, id: MovieId) -> Result<Movie, DomainError> {
        let inner = self.lock();
        inner
            .movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(DomainError::MovieNotFound(id))
    }

    /// Returns every movie in insertion order.
    pub fn get_all(&self) -> Vec<Movie> {
        self.lock().movies.clone()
    }

    /// Adds a movie, assigning it a fresh id. Any caller-supplied id is
    /// ignored.
    pub fn add(&self, movie: Movie) -> Result<Movie, DomainError> {
        if movie.name.trim().is_empty() {
            return Err(DomainError::MissingArgument("name"));
        }
        movie.validate()?;

        let mut inner = self.lock();
        let mut movie = movie;
        movie.id = MovieId::new(inner.ids.next_value());
        inner.movies.push(movie.clone());
        tracing::debug!(movie_id = movie.id.value(), name = %movie.name, "movie added");
        Ok(movie)
    }

    /// Replaces the stored movie with the same id.
    pub fn update(&self, movie: Movie) -> Result<Movie, DomainError> {
        if movie.name.trim().is_empty() {
            return Err(DomainError::MissingArgument("name"));
        }
        movie.validate()?;

        let mut inner = self.lock();
        match inner.movies.iter_mut().find(|m| m.id == movie.id) {
            Some(slot) => {
                *slot = movie.clone();
                Ok(movie)
            }
            None => Err(DomainError::MovieNotFound(movie.id)),
        }
    }

    /// Removes the movie with the given id.
    pub fn remove(&self, id: MovieId) -> Result<(), DomainError> {
        let mut inner = self.lock();
        let before = inner.movies.len();
        inner.movies.retain(|m| m.id != id);
        if inner.movies.len() == before {
            return Err(DomainError::MovieNotFound(id));
        }
        tracing::debug!(movie_id = id.value(), "movie removed");
        Ok(())
    }

    /// Case-insensitive substring search on name, optionally narrowed to an
    /// exact genre and a minimum rating. Results are ordered by name.
    pub fn search(
        &self,
        query: &str,
        genre: Option<Genre>,
        min_rating: Option<StarRating>,
    ) -> Vec<Movie> {
        let needle = query.trim().to_lowercase();
        let mut results: Vec<Movie> = {
            let inner = self.lock();
            inner
                .movies
                .iter()
                .filter(|m| needle.is_empty() || m.name.to_lowercase().contains(&needle))
                .filter(|m| genre.map_or(true, |g| m.genre == Some(g)))
                .filter(|m| min_rating.map_or(true, |min| m.rating.map_or(false, |r| r >= min)))
                .cloned()
                .collect()
        };
        results.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        results
    }

    /// Computes catalog statistics in one pass under the lock.
    pub fn stats(&self) -> MovieStats {
        let inner = self.lock();
        let mut by_rating: BTreeMap<u8, usize> = BTreeMap::new();
        let mut rating_sum = 0u32;
        for movie in &inner.movies {
            if let Some(rating) = movie.rating {
                *by_rating.entry(rating.value()).or_insert(0) += 1;
                rating_sum += rating.value() as u32;
            }
        }
        let rated_movies: usize = by_rating.values().sum();
        MovieStats {
            total_movies: inner.movies.len(),
            rated_movies,
            by_rating,
            average_rating: if rated_movies == 0 {
                None
            } else {
                Some(money::round_cents(rating_sum as f64 / rated_movies as f64))
            },
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MovieStoreInner> {
        self.store.inner.lock().expect("movie store lock poisoned")
    }
}
