//! In-memory watchlist store and repository.
//!
//! Uniqueness of the (customer, movie) pair is enforced with an auxiliary
//! set checked inside the same critical section as the insert, the same
//! discipline the rental store uses for checkout.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::{
    Clock, CustomerId, DomainError, IdSequence, MovieId, WatchlistItemId,
};
use crate::domain::watchlist::{NewWatchlistItem, WatchlistItem};

/// Process-wide watchlist storage.
#[derive(Debug, Default)]
pub struct WatchlistStore {
    inner: Mutex<WatchlistStoreInner>,
}

#[derive(Debug, Default)]
struct WatchlistStoreInner {
    items: Vec<WatchlistItem>,
    pairs: HashSet<(CustomerId, MovieId)>,
    ids: IdSequence,
}

impl WatchlistStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A movie ranked by how many customers have watchlisted it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistedMovie {
    pub movie_id: MovieId,
    pub movie_name: String,
    pub watchlist_count: usize,
}

/// Thread-safe watchlist operations over a shared [`WatchlistStore`].
#[derive(Clone)]
pub struct WatchlistRepository {
    store: Arc<WatchlistStore>,
    clock: Arc<dyn Clock>,
}

impl WatchlistRepository {
    /// Creates a repository over the given shared store.
    pub fn new(store: Arc<WatchlistStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns the entry with the given id.
    pub fn get(&self, id: WatchlistItemId) -> Result<WatchlistItem, DomainError> {
        let inner = self.lock();
        inner
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(DomainError::WatchlistItemNotFound(id))
    }

    /// Returns every entry, highest priority first, newest first within a
    /// priority.
    pub fn get_all(&self) -> Vec<WatchlistItem> {
        let mut items = self.lock().items.clone();
        Self::sort_for_display(&mut items);
        items
    }

    /// Returns one customer's entries, highest priority first, newest first
    /// within a priority.
    pub fn get_by_customer(&self, customer_id: CustomerId) -> Vec<WatchlistItem> {
        let mut items: Vec<WatchlistItem> = {
            let inner = self.lock();
            inner
                .items
                .iter()
                .filter(|i| i.customer_id == customer_id)
                .cloned()
                .collect()
        };
        Self::sort_for_display(&mut items);
        items
    }

    /// Adds an entry, stamping today's date and assigning a fresh id.
    ///
    /// The duplicate check on the (customer, movie) pair happens inside the
    /// same critical section as the insert; adding the same pair twice is a
    /// conflict until the first entry is removed.
    pub fn add(&self, draft: NewWatchlistItem) -> Result<WatchlistItem, DomainError> {
        if draft.customer_name.trim().is_empty() {
            return Err(DomainError::MissingArgument("customerName"));
        }
        if draft.movie_name.trim().is_empty() {
            return Err(DomainError::MissingArgument("movieName"));
        }

        let mut item = WatchlistItem {
            id: WatchlistItemId::new(0),
            customer_id: draft.customer_id,
            customer_name: draft.customer_name,
            movie_id: draft.movie_id,
            movie_name: draft.movie_name,
            movie_genre: draft.movie_genre,
            movie_rating: draft.movie_rating,
            added_date: self.clock.today(),
            note: draft.note,
            priority: draft.priority,
        };
        item.validate()?;

        let mut inner = self.lock();
        let pair = (item.customer_id, item.movie_id);
        if inner.pairs.contains(&pair) {
            tracing::warn!(
                customer_id = item.customer_id.value(),
                movie_id = item.movie_id.value(),
                "duplicate watchlist entry rejected"
            );
            return Err(DomainError::DuplicateWatchlistEntry {
                customer_id: item.customer_id,
                movie_id: item.movie_id,
            });
        }
        item.id = WatchlistItemId::new(inner.ids.next_value());
        inner.pairs.insert(pair);
        inner.items.push(item.clone());
        Ok(item)
    }

    /// Updates the mutable parts of an entry: note and priority. Identity
    /// and snapshot fields are kept from the stored entry.
    pub fn update(&self, item: WatchlistItem) -> Result<WatchlistItem, DomainError> {
        item.validate()?;

        let mut inner = self.lock();
        match inner.items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => {
                slot.note = item.note;
                slot.priority = item.priority;
                Ok(slot.clone())
            }
            None => Err(DomainError::WatchlistItemNotFound(item.id)),
        }
    }

    /// Removes the entry with the given id.
    pub fn remove(&self, id: WatchlistItemId) -> Result<(), DomainError> {
        let mut inner = self.lock();
        let position = inner
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(DomainError::WatchlistItemNotFound(id))?;
        let removed = inner.items.remove(position);
        inner.pairs.remove(&(removed.customer_id, removed.movie_id));
        Ok(())
    }

    /// Removes a customer's entry for a specific movie.
    pub fn remove_by_customer_and_movie(
        &self,
        customer_id: CustomerId,
        movie_id: MovieId,
    ) -> Result<(), DomainError> {
        let mut inner = self.lock();
        let position = inner
            .items
            .iter()
            .position(|i| i.customer_id == customer_id && i.movie_id == movie_id)
            .ok_or(DomainError::WatchlistItemNotFound(WatchlistItemId::new(0)))?;
        inner.items.remove(position);
        inner.pairs.remove(&(customer_id, movie_id));
        Ok(())
    }

    /// Clears every entry for a customer. Returns how many were removed.
    pub fn clear_customer_watchlist(&self, customer_id: CustomerId) -> usize {
        let mut inner = self.lock();
        let before = inner.items.len();
        inner.items.retain(|i| i.customer_id != customer_id);
        let removed = before - inner.items.len();
        inner.pairs.retain(|(c, _)| *c != customer_id);
        if removed > 0 {
            tracing::debug!(
                customer_id = customer_id.value(),
                removed,
                "customer watchlist cleared"
            );
        }
        removed
    }

    /// The `limit` most-watchlisted movies, count descending, ties broken
    /// by name ascending. `limit` must be at least 1.
    pub fn get_most_watchlisted(&self, limit: usize) -> Result<Vec<WatchlistedMovie>, DomainError> {
        if limit < 1 {
            return Err(DomainError::invalid_argument("limit must be at least 1"));
        }

        let mut by_movie: HashMap<MovieId, WatchlistedMovie> = HashMap::new();
        {
            let inner = self.lock();
            for item in &inner.items {
                by_movie
                    .entry(item.movie_id)
                    .or_insert_with(|| WatchlistedMovie {
                        movie_id: item.movie_id,
                        movie_name: item.movie_name.clone(),
                        watchlist_count: 0,
                    })
                    .watchlist_count += 1;
            }
        }

        let mut ranked: Vec<WatchlistedMovie> = by_movie.into_values().collect();
        ranked.sort_by(|a, b| {
            b.watchlist_count
                .cmp(&a.watchlist_count)
                .then_with(|| a.movie_name.to_lowercase().cmp(&b.movie_name.to_lowercase()))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }

    fn sort_for_display(items: &mut [WatchlistItem]) {
        items.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.added_date.cmp(&a.added_date))
        });
    }

    fn lock(&self) -> MutexGuard<'_, WatchlistStoreInner> {
        self.store
            .inner
            .lock()
            .expect("watchlist store lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorKind, FixedClock, WatchPriority};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (WatchlistRepository, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(date(2026, 3, 1)));
        let repo = WatchlistRepository::new(Arc::new(WatchlistStore::new()), clock.clone());
        (repo, clock)
    }

    fn draft(customer: u64, movie: u64, name: &str) -> NewWatchlistItem {
        NewWatchlistItem::new(
            CustomerId::new(customer),
            format!("Customer {}", customer),
            MovieId::new(movie),
            name,
        )
    }

    #[test]
    fn add_stamps_today_and_assigns_id() {
        let (repo, _) = setup();
        let item = repo.add(draft(1, 1, "Heat")).unwrap();
        assert_eq!(item.id, WatchlistItemId::new(1));
        assert_eq!(item.added_date, date(2026, 3, 1));
    }

    #[test]
    fn duplicate_pair_is_conflict() {
        let (repo, _) = setup();
        repo.add(draft(1, 1, "Heat")).unwrap();

        let err = repo.add(draft(1, 1, "Heat")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn same_movie_for_different_customers_is_allowed() {
        let (repo, _) = setup();
        repo.add(draft(1, 1, "Heat")).unwrap();
        assert!(repo.add(draft(2, 1, "Heat")).is_ok());
    }

    #[test]
    fn pair_can_be_re_added_after_removal() {
        let (repo, _) = setup();
        let item = repo.add(draft(1, 1, "Heat")).unwrap();
        repo.remove(item.id).unwrap();
        assert!(repo.add(draft(1, 1, "Heat")).is_ok());
    }

    #[test]
    fn pair_can_be_re_added_after_remove_by_customer_and_movie() {
        let (repo, _) = setup();
        repo.add(draft(1, 1, "Heat")).unwrap();
        repo.remove_by_customer_and_movie(CustomerId::new(1), MovieId::new(1))
            .unwrap();
        assert!(repo.add(draft(1, 1, "Heat")).is_ok());
    }

    #[test]
    fn remove_by_customer_and_movie_unknown_pair_is_not_found() {
        let (repo, _) = setup();
        assert!(repo
            .remove_by_customer_and_movie(CustomerId::new(1), MovieId::new(1))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn get_by_customer_orders_by_priority_then_recency() {
        let (repo, clock) = setup();
        repo.add(draft(1, 1, "Heat")).unwrap();
        clock.set_today(date(2026, 3, 5));
        repo.add(draft(1, 2, "Alien").with_priority(WatchPriority::MustWatch))
            .unwrap();
        clock.set_today(date(2026, 3, 10));
        repo.add(draft(1, 3, "Primer")).unwrap();

        let items = repo.get_by_customer(CustomerId::new(1));
        let names: Vec<&str> = items.iter().map(|i| i.movie_name.as_str()).collect();
        // MustWatch first, then Normal entries newest first.
        assert_eq!(names, vec!["Alien", "Primer", "Heat"]);
    }

    #[test]
    fn update_changes_note_and_priority_only() {
        let (repo, _) = setup();
        let item = repo.add(draft(1, 1, "Heat")).unwrap();

        let mut edited = item.clone();
        edited.movie_name = "Tampered".to_string();
        edited.note = Some("director's cut".to_string());
        edited.priority = WatchPriority::High;
        repo.update(edited).unwrap();

        let stored = repo.get(item.id).unwrap();
        assert_eq!(stored.movie_name, "Heat");
        assert_eq!(stored.note.as_deref(), Some("director's cut"));
        assert_eq!(stored.priority, WatchPriority::High);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (repo, _) = setup();
        let mut ghost = repo.add(draft(1, 1, "Heat")).unwrap();
        ghost.id = WatchlistItemId::new(99);
        assert!(repo.update(ghost).unwrap_err().is_not_found());
    }

    #[test]
    fn clear_customer_watchlist_removes_all_and_reports_count() {
        let (repo, _) = setup();
        repo.add(draft(1, 1, "Heat")).unwrap();
        repo.add(draft(1, 2, "Alien")).unwrap();
        repo.add(draft(2, 1, "Heat")).unwrap();

        assert_eq!(repo.clear_customer_watchlist(CustomerId::new(1)), 2);
        assert!(repo.get_by_customer(CustomerId::new(1)).is_empty());
        assert_eq!(repo.get_by_customer(CustomerId::new(2)).len(), 1);
        // Cleared pairs are free again.
        assert!(repo.add(draft(1, 1, "Heat")).is_ok());
    }

    #[test]
    fn most_watchlisted_ranks_by_count_then_name() {
        let (repo, _) = setup();
        repo.add(draft(1, 1, "Heat")).unwrap();
        repo.add(draft(2, 1, "Heat")).unwrap();
        repo.add(draft(1, 2, "Alien")).unwrap();
        repo.add(draft(2, 2, "Alien")).unwrap();
        repo.add(draft(1, 3, "Primer")).unwrap();

        let ranked = repo.get_most_watchlisted(2).unwrap();
        assert_eq!(ranked.len(), 2);
        // Heat and Alien tie on count; Alien wins the name tiebreak.
        assert_eq!(ranked[0].movie_name, "Alien");
        assert_eq!(ranked[1].movie_name, "Heat");
        assert_eq!(ranked[0].watchlist_count, 2);
    }

    #[test]
    fn most_watchlisted_rejects_zero_limit() {
        let (repo, _) = setup();
        let err = repo.get_most_watchlisted(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn reads_return_defensive_copies() {
        let (repo, _) = setup();
        let item = repo.add(draft(1, 1, "Heat")).unwrap();

        let mut copy = repo.get(item.id).unwrap();
        copy.note = Some("tampered".to_string());

        assert!(repo.get(item.id).unwrap().note.is_none());
    }

    #[test]
    fn overlong_note_is_invalid_argument() {
        let (repo, _) = setup();
        let err = repo
            .add(draft(1, 1, "Heat").with_note("n".repeat(501)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
