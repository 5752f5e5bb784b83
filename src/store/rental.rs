//! In-memory rental store and repository.
//!
//! This is the core state machine of the crate. The store keeps the rental
//! list and an auxiliary set of currently-rented movie ids; the two are only
//! ever updated together, inside the same critical section. That single-lock
//! discipline is what makes `checkout` atomic: two concurrent checkouts for
//! the same movie cannot both observe it as available.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::{
    money, Clock, DomainError, IdSequence, MovieId, RentalId, RentalPolicy, RentalStatus,
};
use crate::domain::rental::{NewRental, Rental, RentalStats};

/// Process-wide rental storage.
///
/// `rented` holds the movie id of every open (Active or Overdue) rental and
/// must stay consistent with `rentals` at all times; both live behind the
/// same mutex.
#[derive(Debug, Default)]
pub struct RentalStore {
    inner: Mutex<RentalStoreInner>,
}

#[derive(Debug, Default)]
struct RentalStoreInner {
    rentals: Vec<Rental>,
    rented: HashSet<MovieId>,
    ids: IdSequence,
}

impl RentalStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RentalStoreInner {
    /// Applies the lazy Active -> Overdue transition to every stored rental.
    ///
    /// Called at the top of every read path, under the lock, so no caller
    /// ever observes a stale Active status. Never touches Returned rentals
    /// and never changes `rented` membership.
    fn refresh_statuses(&mut self, today: chrono::NaiveDate) {
        for rental in &mut self.rentals {
            rental.status = rental.derived_status(today);
        }
    }
}

/// Thread-safe rental lifecycle operations over a shared [`RentalStore`].
///
/// All reads refresh derived statuses first and return owned clones. The
/// one-open-rental-per-movie invariant is enforced inside the store lock by
/// `checkout`, `add`, and `update` alike.
#[derive(Clone)]
pub struct RentalRepository {
    store: Arc<RentalStore>,
    clock: Arc<dyn Clock>,
    policy: RentalPolicy,
}

impl RentalRepository {
    /// Creates a repository with the default rental policy.
    pub fn new(store: Arc<RentalStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            policy: RentalPolicy::default(),
        }
    }

    /// Overrides the rental policy.
    pub fn with_policy(mut self, policy: RentalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the rental with the given id, status freshly derived.
    pub fn get(&self, id: RentalId) -> Result<Rental, DomainError> {
        let today = self.clock.today();
        let mut inner = self.lock();
        inner.refresh_statuses(today);
        inner
            .rentals
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(DomainError::RentalNotFound(id))
    }

    /// Returns every rental in insertion order, statuses freshly derived.
    pub fn get_all(&self) -> Vec<Rental> {
        let today = self.clock.today();
        let mut inner = self.lock();
        inner.refresh_statuses(today);
        inner.rentals.clone()
    }

    /// Returns the customer's open rentals (Active or Overdue).
    pub fn get_active_by_customer(
        &self,
        customer_id: crate::domain::foundation::CustomerId,
    ) -> Vec<Rental> {
        let today = self.clock.today();
        let mut inner = self.lock();
        inner.refresh_statuses(today);
        inner
            .rentals
            .iter()
            .filter(|r| r.customer_id == customer_id && r.status.is_open())
            .cloned()
            .collect()
    }

    /// Returns every rental of the given movie, past and present.
    pub fn get_by_movie(&self, movie_id: MovieId) -> Vec<Rental> {
        let today = self.clock.today();
        let mut inner = self.lock();
        inner.refresh_statuses(today);
        inner
            .rentals
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect()
    }

    /// Returns every rental currently Overdue.
    pub fn get_overdue(&self) -> Vec<Rental> {
        let today = self.clock.today();
        let mut inner = self.lock();
        inner.refresh_statuses(today);
        inner
            .rentals
            .iter()
            .filter(|r| r.status == RentalStatus::Overdue)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over customer and movie names,
    /// optionally narrowed to a status.
    pub fn search(&self, query: &str, status: Option<RentalStatus>) -> Vec<Rental> {
        let needle = query.trim().to_lowercase();
        let today = self.clock.today();
        let mut inner = self.lock();
        inner.refresh_statuses(today);
        inner
            .rentals
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.customer_name.to_lowercase().contains(&needle)
                    || r.movie_name.to_lowercase().contains(&needle)
            })
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect()
    }

    /// O(1) check whether the movie is held by an open rental.
    pub fn is_movie_rented_out(&self, movie_id: MovieId) -> bool {
        self.lock().rented.contains(&movie_id)
    }

    /// Atomically checks availability and creates the rental.
    ///
    /// The availability check and the insert happen in one critical section;
    /// of N concurrent checkouts for the same movie exactly one succeeds and
    /// the rest fail with a conflict. Optional fields default from the
    /// rental policy: rental date = today, due date = rental date plus the
    /// loan period, daily rate = the policy rate.
    pub fn checkout(&self, draft: NewRental) -> Result<Rental, DomainError> {
        if draft.customer_name.trim().is_empty() {
            return Err(DomainError::MissingArgument("customerName"));
        }
        if draft.movie_name.trim().is_empty() {
            return Err(DomainError::MissingArgument("movieName"));
        }

        let today = self.clock.today();
        let rental_date = draft.rental_date.unwrap_or(today);
        let mut rental = Rental {
            id: RentalId::new(0),
            customer_id: draft.customer_id,
            customer_name: draft.customer_name,
            movie_id: draft.movie_id,
            movie_name: draft.movie_name,
            rental_date,
            due_date: draft
                .due_date
                .unwrap_or(rental_date + chrono::Duration::days(self.policy.loan_period_days)),
            return_date: None,
            daily_rate: draft.daily_rate.unwrap_or(self.policy.default_daily_rate),
            late_fee: 0.0,
            status: RentalStatus::Active,
        };
        // Validation happens entirely before the lock is taken.
        rental.validate()?;

        let mut inner = self.lock();
        if inner.rented.contains(&rental.movie_id) {
            tracing::warn!(
                movie_id = rental.movie_id.value(),
                customer_id = rental.customer_id.value(),
                "checkout rejected, movie already rented"
            );
            return Err(DomainError::MovieAlreadyRented(rental.movie_id));
        }
        rental.id = RentalId::new(inner.ids.next_value());
        inner.rented.insert(rental.movie_id);
        inner.rentals.push(rental.clone());
        tracing::debug!(
            rental_id = rental.id.value(),
            movie_id = rental.movie_id.value(),
            "movie checked out"
        );
        Ok(rental)
    }

    /// Marks the rental returned, assesses the late fee, and frees the
    /// movie.
    ///
    /// Returning an already-returned rental is a conflict, not a silent
    /// no-op.
    pub fn return_rental(&self, id: RentalId) -> Result<Rental, DomainError> {
        let today = self.clock.today();
        let mut inner = self.lock();

        let late_fee_per_day = self.policy.late_fee_per_day;
        let rental = inner
            .rentals
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::RentalNotFound(id))?;

        if rental.status == RentalStatus::Returned {
            return Err(DomainError::RentalAlreadyReturned(id));
        }

        rental.return_date = Some(today);
        rental.status = RentalStatus::Returned;
        let days_late = (today - rental.due_date).num_days().max(0);
        rental.late_fee = money::round_cents(days_late as f64 * late_fee_per_day);

        let returned = rental.clone();
        inner.rented.remove(&returned.movie_id);
        tracing::debug!(
            rental_id = id.value(),
            movie_id = returned.movie_id.value(),
            late_fee = returned.late_fee,
            "rental returned"
        );
        Ok(returned)
    }

    /// General-purpose insert with a caller-built rental record.
    ///
    /// Enforces the same one-open-rental-per-movie invariant as `checkout`;
    /// the id is assigned by the store regardless of what the caller set.
    pub fn add(&self, rental: Rental) -> Result<Rental, DomainError> {
        if rental.customer_name.trim().is_empty() {
            return Err(DomainError::MissingArgument("customerName"));
        }
        rental.validate()?;

        let mut inner = self.lock();
        let mut rental = rental;
        if rental.status.is_open() && inner.rented.contains(&rental.movie_id) {
            return Err(DomainError::MovieAlreadyRented(rental.movie_id));
        }
        rental.id = RentalId::new(inner.ids.next_value());
        if rental.status.is_open() {
            inner.rented.insert(rental.movie_id);
        }
        inner.rentals.push(rental.clone());
        Ok(rental)
    }

    /// Replaces the stored rental with the same id, migrating the
    /// rented-set association.
    ///
    /// The old movie association is dropped before the new state is applied
    /// and re-added only if the rental is still open. Moving an open rental
    /// onto a movie held by a different open rental is a conflict and
    /// leaves the store unchanged.
    pub fn update(&self, rental: Rental) -> Result<Rental, DomainError> {
        if rental.customer_name.trim().is_empty() {
            return Err(DomainError::MissingArgument("customerName"));
        }
        rental.validate()?;

        let mut inner = self.lock();
        let position = inner
            .rentals
            .iter()
            .position(|r| r.id == rental.id)
            .ok_or(DomainError::RentalNotFound(rental.id))?;

        let old_movie = inner.rentals[position].movie_id;
        let old_open = inner.rentals[position].status.is_open();

        if old_open {
            inner.rented.remove(&old_movie);
        }
        if rental.status.is_open() && inner.rented.contains(&rental.movie_id) {
            // Another open rental holds the target movie; roll back.
            if old_open {
                inner.rented.insert(old_movie);
            }
            return Err(DomainError::MovieAlreadyRented(rental.movie_id));
        }
        if rental.status.is_open() {
            inner.rented.insert(rental.movie_id);
        }
        inner.rentals[position] = rental.clone();
        Ok(rental)
    }

    /// Removes the rental, freeing its movie if it was open.
    pub fn remove(&self, id: RentalId) -> Result<(), DomainError> {
        let mut inner = self.lock();
        let position = inner
            .rentals
            .iter()
            .position(|r| r.id == id)
            .ok_or(DomainError::RentalNotFound(id))?;

        let removed = inner.rentals.remove(position);
        if removed.status.is_open() {
            inner.rented.remove(&removed.movie_id);
        }
        Ok(())
    }

    /// Computes fleet statistics in one pass, after refreshing statuses.
    pub fn stats(&self) -> RentalStats {
        let today = self.clock.today();
        let mut inner = self.lock();
        inner.refresh_statuses(today);

        let mut stats = RentalStats {
            total_rentals: inner.rentals.len(),
            active_rentals: 0,
            overdue_rentals: 0,
            returned_rentals: 0,
            total_revenue: 0.0,
            total_late_fees: 0.0,
        };
        for rental in &inner.rentals {
            match rental.status {
                RentalStatus::Active => stats.active_rentals += 1,
                RentalStatus::Overdue => stats.overdue_rentals += 1,
                RentalStatus::Returned => stats.returned_rentals += 1,
            }
            stats.total_revenue += rental.total_cost(today);
            stats.total_late_fees += rental.late_fee;
        }
        stats.total_revenue = money::round_cents(stats.total_revenue);
        stats.total_late_fees = money::round_cents(stats.total_late_fees);
        stats
    }

    fn lock(&self) -> MutexGuard<'_, RentalStoreInner> {
        self.store.inner.lock().expect("rental store lock poisoned")
    }
}
