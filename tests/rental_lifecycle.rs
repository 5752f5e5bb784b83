//! Integration tests for the full rental lifecycle.
//!
//! These tests walk a rental through the states a real store would see:
//! 1. A movie is cataloged and checked out to one customer
//! 2. A concurrent second checkout of the same copy is rejected
//! 3. Past its due date the rental reads as overdue everywhere
//! 4. Returning it assesses the late fee and frees the movie
//! 5. Returning it again is rejected
//!
//! A property test at the end checks that the status counts in the stats
//! always partition the total, whatever sequence of checkouts and returns
//! produced them.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;

use rental_desk::domain::foundation::{
    ErrorKind, FixedClock, Genre, MembershipTier, RentalStatus,
};
use rental_desk::domain::{Customer, Movie, NewRental};
use rental_desk::store::{
    CustomerRepository, CustomerStore, MovieRepository, MovieStore, RentalRepository, RentalStore,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Store {
    movies: MovieRepository,
    customers: CustomerRepository,
    rentals: RentalRepository,
    clock: Arc<FixedClock>,
}

fn open_store(today: NaiveDate) -> Store {
    let clock = Arc::new(FixedClock::new(today));
    Store {
        movies: MovieRepository::new(Arc::new(MovieStore::new())),
        customers: CustomerRepository::new(Arc::new(CustomerStore::new())),
        rentals: RentalRepository::new(Arc::new(RentalStore::new()), clock.clone()),
        clock,
    }
}

#[test]
fn rental_runs_through_its_full_lifecycle() {
    let store = open_store(date(2026, 3, 1));

    let movie = store
        .movies
        .add(Movie::new("The Lives of Others").with_genre(Genre::Drama))
        .unwrap();
    let alice = store
        .customers
        .add(Customer::new("Alice").with_membership(MembershipTier::Silver))
        .unwrap();
    let bob = store.customers.add(Customer::new("Bob")).unwrap();

    // Checkout fills in date, due date, and rate from the policy.
    let rental = store
        .rentals
        .checkout(NewRental::new(alice.id, &alice.name, movie.id, &movie.name))
        .unwrap();
    assert_eq!(rental.rental_date, date(2026, 3, 1));
    assert_eq!(rental.due_date, date(2026, 3, 8));
    assert_eq!(rental.daily_rate, 3.99);
    assert_eq!(rental.status, RentalStatus::Active);
    assert!(store.rentals.is_movie_rented_out(movie.id));

    // The copy is out, so a second checkout loses.
    let err = store
        .rentals
        .checkout(NewRental::new(bob.id, &bob.name, movie.id, &movie.name))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Ten days in, the rental is three days past due on every read path.
    store.clock.set_today(date(2026, 3, 11));
    assert_eq!(
        store.rentals.get(rental.id).unwrap().status,
        RentalStatus::Overdue
    );
    assert!(store
        .rentals
        .get_overdue()
        .iter()
        .any(|r| r.id == rental.id));
    assert_eq!(store.rentals.stats().overdue_rentals, 1);

    // Return assesses the late fee and frees the copy.
    let returned = store.rentals.return_rental(rental.id).unwrap();
    assert_eq!(returned.status, RentalStatus::Returned);
    assert_eq!(returned.return_date, Some(date(2026, 3, 11)));
    assert_eq!(returned.late_fee, 4.50);
    assert!(!store.rentals.is_movie_rented_out(movie.id));

    // And the movie can go straight back out to the customer who waited.
    store
        .rentals
        .checkout(NewRental::new(bob.id, &bob.name, movie.id, &movie.name))
        .unwrap();

    // A second return of the first rental is rejected.
    let err = store.rentals.return_rental(rental.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn concurrent_checkouts_of_one_copy_have_one_winner() {
    let store = open_store(date(2026, 3, 1));
    let movie = store.movies.add(Movie::new("Ran")).unwrap();
    let customers: Vec<_> = (0..8)
        .map(|i| {
            store
                .customers
                .add(Customer::new(format!("Customer {}", i)))
                .unwrap()
        })
        .collect();

    let handles: Vec<_> = customers
        .into_iter()
        .map(|customer| {
            let rentals = store.rentals.clone();
            let movie_id = movie.id;
            std::thread::spawn(move || {
                rentals.checkout(NewRental::new(
                    customer.id,
                    &customer.name,
                    movie_id,
                    "Ran",
                ))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.kind() == ErrorKind::Conflict));
    assert_eq!(store.rentals.stats().total_rentals, 1);
}

proptest! {
    /// Whatever mix of checkouts, elapsed time, and returns, the stats
    /// status counts always partition the total.
    #[test]
    fn status_counts_partition_the_total(
        loans in proptest::collection::vec((1u32..60, 0u32..90, proptest::bool::ANY), 0..25)
    ) {
        let today = date(2026, 3, 1);
        let store = open_store(today);
        let customer = store.customers.add(Customer::new("Prop")).unwrap();

        for (i, (start_offset, _, _)) in loans.iter().enumerate() {
            let movie = store
                .movies
                .add(Movie::new(format!("Movie {}", i)))
                .unwrap();
            let rental_date = today - chrono::Days::new(u64::from(*start_offset));
            store
                .rentals
                .checkout(
                    NewRental::new(customer.id, "Prop", movie.id, format!("Movie {}", i))
                        .with_rental_date(rental_date),
                )
                .unwrap();
        }

        let all = store.rentals.get_all();
        for (rental, (_, return_after, do_return)) in all.iter().zip(loans.iter()) {
            if *do_return {
                store
                    .clock
                    .set_today(rental.rental_date + chrono::Days::new(u64::from(*return_after)));
                store.rentals.return_rental(rental.id).unwrap();
            }
        }
        store.clock.set_today(today);

        let stats = store.rentals.stats();
        prop_assert_eq!(
            stats.total_rentals,
            stats.active_rentals + stats.overdue_rentals + stats.returned_rentals
        );
        prop_assert_eq!(stats.total_rentals, loans.len());
        prop_assert!(stats.total_late_fees >= 0.0);
    }
}
