//! In-memory entity stores and their repositories.
//!
//! Each entity has a store (one mutex, one id counter, any auxiliary
//! indexes) and a repository that exposes thread-safe operations over an
//! `Arc` of it. Stores are constructed once at startup and shared; no
//! operation ever holds more than one store's lock, and every value handed
//! to a caller is an owned clone.

mod customer;
mod movie;
mod rental;
mod watchlist;

pub use customer::{CustomerRepository, CustomerStore};
pub use movie::{MovieRepository, MovieStore};
pub use rental::{RentalRepository, RentalStore};
pub use watchlist::{WatchlistRepository, WatchlistStore, WatchlistedMovie};
