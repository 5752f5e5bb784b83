//! Domain layer containing business entities and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, ids, enums, errors)
//! - `movie` - Catalog entity and stats
//! - `customer` - Customer entity and stats
//! - `rental` - Rental entity, lifecycle math, and stats
//! - `watchlist` - Watchlist entity

pub mod customer;
pub mod foundation;
pub mod movie;
pub mod rental;
pub mod watchlist;

pub use customer::{Customer, CustomerStats};
pub use movie::{Movie, MovieStats};
pub use rental::{NewRental, Rental, RentalStats};
pub use watchlist::{NewWatchlistItem, WatchlistItem};
