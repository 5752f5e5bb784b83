//! Rental Desk - Video Rental Management Core
//!
//! This crate implements the domain model, thread-safe in-memory stores,
//! and analytics services for a video rental business: movie and customer
//! catalogs, atomic checkout and return of rentals, watchlists, and
//! reporting over the accumulated history.

pub mod domain;
pub mod services;
pub mod store;
