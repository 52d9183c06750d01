//! Domain types, constants and the list query builder for the Reel service.
//!
//! This crate has no internal dependencies so it can be shared by the store
//! and the HTTP layer alike.

pub mod error;
pub mod movie;
pub mod movie_query;
pub mod types;
