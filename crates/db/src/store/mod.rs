//! The record store seam.
//!
//! Handlers talk to an `Arc<dyn MovieStore>` injected through application
//! state, so the backing database is chosen once at startup.

mod memory;
mod postgres;

use async_trait::async_trait;
use reel_core::movie_query::{MovieFilter, MovieQuery};
use reel_core::types::MovieId;

use crate::error::StoreError;
use crate::models::movie::{CreateMovie, Movie, UpdateMovie};

pub use memory::MemoryMovieStore;
pub use postgres::PgMovieStore;

/// Persistent collection of movie records.
///
/// Ids are accepted as raw strings; a value that is not a valid id is a
/// [`StoreError::MalformedId`], distinct from a well-formed id that matches
/// nothing (`None` / `false`).
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Insert a record and assign its id.
    async fn insert(&self, input: &CreateMovie) -> Result<Movie, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, StoreError>;

    /// One page of records matching the query's filter, in its sort order.
    async fn find_many(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError>;

    /// Number of records matching the filter, ignoring pagination.
    async fn count(&self, filter: &MovieFilter) -> Result<i64, StoreError>;

    /// Overwrite the supplied fields. `None` if the id matches nothing.
    async fn update(&self, id: &str, input: &UpdateMovie) -> Result<Option<Movie>, StoreError>;

    /// Remove a record. `false` if the id matches nothing.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Release backing resources. Called once after the server stops.
    async fn close(&self);
}

/// Parse a path id into the store's identifier format.
pub fn parse_movie_id(raw: &str) -> Result<MovieId, StoreError> {
    MovieId::parse_str(raw).map_err(|_| StoreError::MalformedId(raw.to_string()))
}
