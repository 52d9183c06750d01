use async_trait::async_trait;
use reel_core::movie_query::{MovieFilter, MovieQuery};

use super::{parse_movie_id, MovieStore};
use crate::error::StoreError;
use crate::models::movie::{CreateMovie, Movie, UpdateMovie};
use crate::repositories::MovieRepo;
use crate::DbPool;

/// [`MovieStore`] backed by PostgreSQL through [`MovieRepo`].
#[derive(Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn insert(&self, input: &CreateMovie) -> Result<Movie, StoreError> {
        Ok(MovieRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, StoreError> {
        let id = parse_movie_id(id)?;
        Ok(MovieRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_many(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError> {
        Ok(MovieRepo::list(&self.pool, query).await?)
    }

    async fn count(&self, filter: &MovieFilter) -> Result<i64, StoreError> {
        Ok(MovieRepo::count(&self.pool, filter).await?)
    }

    async fn update(&self, id: &str, input: &UpdateMovie) -> Result<Option<Movie>, StoreError> {
        let id = parse_movie_id(id)?;
        Ok(MovieRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let id = parse_movie_id(id)?;
        Ok(MovieRepo::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
