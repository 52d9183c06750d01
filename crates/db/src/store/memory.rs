use std::cmp::Ordering;

use async_trait::async_trait;
use reel_core::movie_query::{MovieFilter, MovieQuery, SortDirection, SortField, SortSpec};
use reel_core::types::MovieId;
use tokio::sync::RwLock;

use super::{parse_movie_id, MovieStore};
use crate::error::StoreError;
use crate::models::movie::{CreateMovie, Movie, UpdateMovie};

/// In-process [`MovieStore`].
///
/// Records are kept in insertion order, which doubles as the default list
/// order. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryMovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }
}

fn matches(filter: &MovieFilter, movie: &Movie) -> bool {
    filter.matches(&movie.title, &movie.director, &movie.genre, movie.rating)
}

/// Case-insensitive text order, falling back to bytes so equal-folding
/// values still sort deterministically.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare(a: &Movie, b: &Movie, spec: SortSpec) -> Ordering {
    let ord = match spec.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => compare_text(&a.title, &b.title),
        SortField::Director => compare_text(&a.director, &b.director),
        SortField::ReleaseYear => a.release_year.cmp(&b.release_year),
        SortField::Genre => compare_text(&a.genre, &b.genre),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    match spec.direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn insert(&self, input: &CreateMovie) -> Result<Movie, StoreError> {
        let now = chrono::Utc::now();
        let movie = Movie {
            id: MovieId::now_v7(),
            title: input.title.clone(),
            director: input.director.clone(),
            release_year: input.release_year,
            genre: input.genre.clone(),
            rating: input.rating,
            created_at: now,
            updated_at: now,
        };
        self.movies.write().await.push(movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, StoreError> {
        let id = parse_movie_id(id)?;
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn find_many(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError> {
        let mut found: Vec<Movie> = self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| matches(&query.filter, m))
            .cloned()
            .collect();

        // Stable sort keeps insertion order among equal keys.
        if let Some(spec) = query.sort {
            found.sort_by(|a, b| compare(a, b, spec));
        }

        let skip = usize::try_from(query.pagination.skip()).unwrap_or(usize::MAX);
        let take = usize::try_from(query.pagination.take()).unwrap_or(usize::MAX);
        Ok(found.into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self, filter: &MovieFilter) -> Result<i64, StoreError> {
        let count = self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| matches(filter, m))
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn update(&self, id: &str, input: &UpdateMovie) -> Result<Option<Movie>, StoreError> {
        let id = parse_movie_id(id)?;
        let mut movies = self.movies.write().await;
        let Some(movie) = movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        input.apply_to(movie);
        movie.updated_at = chrono::Utc::now();
        Ok(Some(movie.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let id = parse_movie_id(id)?;
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != id);
        Ok(movies.len() < before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {
        let records = self.len().await;
        tracing::info!(records, "In-memory store closed");
    }
}
