//! Handlers for the `/movies` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reel_core::error::CoreError;
use reel_core::movie::{validation_error, DELETED_MESSAGE, ENTITY_NAME};
use reel_core::movie_query::{MovieListParams, MovieQuery};
use reel_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use reel_db::StoreError;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::response::{MessageResponse, MoviePage};
use crate::state::AppState;

fn not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_NAME,
        id,
    })
}

/// POST /movies
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    let movie = state.store.insert(&input).await?;

    tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie created");

    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /movies
///
/// Supports `title`, `q`, `rating`, `sortBy`, `page` and `limit`. The total
/// page count reflects every matching record, not just the returned page.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MovieListParams>,
) -> AppResult<Json<MoviePage>> {
    let query = MovieQuery::from_params(&params)?;

    if params.sort_by.is_some() && query.sort.is_none() {
        tracing::debug!(sort_by = ?params.sort_by, "Ignoring sort on unknown field");
    }

    let movies = state.store.find_many(&query).await?;
    let total = state.store.count(&query.filter).await?;

    Ok(Json(MoviePage {
        movies,
        total_pages: query.pagination.total_pages(total),
        current_page: query.pagination.page,
    }))
}

/// GET /movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    let movie = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(movie))
}

/// PUT /movies/{id}
///
/// Partial update: only the fields present in the body are overwritten. A
/// malformed id is a client error here, answered with 400.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateMovie>,
) -> AppResult<Json<Movie>> {
    input.validate().map_err(|e| validation_error(&e))?;

    let movie = state
        .store
        .update(&id, &input)
        .await
        .map_err(|e| match e {
            e @ StoreError::MalformedId(_) => AppError::BadRequest(e.to_string()),
            other => AppError::Store(other),
        })?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(movie_id = %movie.id, "Movie updated");

    Ok(Json(movie))
}

/// DELETE /movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state.store.delete(&id).await?;
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(movie_id = %id, "Movie deleted");

    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}
