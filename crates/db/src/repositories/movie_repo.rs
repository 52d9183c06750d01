//! Repository for the `movies` table.

use reel_core::movie_query::{escape_like, MovieFilter, MovieQuery};
use reel_core::types::MovieId;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{PgPool, Postgres};

use crate::models::movie::{CreateMovie, Movie, UpdateMovie};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, director, release_year, genre, rating, created_at, updated_at";

/// Creation order, also used to break ties under an explicit sort.
const DEFAULT_ORDER: &str = "created_at ASC, id ASC";

/// A `WHERE` clause with numbered placeholders and the values to bind.
struct WhereClause {
    sql: String,
    binds: Vec<FilterBind>,
}

enum FilterBind {
    Text(String),
    Float(f64),
}

/// Build the `WHERE` clause for a filter, numbering placeholders from
/// `first_idx`.
fn build_where(filter: &MovieFilter, first_idx: u32) -> WhereClause {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();
    let mut bind_idx = first_idx;

    if let Some(title) = &filter.title_contains {
        conditions.push(format!("title ILIKE ${bind_idx}"));
        binds.push(FilterBind::Text(format!("%{}%", escape_like(title))));
        bind_idx += 1;
    }
    if let Some(text) = &filter.text_contains {
        conditions.push(format!(
            "(title ILIKE ${bind_idx} OR director ILIKE ${bind_idx} OR genre ILIKE ${bind_idx})"
        ));
        binds.push(FilterBind::Text(format!("%{}%", escape_like(text))));
        bind_idx += 1;
    }
    if let Some(min_rating) = filter.min_rating {
        conditions.push(format!("rating >= ${bind_idx}"));
        binds.push(FilterBind::Float(min_rating));
    }

    let sql = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    WhereClause { sql, binds }
}

fn bind_filter_as<'q>(
    mut q: QueryAs<'q, Postgres, Movie, PgArguments>,
    binds: Vec<FilterBind>,
) -> QueryAs<'q, Postgres, Movie, PgArguments> {
    for bind in binds {
        q = match bind {
            FilterBind::Text(v) => q.bind(v),
            FilterBind::Float(v) => q.bind(v),
        };
    }
    q
}

fn bind_filter_scalar<'q>(
    mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    binds: Vec<FilterBind>,
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for bind in binds {
        q = match bind {
            FilterBind::Text(v) => q.bind(v),
            FilterBind::Float(v) => q.bind(v),
        };
    }
    q
}

/// `ORDER BY` body for a query. Sort columns come from a fixed enum, never
/// from request text.
fn order_by(query: &MovieQuery) -> String {
    match query.sort {
        Some(spec) => format!(
            "{} {}, {DEFAULT_ORDER}",
            spec.field.column(),
            spec.direction.as_sql()
        ),
        None => DEFAULT_ORDER.to_string(),
    }
}

/// Provides CRUD and listing operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie with a store-assigned id, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (id, title, director, release_year, genre, rating)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(MovieId::now_v7())
            .bind(&input.title)
            .bind(&input.director)
            .bind(input.release_year)
            .bind(&input.genre)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by id.
    pub async fn find_by_id(pool: &PgPool, id: MovieId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one page of movies matching the query's filter and sort.
    pub async fn list(pool: &PgPool, query: &MovieQuery) -> Result<Vec<Movie>, sqlx::Error> {
        let where_clause = build_where(&query.filter, 1);
        let bind_idx = where_clause.binds.len() as u32 + 1;

        let sql = format!(
            "SELECT {COLUMNS} FROM movies \
             {where_sql} \
             ORDER BY {order} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            where_sql = where_clause.sql,
            order = order_by(query),
            next_idx = bind_idx + 1,
        );

        let q = bind_filter_as(sqlx::query_as::<_, Movie>(&sql), where_clause.binds);
        q.bind(query.pagination.take())
            .bind(query.pagination.skip())
            .fetch_all(pool)
            .await
    }

    /// Count every movie matching the filter, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &MovieFilter) -> Result<i64, sqlx::Error> {
        let where_clause = build_where(filter, 1);
        let sql = format!("SELECT COUNT(*) FROM movies {}", where_clause.sql);

        bind_filter_scalar(sqlx::query_scalar::<_, i64>(&sql), where_clause.binds)
            .fetch_one(pool)
            .await
    }

    /// Update a movie. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: MovieId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                director = COALESCE($3, director),
                release_year = COALESCE($4, release_year),
                genre = COALESCE($5, genre),
                rating = COALESCE($6, rating),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.director.as_deref())
            .bind(input.release_year)
            .bind(input.genre.as_deref())
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: MovieId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
