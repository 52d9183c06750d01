//! Movie entity model and DTOs.

use reel_core::movie::{check_not_blank, check_rating};
use reel_core::types::{MovieId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A movie row from the `movies` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub director: String,
    pub release_year: i32,
    pub genre: String,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a movie. Every field is required; unknown fields are
/// rejected during deserialization.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateMovie {
    #[validate(custom(function = "check_not_blank"))]
    pub title: String,
    #[validate(custom(function = "check_not_blank"))]
    pub director: String,
    pub release_year: i32,
    #[validate(custom(function = "check_not_blank"))]
    pub genre: String,
    #[validate(custom(function = "check_rating"))]
    pub rating: f64,
}

/// DTO for partially updating a movie. Only `Some` fields are written.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateMovie {
    #[validate(custom(function = "check_not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "check_not_blank"))]
    pub director: Option<String>,
    pub release_year: Option<i32>,
    #[validate(custom(function = "check_not_blank"))]
    pub genre: Option<String>,
    #[validate(custom(function = "check_rating"))]
    pub rating: Option<f64>,
}

impl UpdateMovie {
    /// Overwrite the supplied fields on `movie`, leaving the rest untouched.
    ///
    /// The caller is responsible for refreshing `updated_at`.
    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title.clone_from(title);
        }
        if let Some(director) = &self.director {
            movie.director.clone_from(director);
        }
        if let Some(release_year) = self.release_year {
            movie.release_year = release_year;
        }
        if let Some(genre) = &self.genre {
            movie.genre.clone_from(genre);
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
    }
}
