//! Response bodies shared by the movie handlers.

use reel_db::models::movie::Movie;
use serde::Serialize;

/// `{ "message": ... }` body, used for confirmations and every error.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One page of `GET /movies` results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total_pages: i64,
    pub current_page: i64,
}
