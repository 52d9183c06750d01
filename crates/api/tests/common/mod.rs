#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use reel_api::config::{LogFormat, ServerConfig, StorageBackend};
use reel_api::router::build_app_router;
use reel_api::state::AppState;
use reel_db::store::{MemoryMovieStore, MovieStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_backend: StorageBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        log_format: LogFormat::Text,
    }
}

/// A fresh in-memory store, shared between the apps built for one test.
pub fn test_store() -> Arc<dyn MovieStore> {
    Arc::new(MemoryMovieStore::new())
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<dyn MovieStore>) -> Router {
    let config = test_config();
    let state = AppState { store };
    build_app_router(state, &config)
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body.to_string()).await
}

/// Send a raw string body with a JSON content type (for malformed payloads).
pub async fn json_request(app: Router, method: Method, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid create body with overridable title, year and rating.
pub fn movie_body(title: &str, release_year: i32, rating: f64) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "director": "Villeneuve",
        "releaseYear": release_year,
        "genre": "Sci-Fi",
        "rating": rating,
    })
}

/// Create a movie through the API and return its id.
pub async fn create_movie(store: &Arc<dyn MovieStore>, body: serde_json::Value) -> String {
    let response = post_json(build_test_app(Arc::clone(store)), "/movies", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"]
        .as_str()
        .expect("id should be a string")
        .to_string()
}
