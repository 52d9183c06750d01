use std::sync::Arc;

use reel_db::store::MovieStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The movie record store, opened once at startup.
    pub store: Arc<dyn MovieStore>,
}
