/// Failures surfaced by a [`crate::store::MovieStore`].
///
/// "Not found" is not an error here: lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The id is not in the store's identifier format.
    #[error("Malformed movie id '{0}'")]
    MalformedId(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
