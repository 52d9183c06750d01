//! Request extractors that report rejections as [`AppError`].
//!
//! Axum's stock `Json` and `Query` extractors answer malformed input with a
//! plain-text body (and `422` for JSON data errors). These wrappers route the
//! rejection through `AppError` so clients always get `400` with a
//! `{ "message": ... }` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body; a missing field, wrong type, unknown field or syntax
/// error becomes `AppError::BadRequest`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string; deserialization failures become `AppError::BadRequest`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
