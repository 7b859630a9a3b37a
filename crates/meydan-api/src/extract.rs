//! Request extractors whose rejections are reported as [`ApiError`], so a
//! malformed body or path id is a 400 with the usual message envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// `axum::Json` with an [`ApiError`] rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with an [`ApiError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Param<T>(pub T);

/// Reject a blank text field.
pub fn required(field: &'static str, value: &str) -> Result<(), ApiError> {
  if value.trim().is_empty() {
    return Err(meydan_core::Error::MissingField(field).into());
  }
  Ok(())
}
