//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the same shape as a success message:
//! `{"message": "..."}`. Store and internal failures are logged and reported
//! with a fixed message so no backend detail reaches the client.

use axum::{
  Json,
  extract::{
    multipart::{MultipartError, MultipartRejection},
    rejection::{JsonRejection, PathRejection},
  },
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("authentication required")]
  Unauthenticated,

  #[error("{0}")]
  Forbidden(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Invalid(String),

  #[error("{0}")]
  TooLarge(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  /// Box a backend error; used as `.map_err(ApiError::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<meydan_core::Error> for ApiError {
  fn from(e: meydan_core::Error) -> Self {
    match e {
      meydan_core::Error::Forbidden { .. } => Self::Forbidden(e.to_string()),
      _ => Self::Invalid(e.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::Invalid(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    Self::Invalid(rejection.body_text())
  }
}

impl From<MultipartRejection> for ApiError {
  fn from(rejection: MultipartRejection) -> Self {
    Self::from_body_status(rejection.status(), rejection.body_text())
  }
}

impl From<MultipartError> for ApiError {
  fn from(e: MultipartError) -> Self { Self::from_body_status(e.status(), e.body_text()) }
}

impl ApiError {
  /// Body read failures keep 413; everything else is a bad request.
  fn from_body_status(status: StatusCode, message: String) -> Self {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
      Self::TooLarge(message)
    } else {
      Self::Invalid(message)
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Invalid(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::TooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, m.clone()),
      ApiError::Store(_) | ApiError::Internal(_) => {
        tracing::error!(error = %self, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "internal server error".to_owned(),
        )
      }
    };

    let mut res = (status, Json(json!({ "message": message }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    res
  }
}
