//! Success envelope for endpoints that have no resource to return.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Message {
  pub message: String,
}

pub fn message(text: impl Into<String>) -> Json<Message> {
  Json(Message { message: text.into() })
}
