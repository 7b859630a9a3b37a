//! JSON REST API for Meydan.
//!
//! Exposes an axum [`Router`] backed by any [`meydan_core::store::Store`].
//! TLS, CORS and request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = meydan_api::api_router(state).layer(TraceLayer::new_for_http());
//! ```
//!
//! # Access
//!
//! Public reads need no credential. Every write goes through the
//! [`auth::Authenticated`] extractor and then either the role gate
//! ([`meydan_core::access::Claims::require`]) or an owner-scoped store call
//! ([`meydan_core::access::Claims::own_scope`]).

pub mod announcements;
pub mod auth;
pub mod badges;
pub mod complaints;
pub mod error;
pub mod events;
pub mod extract;
pub mod files;
pub mod forums;
pub mod response;
pub mod translations;
pub mod uploads;
pub mod users;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use meydan_core::store::Store;

pub use error::ApiError;

use auth::TokenKeys;
use response::Message;
use uploads::UploadDir;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:   Arc<S>,
  pub tokens:  Arc<TokenKeys>,
  pub uploads: Arc<UploadDir>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      tokens:  Arc::clone(&self.tokens),
      uploads: Arc::clone(&self.uploads),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: Store + 'static,
{
  Router::new()
    .route("/", get(health))
    .nest("/users", users::routes())
    .nest("/events", events::routes())
    .nest("/announcements", announcements::routes())
    .nest("/badges", badges::routes())
    .nest("/forums", forums::routes())
    .nest("/fileupload", files::routes(state.uploads.max_bytes()))
    .nest("/complaints", complaints::routes())
    .nest("/translations", translations::routes())
    .with_state(state)
}

/// `GET /`
async fn health() -> Json<Message> { response::message("Meydan API is running") }

#[cfg(test)]
mod tests;
