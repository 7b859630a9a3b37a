//! Handlers for `/badges` endpoints. Reads are public; writes need
//! [`Permission::ManageBadges`].

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  routing::{get, post},
};
use meydan_core::{
  access::Permission,
  badge::{Badge, BadgePatch, NewBadge},
  store::Store,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  auth::Authenticated,
  error::ApiError,
  extract::{JsonBody, Param, required},
  response::{Message, message},
};

pub fn routes<S>() -> Router<AppState<S>>
where
  S: Store + 'static,
{
  Router::new()
    .route("/", post(create::<S>).get(list::<S>))
    .route("/{id}", get(get_one::<S>).put(update::<S>).delete(delete::<S>))
}

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("badge {id} not found")) }

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:        String,
  pub description: String,
  pub icon_id:     Option<Uuid>,
  #[serde(default)]
  pub point:       i64,
}

/// `POST /badges`
pub async fn create<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<(StatusCode, Json<Badge>), ApiError> {
  claims.require(Permission::ManageBadges)?;
  required("name", &body.name)?;

  let badge = state
    .store
    .create_badge(NewBadge {
      name:        body.name,
      description: body.description,
      icon_id:     body.icon_id,
      point:       body.point,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(badge_id = %badge.badge_id, "badge created");
  Ok((StatusCode::CREATED, Json(badge)))
}

/// `GET /badges`
pub async fn list<S: Store>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Badge>>, ApiError> {
  Ok(Json(state.store.list_badges().await.map_err(ApiError::store)?))
}

/// `GET /badges/{id}`
pub async fn get_one<S: Store>(
  State(state): State<AppState<S>>,
  Param(id): Param<Uuid>,
) -> Result<Json<Badge>, ApiError> {
  let badge = state
    .store
    .get_badge(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(badge))
}

/// `PUT /badges/{id}`
pub async fn update<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
  JsonBody(patch): JsonBody<BadgePatch>,
) -> Result<Json<Badge>, ApiError> {
  claims.require(Permission::ManageBadges)?;
  let badge = state
    .store
    .update_badge(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(badge_id = %id, "badge updated");
  Ok(Json(badge))
}

/// `DELETE /badges/{id}`
pub async fn delete<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Message>, ApiError> {
  claims.require(Permission::ManageBadges)?;
  if !state.store.delete_badge(id).await.map_err(ApiError::store)? {
    return Err(not_found(id));
  }
  tracing::info!(badge_id = %id, "badge deleted");
  Ok(message("badge deleted"))
}
