//! Handlers for `/announcements` endpoints.
//!
//! Same access shape as `/events`, without participants. The publishing
//! organisation is always the caller.

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  routing::{get, post, put},
};
use meydan_core::{
  access::{Permission, Scope},
  announcement::{Announcement, AnnouncementPatch, NewAnnouncement},
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
    .route("/my", get(mine::<S>))
    .route("/my/{id}", put(update_own::<S>).delete(delete_own::<S>))
    .route(
      "/{id}",
      get(get_one::<S>).put(update_any::<S>).delete(delete_any::<S>),
    )
    .route("/{id}/approve", put(approve::<S>))
}

fn not_found(id: Uuid) -> ApiError {
  ApiError::NotFound(format!("announcement {id} not found"))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:    String,
  pub content:  String,
  pub image_id: Uuid,
}

/// `POST /announcements`
pub async fn create<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
  claims.require(Permission::Publish)?;
  required("title", &body.title)?;
  required("content", &body.content)?;

  let announcement = state
    .store
    .create_announcement(NewAnnouncement {
      title:           body.title,
      content:         body.content,
      image_id:        body.image_id,
      organization_id: claims.subject_id,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    announcement_id = %announcement.announcement_id,
    organization = %claims.subject_id,
    "announcement created"
  );
  Ok((StatusCode::CREATED, Json(announcement)))
}

/// `GET /announcements`
pub async fn list<S: Store>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
  let all = state
    .store
    .list_announcements(None)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(all))
}

/// `GET /announcements/my`
pub async fn mine<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
) -> Result<Json<Vec<Announcement>>, ApiError> {
  let own = state
    .store
    .list_announcements(Some(claims.subject_id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(own))
}

/// `GET /announcements/{id}`
pub async fn get_one<S: Store>(
  State(state): State<AppState<S>>,
  Param(id): Param<Uuid>,
) -> Result<Json<Announcement>, ApiError> {
  let announcement = state
    .store
    .get_announcement(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(announcement))
}

async fn update_scoped<S: Store>(
  state: &AppState<S>,
  id: Uuid,
  scope: Scope,
  patch: AnnouncementPatch,
) -> Result<Json<Announcement>, ApiError> {
  let announcement = state
    .store
    .update_announcement(id, scope, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(announcement_id = %id, "announcement updated");
  Ok(Json(announcement))
}

async fn delete_scoped<S: Store>(
  state: &AppState<S>,
  id: Uuid,
  scope: Scope,
) -> Result<Json<Message>, ApiError> {
  if !state
    .store
    .delete_announcement(id, scope)
    .await
    .map_err(ApiError::store)?
  {
    return Err(not_found(id));
  }
  tracing::info!(announcement_id = %id, "announcement deleted");
  Ok(message("announcement deleted"))
}

/// `PUT /announcements/my/{id}`
pub async fn update_own<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
  JsonBody(patch): JsonBody<AnnouncementPatch>,
) -> Result<Json<Announcement>, ApiError> {
  update_scoped(&state, id, claims.own_scope(), patch).await
}

/// `DELETE /announcements/my/{id}`
pub async fn delete_own<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Message>, ApiError> {
  delete_scoped(&state, id, claims.own_scope()).await
}

/// `PUT /announcements/{id}`
pub async fn update_any<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
  JsonBody(patch): JsonBody<AnnouncementPatch>,
) -> Result<Json<Announcement>, ApiError> {
  update_scoped(&state, id, claims.override_scope()?, patch).await
}

/// `DELETE /announcements/{id}`
pub async fn delete_any<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Message>, ApiError> {
  delete_scoped(&state, id, claims.override_scope()?).await
}

/// `PUT /announcements/{id}/approve`
pub async fn approve<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Announcement>, ApiError> {
  let announcement = state
    .store
    .approve_announcement(id, claims.override_scope()?)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(announcement_id = %id, approver = %claims.subject_id, "announcement approved");
  Ok(Json(announcement))
}
