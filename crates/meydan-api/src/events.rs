//! Handlers for `/events` endpoints.
//!
//! | Method   | Path | Access |
//! |----------|------|--------|
//! | `POST`   | `/events` | authenticated |
//! | `GET`    | `/events` | public |
//! | `GET`    | `/events/my` | authenticated; caller's events |
//! | `PUT`    | `/events/my/{id}` | owner |
//! | `DELETE` | `/events/my/{id}` | owner |
//! | `GET`    | `/events/{id}` | public; 404 if not found |
//! | `PUT`    | `/events/{id}` | moderator |
//! | `DELETE` | `/events/{id}` | moderator |
//! | `PUT`    | `/events/{id}/approve` | moderator |
//! | `POST`   | `/events/{id}/participants` | authenticated; 400 if already joined |

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use meydan_core::{
  access::{Permission, Scope},
  event::{Event, EventPatch, NewEvent, Participation},
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
    .route("/{id}/participants", post(join::<S>))
}

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("event {id} not found")) }

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:       String,
  pub description: String,
  pub date:        DateTime<Utc>,
  pub location:    String,
  pub badge_id:    Option<Uuid>,
  pub qr_code:     Option<String>,
  pub url:         Option<String>,
  pub image_id:    Option<Uuid>,
}

/// `POST /events`
pub async fn create<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
  claims.require(Permission::Publish)?;
  required("title", &body.title)?;

  let event = state
    .store
    .create_event(NewEvent {
      title:        body.title,
      description:  body.description,
      organizer_id: claims.subject_id,
      date:         body.date,
      location:     body.location,
      badge_id:     body.badge_id,
      qr_code:      body.qr_code,
      url:          body.url,
      image_id:     body.image_id,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(event_id = %event.event_id, organizer = %claims.subject_id, "event created");
  Ok((StatusCode::CREATED, Json(event)))
}

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /events`
pub async fn list<S: Store>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Event>>, ApiError> {
  let events = state.store.list_events(None).await.map_err(ApiError::store)?;
  Ok(Json(events))
}

/// `GET /events/my`
pub async fn mine<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
) -> Result<Json<Vec<Event>>, ApiError> {
  let events = state
    .store
    .list_events(Some(claims.subject_id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(events))
}

/// `GET /events/{id}`
pub async fn get_one<S: Store>(
  State(state): State<AppState<S>>,
  Param(id): Param<Uuid>,
) -> Result<Json<Event>, ApiError> {
  let event = state
    .store
    .get_event(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(event))
}

// ─── Update / delete ──────────────────────────────────────────────────────────

async fn update_scoped<S: Store>(
  state: &AppState<S>,
  id: Uuid,
  scope: Scope,
  patch: EventPatch,
) -> Result<Json<Event>, ApiError> {
  let event = state
    .store
    .update_event(id, scope, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(event_id = %id, "event updated");
  Ok(Json(event))
}

async fn delete_scoped<S: Store>(
  state: &AppState<S>,
  id: Uuid,
  scope: Scope,
) -> Result<Json<Message>, ApiError> {
  if !state.store.delete_event(id, scope).await.map_err(ApiError::store)? {
    return Err(not_found(id));
  }
  tracing::info!(event_id = %id, "event deleted");
  Ok(message("event deleted"))
}

/// `PUT /events/my/{id}`
pub async fn update_own<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
  JsonBody(patch): JsonBody<EventPatch>,
) -> Result<Json<Event>, ApiError> {
  update_scoped(&state, id, claims.own_scope(), patch).await
}

/// `DELETE /events/my/{id}`
pub async fn delete_own<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Message>, ApiError> {
  delete_scoped(&state, id, claims.own_scope()).await
}

/// `PUT /events/{id}`
pub async fn update_any<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
  JsonBody(patch): JsonBody<EventPatch>,
) -> Result<Json<Event>, ApiError> {
  update_scoped(&state, id, claims.override_scope()?, patch).await
}

/// `DELETE /events/{id}`
pub async fn delete_any<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Message>, ApiError> {
  delete_scoped(&state, id, claims.override_scope()?).await
}

/// `PUT /events/{id}/approve`
pub async fn approve<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Event>, ApiError> {
  let event = state
    .store
    .approve_event(id, claims.override_scope()?)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(event_id = %id, approver = %claims.subject_id, "event approved");
  Ok(Json(event))
}

// ─── Participants ─────────────────────────────────────────────────────────────

/// `POST /events/{id}/participants`
pub async fn join<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Event>, ApiError> {
  match state
    .store
    .add_participant(id, claims.subject_id)
    .await
    .map_err(ApiError::store)?
  {
    Some(Participation::Joined(event)) => Ok(Json(event)),
    Some(Participation::AlreadyJoined) => {
      Err(ApiError::Invalid("already participating in this event".into()))
    }
    None => Err(not_found(id)),
  }
}
