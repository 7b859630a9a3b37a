//! Handlers for `/forums` endpoints.
//!
//! | Method   | Path | Access |
//! |----------|------|--------|
//! | `POST`   | `/forums` | authenticated |
//! | `GET`    | `/forums` | public; newest first |
//! | `GET`    | `/forums/{id}` | public |
//! | `PUT`    | `/forums/{id}` | author |
//! | `DELETE` | `/forums/{id}` | author |
//! | `DELETE` | `/forums/{id}/moderate` | moderator |
//! | `POST`   | `/forums/{id}/comments` | authenticated |
//! | `POST`   | `/forums/{id}/likes` | authenticated; toggles |
//! | `POST`   | `/forums/{id}/dislikes` | authenticated; toggles (also `/disslikes`) |

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  routing::{delete, get, post},
};
use meydan_core::{
  access::Permission,
  forum::{ForumPost, ForumPostPatch, NewForumPost, Reaction},
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
    .route(
      "/{id}",
      get(get_one::<S>).put(update::<S>).delete(delete_own::<S>),
    )
    .route("/{id}/moderate", delete(moderate::<S>))
    .route("/{id}/comments", post(comment::<S>))
    .route("/{id}/likes", post(like::<S>))
    .route("/{id}/dislikes", post(dislike::<S>))
    // Spelling used by older clients.
    .route("/{id}/disslikes", post(dislike::<S>))
}

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("post {id} not found")) }

// ─── Posts ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:   String,
  pub content: String,
  #[serde(default)]
  pub tags:    Vec<String>,
}

/// `POST /forums`
pub async fn create<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<(StatusCode, Json<ForumPost>), ApiError> {
  claims.require(Permission::Publish)?;
  required("title", &body.title)?;
  required("content", &body.content)?;

  let post = state
    .store
    .create_post(NewForumPost {
      title:     body.title,
      content:   body.content,
      author_id: claims.subject_id,
      tags:      body.tags,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(post_id = %post.post_id, author = %claims.subject_id, "forum post created");
  Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /forums`
pub async fn list<S: Store>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<ForumPost>>, ApiError> {
  Ok(Json(state.store.list_posts().await.map_err(ApiError::store)?))
}

/// `GET /forums/{id}`
pub async fn get_one<S: Store>(
  State(state): State<AppState<S>>,
  Param(id): Param<Uuid>,
) -> Result<Json<ForumPost>, ApiError> {
  let post = state
    .store
    .get_post(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(post))
}

/// `PUT /forums/{id}`
pub async fn update<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
  JsonBody(patch): JsonBody<ForumPostPatch>,
) -> Result<Json<ForumPost>, ApiError> {
  let post = state
    .store
    .update_post(id, claims.own_scope(), patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(post_id = %id, "forum post updated");
  Ok(Json(post))
}

/// `DELETE /forums/{id}`
pub async fn delete_own<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Message>, ApiError> {
  if !state
    .store
    .delete_post(id, claims.own_scope())
    .await
    .map_err(ApiError::store)?
  {
    return Err(not_found(id));
  }
  tracing::info!(post_id = %id, "forum post deleted");
  Ok(message("post deleted"))
}

/// `DELETE /forums/{id}/moderate`
pub async fn moderate<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Message>, ApiError> {
  let scope = claims.override_scope()?;
  if !state.store.delete_post(id, scope).await.map_err(ApiError::store)? {
    return Err(not_found(id));
  }
  tracing::info!(post_id = %id, moderator = %claims.subject_id, "forum post removed by moderator");
  Ok(message("post deleted"))
}

// ─── Comments and reactions ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommentBody {
  pub content: String,
}

/// `POST /forums/{id}/comments`
pub async fn comment<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
  JsonBody(body): JsonBody<CommentBody>,
) -> Result<(StatusCode, Json<ForumPost>), ApiError> {
  required("content", &body.content)?;
  let post = state
    .store
    .add_comment(id, claims.subject_id, body.content)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok((StatusCode::CREATED, Json(post)))
}

async fn react<S: Store>(
  state: &AppState<S>,
  id: Uuid,
  user: Uuid,
  reaction: Reaction,
) -> Result<Json<ForumPost>, ApiError> {
  let post = state
    .store
    .toggle_reaction(id, user, reaction)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(post))
}

/// `POST /forums/{id}/likes`
pub async fn like<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<ForumPost>, ApiError> {
  react(&state, id, claims.subject_id, Reaction::Like).await
}

/// `POST /forums/{id}/dislikes`
pub async fn dislike<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<ForumPost>, ApiError> {
  react(&state, id, claims.subject_id, Reaction::Dislike).await
}
