//! Handlers for `/fileupload` endpoints.
//!
//! | Method   | Path | Access |
//! |----------|------|--------|
//! | `POST`   | `/fileupload` | authenticated; multipart field `file` |
//! | `GET`    | `/fileupload` | authenticated |
//! | `GET`    | `/fileupload/my` | authenticated; caller's uploads |
//! | `DELETE` | `/fileupload/{id}` | owner |
//! | `GET`    | `/fileupload/{id}/view` | authenticated; raw file bytes, inline only for images |

use std::{io, path::Path};

use axum::{
  Json, Router,
  extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
  http::{HeaderValue, StatusCode, header},
  response::IntoResponse,
  routing::{delete, get, post},
};
use meydan_core::{
  access::Permission,
  store::Store,
  upload::{FileUpload, NewUpload},
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Authenticated,
  error::ApiError,
  extract::Param,
  response::{Message, message},
};

/// Multipart field that carries the file.
pub const FILE_FIELD: &str = "file";

/// `max_bytes` replaces axum's default body limit for these routes; an
/// oversized upload is answered with 413.
pub fn routes<S>(max_bytes: usize) -> Router<AppState<S>>
where
  S: Store + 'static,
{
  Router::new()
    .route("/", post(upload::<S>).get(list::<S>))
    .route("/my", get(mine::<S>))
    .route("/{id}", delete(remove::<S>))
    .route("/{id}/view", get(view::<S>))
    .layer(DefaultBodyLimit::max(max_bytes))
}

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("file {id} not found")) }

// ─── Upload ───────────────────────────────────────────────────────────────────

/// `POST /fileupload`
pub async fn upload<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<FileUpload>), ApiError> {
  claims.require(Permission::Publish)?;
  let mut multipart = multipart?;

  let mut file = None;
  while let Some(field) = multipart.next_field().await? {
    if field.name() != Some(FILE_FIELD) {
      continue;
    }
    let name = field.file_name().unwrap_or("upload").to_owned();
    let content_type = field
      .content_type()
      .unwrap_or("application/octet-stream")
      .to_owned();
    let bytes = field.bytes().await?;
    file = Some((name, content_type, bytes));
    break;
  }
  let Some((name, content_type, bytes)) = file else {
    return Err(ApiError::Invalid("no file uploaded".into()));
  };

  let path = state
    .uploads
    .save(&name, &bytes)
    .await
    .map_err(|e| ApiError::Internal(format!("failed to store upload: {e}")))?;

  let record = state
    .store
    .record_upload(NewUpload {
      owner_id:  claims.subject_id,
      file_path: path.to_string_lossy().into_owned(),
      file_type: content_type,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    file_id = %record.file_id,
    owner = %claims.subject_id,
    size = bytes.len(),
    "file uploaded"
  );
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /fileupload`
pub async fn list<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(_): Authenticated,
) -> Result<Json<Vec<FileUpload>>, ApiError> {
  Ok(Json(state.store.list_uploads(None).await.map_err(ApiError::store)?))
}

/// `GET /fileupload/my`
pub async fn mine<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
) -> Result<Json<Vec<FileUpload>>, ApiError> {
  let own = state
    .store
    .list_uploads(Some(claims.subject_id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(own))
}

/// `GET /fileupload/{id}/view`
pub async fn view<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(_): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  let record = state
    .store
    .get_upload(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;

  let bytes = match state.uploads.read(Path::new(&record.file_path)).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found(id)),
    Err(e) => return Err(ApiError::Internal(format!("failed to read upload: {e}"))),
  };

  let content_type = HeaderValue::from_str(&record.file_type)
    .unwrap_or(HeaderValue::from_static("application/octet-stream"));
  Ok((
    [
      (header::CONTENT_TYPE, content_type),
      (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
      (header::CONTENT_DISPOSITION, disposition(&record.file_type)),
    ],
    bytes,
  ))
}

/// Only images render inline; anything else, HTML included, is downloaded.
fn disposition(file_type: &str) -> HeaderValue {
  if file_type.starts_with("image/") {
    HeaderValue::from_static("inline")
  } else {
    HeaderValue::from_static("attachment")
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /fileupload/{id}`
///
/// The record goes first; a file that cannot be removed afterwards is only
/// logged.
pub async fn remove<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
) -> Result<Json<Message>, ApiError> {
  let record = state
    .store
    .delete_upload(id, claims.own_scope())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;

  if let Err(e) = state.uploads.remove(Path::new(&record.file_path)).await {
    tracing::warn!(file_id = %id, path = %record.file_path, error = %e, "failed to remove uploaded file");
  }
  tracing::info!(file_id = %id, "file deleted");
  Ok(message("file deleted"))
}
