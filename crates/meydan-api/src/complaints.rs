//! Handlers for `/complaints` endpoints.

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  routing::{post, put},
};
use meydan_core::{
  access::Permission,
  complaint::{Complaint, ComplaintStatus, ContentType, NewComplaint},
  store::Store,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  auth::Authenticated,
  error::ApiError,
  extract::{JsonBody, Param, required},
};

pub fn routes<S>() -> Router<AppState<S>>
where
  S: Store + 'static,
{
  Router::new()
    .route("/", post(create::<S>).get(list::<S>))
    .route("/{id}", put(set_status::<S>))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub content_id:   Uuid,
  pub content_type: ContentType,
  pub note:         String,
}

/// `POST /complaints`
pub async fn create<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<(StatusCode, Json<Complaint>), ApiError> {
  claims.require(Permission::Publish)?;
  required("note", &body.note)?;

  let complaint = state
    .store
    .create_complaint(NewComplaint {
      content_id:   body.content_id,
      content_type: body.content_type,
      reported_by:  claims.subject_id,
      note:         body.note,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    complaint_id = %complaint.complaint_id,
    content_type = %complaint.content_type,
    "complaint filed"
  );
  Ok((StatusCode::CREATED, Json(complaint)))
}

/// `GET /complaints`
pub async fn list<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
) -> Result<Json<Vec<Complaint>>, ApiError> {
  claims.require(Permission::ReviewComplaints)?;
  Ok(Json(state.store.list_complaints().await.map_err(ApiError::store)?))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: String,
}

/// `PUT /complaints/{id}`, body: `{"status":"reviewed"}`
pub async fn set_status<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  Param(id): Param<Uuid>,
  JsonBody(body): JsonBody<StatusBody>,
) -> Result<Json<Complaint>, ApiError> {
  claims.require(Permission::ReviewComplaints)?;
  let status = ComplaintStatus::parse(&body.status)?;

  let complaint = state
    .store
    .set_complaint_status(id, status)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("complaint {id} not found")))?;

  tracing::info!(complaint_id = %id, %status, "complaint status changed");
  Ok(Json(complaint))
}
