//! Handlers for `/translations` endpoints.

use std::collections::BTreeMap;

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  routing::{get, post},
};
use meydan_core::{
  access::Permission,
  store::Store,
  translation::{NewTranslation, Translation},
};
use serde::Deserialize;

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
    .route("/add", post(add::<S>))
    .route("/{lang}", get(for_lang::<S>))
}

/// `GET /translations/{lang}` returns `{key: value}` for the language. A key added
/// more than once resolves to its latest value.
pub async fn for_lang<S: Store>(
  State(state): State<AppState<S>>,
  Param(lang): Param<String>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
  let rows = state
    .store
    .translations_for(lang.clone())
    .await
    .map_err(ApiError::store)?;
  if rows.is_empty() {
    return Err(ApiError::NotFound(format!("no translations for {lang:?}")));
  }
  Ok(Json(rows.into_iter().map(|t| (t.key, t.value)).collect()))
}

#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub lang:  String,
  pub key:   String,
  pub value: String,
}

/// `POST /translations/add`
pub async fn add<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
  JsonBody(body): JsonBody<AddBody>,
) -> Result<(StatusCode, Json<Translation>), ApiError> {
  claims.require(Permission::ManageTranslations)?;
  required("lang", &body.lang)?;
  required("key", &body.key)?;
  required("value", &body.value)?;

  let translation = state
    .store
    .add_translation(NewTranslation {
      lang:  body.lang,
      key:   body.key,
      value: body.value,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(lang = %translation.lang, key = %translation.key, "translation added");
  Ok((StatusCode::CREATED, Json(translation)))
}
