//! Handlers for `/users` endpoints: registration, login and the caller's
//! own account.

use axum::{
  Json, Router,
  extract::State,
  http::{StatusCode, header},
  response::IntoResponse,
  routing::{get, post},
};
use meydan_core::{
  access::Role,
  store::Store,
  user::{NewUser, User, validate_registration},
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  auth::{
    Authenticated, DUMMY_PASSWORD_HASH, hash_password, token_cookie, verify_password,
  },
  error::ApiError,
  extract::JsonBody,
};

pub fn routes<S>() -> Router<AppState<S>>
where
  S: Store + 'static,
{
  Router::new()
    .route("/register", post(register::<S>))
    .route("/login", post(login::<S>))
    .route("/me", get(me::<S>))
}

// ─── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:      String,
  pub email:     String,
  pub password:  String,
  pub user_type: Option<Role>,
}

/// `POST /users/register`
pub async fn register<S: Store>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<RegisterBody>,
) -> Result<(StatusCode, Json<User>), ApiError> {
  let email = body.email.trim().to_owned();
  validate_registration(&body.name, &email, &body.password)?;

  let password_hash = hash_password(body.password).await?;
  let user = state
    .store
    .create_user(NewUser {
      name: body.name.trim().to_owned(),
      email,
      user_type: body.user_type.unwrap_or(Role::Individual),
      password_hash,
    })
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::Invalid("email is already registered".into()))?;

  tracing::info!(user_id = %user.user_id, role = %user.user_type, "user registered");
  Ok((StatusCode::CREATED, Json(user)))
}

// ─── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token: String,
  pub user:  User,
}

/// `POST /users/login` returns the token and also sets it as an HttpOnly
/// cookie.
pub async fn login<S: Store>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<LoginBody>,
) -> Result<impl IntoResponse, ApiError> {
  let creds = state
    .store
    .find_credentials(body.email)
    .await
    .map_err(ApiError::store)?;
  // Unknown emails still pay for one verification.
  let phc = creds
    .as_ref()
    .map_or(DUMMY_PASSWORD_HASH, |c| c.password_hash.as_str())
    .to_owned();
  let verified = verify_password(body.password, phc).await?;
  let Some(creds) = creds.filter(|_| verified) else {
    tracing::debug!("login rejected");
    return Err(ApiError::Unauthenticated);
  };

  let token = state.tokens.issue(creds.user.user_id, creds.user.user_type)?;
  let cookie = token_cookie(&token, state.tokens.ttl());
  tracing::info!(user_id = %creds.user.user_id, "user logged in");

  Ok((
    [(header::SET_COOKIE, cookie)],
    Json(LoginResponse { token, user: creds.user }),
  ))
}

// ─── Me ───────────────────────────────────────────────────────────────────────

/// `GET /users/me`
pub async fn me<S: Store>(
  State(state): State<AppState<S>>,
  Authenticated(claims): Authenticated,
) -> Result<Json<User>, ApiError> {
  let user = state
    .store
    .get_user(claims.subject_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
  Ok(Json(user))
}
