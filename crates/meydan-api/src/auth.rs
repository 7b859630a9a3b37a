//! Bearer-token verifier, token issuer and the [`Authenticated`] extractor.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. A request presents one either
//! as the `token` cookie or as `Authorization: Bearer <token>`; the cookie
//! wins when both are present.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use meydan_core::{
  access::{Claims, Role},
  store::Store,
};
use rand_core::OsRng;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Name of the cookie that carries the token.
pub const TOKEN_COOKIE: &str = "token";

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// Signing and verification keys derived from the configured secret.
pub struct TokenKeys {
  encoding:   EncodingKey,
  decoding:   DecodingKey,
  validation: Validation,
  ttl:        TimeDelta,
}

impl TokenKeys {
  pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
    Self {
      encoding:   EncodingKey::from_secret(secret),
      decoding:   DecodingKey::from_secret(secret),
      validation: Validation::new(Algorithm::HS256),
      ttl:        TimeDelta::seconds(ttl_secs),
    }
  }

  /// Lifetime of an issued token.
  pub fn ttl(&self) -> TimeDelta { self.ttl }

  /// Issue a token for `user_id` that expires after the configured TTL.
  pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, ApiError> {
    let claims = Claims {
      subject_id: user_id,
      role,
      exp: (Utc::now() + self.ttl).timestamp(),
    };
    self.sign(&claims)
  }

  pub fn sign(&self, claims: &Claims) -> Result<String, ApiError> {
    encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
      .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
  }

  /// Check signature and expiry and return the claims.
  pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
  }
}

/// The credential presented with a request, if any.
pub fn credential(headers: &HeaderMap) -> Option<&str> {
  cookie_token(headers).or_else(|| bearer_token(headers))
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(';'))
    .filter_map(|pair| pair.trim().split_once('='))
    .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
    .map(|(_, value)| value)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
}

/// `Set-Cookie` value that stores `token` for the token's lifetime.
pub fn token_cookie(token: &str, ttl: TimeDelta) -> String {
  format!(
    "{TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
    ttl.num_seconds()
  )
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Present in a handler means the request carried a valid token.
pub struct Authenticated(pub Claims);

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: Store + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = credential(&parts.headers).ok_or(ApiError::Unauthenticated)?;
    let claims = state.tokens.verify(token).map_err(|e| {
      tracing::debug!(error = %e, "rejected credential");
      ApiError::Unauthenticated
    })?;
    Ok(Authenticated(claims))
  }
}

// ─── Passwords ───────────────────────────────────────────────────────────────

/// A well-formed PHC string with the default argon2 cost that no password
/// matches. Logins for unknown emails verify against it so they take as long
/// as a wrong password.
pub const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$bWV5ZGFuLWR1bW15c2FsdA$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Hash `password` into an argon2 PHC string off the async runtime.
pub async fn hash_password(password: String) -> Result<String, ApiError> {
  tokio::task::spawn_blocking(move || {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map(|hash| hash.to_string())
      .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))
  })
  .await
  .map_err(|e| ApiError::Internal(e.to_string()))?
}

/// `true` if `password` matches the stored PHC string.
pub async fn verify_password(password: String, phc: String) -> Result<bool, ApiError> {
  tokio::task::spawn_blocking(move || {
    let Ok(parsed) = PasswordHash::new(&phc) else {
      return false;
    };
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  })
  .await
  .map_err(|e| ApiError::Internal(e.to_string()))
}
