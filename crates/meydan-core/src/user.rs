//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, access::Role};

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A registered account. The password hash is held separately in
/// [`UserCredentials`] and never serialised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:          Uuid,
  pub name:             String,
  pub email:            String,
  pub user_type:        Role,
  pub profile_image_id: Option<Uuid>,
  /// Badges earned so far.
  pub badges:           Vec<Uuid>,
  pub point:            i64,
  /// Free-form, account-type specific profile data.
  pub profile_details:  serde_json::Value,
  pub created_at:       DateTime<Utc>,
}

/// A user together with their stored argon2 PHC hash, for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
  pub user:          User,
  pub password_hash: String,
}

/// Input to [`crate::store::UserStore::create_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub user_type:     Role,
  pub password_hash: String,
}

/// Check the registration fields that do not depend on the store.
pub fn validate_registration(
  name: &str,
  email: &str,
  password: &str,
) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::MissingField("name"));
  }
  if !is_email(email) {
    return Err(Error::InvalidEmail(email.to_owned()));
  }
  if password.chars().count() < MIN_PASSWORD_LEN {
    return Err(Error::PasswordTooShort { min: MIN_PASSWORD_LEN });
  }
  Ok(())
}

/// Loose shape check: one `@`, non-empty local part, dotted domain.
fn is_email(s: &str) -> bool {
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && !s.chars().any(char::is_whitespace)
    && domain
      .split_once('.')
      .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
