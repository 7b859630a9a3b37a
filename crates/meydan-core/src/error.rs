//! Error types for `meydan-core`.

use thiserror::Error;

use crate::access::{Permission, Role};

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  #[error("password must be at least {min} characters")]
  PasswordTooShort { min: usize },

  #[error("unknown complaint status: {0:?}")]
  UnknownStatus(String),

  #[error("role {role} is not allowed to {permission}")]
  Forbidden { role: Role, permission: Permission },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
