//! User reports against published content.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::Error;

/// The kind of content a complaint refers to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentType {
  Event,
  Announcement,
  /// Older clients send `forumPost`.
  #[serde(alias = "forumPost")]
  ForumPost,
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComplaintStatus {
  #[default]
  Pending,
  Reviewed,
}

impl ComplaintStatus {
  /// Parse a status supplied by a client.
  pub fn parse(s: &str) -> crate::Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownStatus(s.to_owned()))
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
  pub complaint_id: Uuid,
  pub content_id:   Uuid,
  pub content_type: ContentType,
  pub reported_by:  Uuid,
  pub note:         String,
  pub status:       ComplaintStatus,
  pub created_at:   DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComplaint {
  pub content_id:   Uuid,
  pub content_type: ContentType,
  pub reported_by:  Uuid,
  pub note:         String,
}
