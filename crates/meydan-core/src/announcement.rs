//! Announcements published by organisations; shown once approved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
  pub announcement_id: Uuid,
  pub title:           String,
  pub content:         String,
  pub image_id:        Uuid,
  /// The publishing user; set at creation, never changed.
  pub organization_id: Uuid,
  pub approved:        bool,
  pub created_at:      DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
  pub title:           String,
  pub content:         String,
  pub image_id:        Uuid,
  pub organization_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementPatch {
  pub title:    Option<String>,
  pub content:  Option<String>,
  pub image_id: Option<Uuid>,
}
