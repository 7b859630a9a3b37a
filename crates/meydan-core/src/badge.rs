//! Badges awarded for participation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
  pub badge_id:    Uuid,
  pub name:        String,
  pub description: String,
  pub icon_id:     Option<Uuid>,
  /// Points granted when the badge is earned.
  pub point:       i64,
  pub created_at:  DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBadge {
  pub name:        String,
  pub description: String,
  pub icon_id:     Option<Uuid>,
  pub point:       i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BadgePatch {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub icon_id:     Option<Uuid>,
  pub point:       Option<i64>,
}
