//! Forum posts with embedded comments and reaction sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id: Uuid,
  pub user_id:    Uuid,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
  pub post_id:    Uuid,
  pub title:      String,
  pub content:    String,
  /// The owning user; set at creation, never changed.
  pub author_id:  Uuid,
  pub comments:   Vec<Comment>,
  pub likes:      Vec<Uuid>,
  pub dislikes:   Vec<Uuid>,
  pub tags:       Vec<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewForumPost {
  pub title:     String,
  pub content:   String,
  pub author_id: Uuid,
  pub tags:      Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForumPostPatch {
  pub title:   Option<String>,
  pub content: Option<String>,
  pub tags:    Option<Vec<String>>,
}

/// Which reaction set a toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
  Like,
  Dislike,
}
