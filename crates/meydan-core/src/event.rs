//! Events organised by users, with a participant list and an approval flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub event_id:     Uuid,
  pub title:        String,
  pub description:  String,
  /// The owning user; set at creation, never changed.
  pub organizer_id: Uuid,
  pub date:         DateTime<Utc>,
  pub location:     String,
  /// Badge awarded to participants, if any.
  pub badge_id:     Option<Uuid>,
  pub qr_code:      Option<String>,
  pub url:          Option<String>,
  pub image_id:     Option<Uuid>,
  pub participants: Vec<Uuid>,
  pub approved:     bool,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::EventStore::create_event`].
/// `organizer_id` always comes from the acting identity.
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub title:        String,
  pub description:  String,
  pub organizer_id: Uuid,
  pub date:         DateTime<Utc>,
  pub location:     String,
  pub badge_id:     Option<Uuid>,
  pub qr_code:      Option<String>,
  pub url:          Option<String>,
  pub image_id:     Option<Uuid>,
}

/// The fields an update may change. Anything else in a request body
/// (organizer, approval, participants) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub date:        Option<DateTime<Utc>>,
  pub location:    Option<String>,
  pub badge_id:    Option<Uuid>,
  pub qr_code:     Option<String>,
  pub url:         Option<String>,
  pub image_id:    Option<Uuid>,
}

/// Outcome of [`crate::store::EventStore::add_participant`] for an event that
/// exists.
#[derive(Debug, Clone)]
pub enum Participation {
  Joined(Event),
  AlreadyJoined,
}
