//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`)
//! so that lexical order is chronological order. Embedded lists are stored as
//! compact JSON. UUIDs are stored as hyphenated lowercase strings.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use meydan_core::{
  access::Role,
  announcement::Announcement,
  badge::Badge,
  complaint::{Complaint, ComplaintStatus, ContentType},
  event::Event,
  forum::ForumPost,
  translation::Translation,
  upload::FileUpload,
  user::User,
};
use rusqlite::Row;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// The current time, already at the precision [`encode_dt`] keeps, so a
/// record handed back from a create equals the one read back later.
pub fn now() -> DateTime<Utc> { stored_precision(Utc::now()) }

pub fn stored_precision(dt: DateTime<Utc>) -> DateTime<Utc> { dt.trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── JSON columns ─────────────────────────────────────────────────────────────

pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

pub fn decode_json<T: DeserializeOwned>(s: &str) -> Result<T> {
  Ok(serde_json::from_str(s)?)
}

/// Wrap a non-database failure raised inside a connection closure.
pub fn in_call(
  e: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(e.into())
}

// ─── Enum columns ─────────────────────────────────────────────────────────────

fn decode_variant<T: FromStr>(column: &'static str, value: String) -> Result<T> {
  T::from_str(&value).map_err(|_| Error::UnknownVariant { column, value })
}

// ─── Row types ────────────────────────────────────────────────────────────────
//
// Each `*_COLUMNS` constant lists the columns in the order its raw struct's
// `from_row` reads them.

pub const USER_COLUMNS: &str = "user_id, name, email, user_type, \
  profile_image_id, badges, point, profile_details, created_at, password_hash";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:          String,
  pub name:             String,
  pub email:            String,
  pub user_type:        String,
  pub profile_image_id: Option<String>,
  pub badges:           String,
  pub point:            i64,
  pub profile_details:  String,
  pub created_at:       String,
  pub password_hash:    String,
}

impl RawUser {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:          row.get(0)?,
      name:             row.get(1)?,
      email:            row.get(2)?,
      user_type:        row.get(3)?,
      profile_image_id: row.get(4)?,
      badges:           row.get(5)?,
      point:            row.get(6)?,
      profile_details:  row.get(7)?,
      created_at:       row.get(8)?,
      password_hash:    row.get(9)?,
    })
  }

  /// Decode into the public user and the stored password hash.
  pub fn into_parts(self) -> Result<(User, String)> {
    let user = User {
      user_id:          decode_uuid(&self.user_id)?,
      name:             self.name,
      email:            self.email,
      user_type:        decode_variant::<Role>("user_type", self.user_type)?,
      profile_image_id: decode_opt_uuid(self.profile_image_id)?,
      badges:           decode_json(&self.badges)?,
      point:            self.point,
      profile_details:  decode_json(&self.profile_details)?,
      created_at:       decode_dt(&self.created_at)?,
    };
    Ok((user, self.password_hash))
  }
}

pub const EVENT_COLUMNS: &str = "event_id, title, description, organizer_id, \
  date, location, badge_id, qr_code, url, image_id, participants, approved, \
  created_at";

/// Raw values read directly from an `events` row.
pub struct RawEvent {
  pub event_id:     String,
  pub title:        String,
  pub description:  String,
  pub organizer_id: String,
  pub date:         String,
  pub location:     String,
  pub badge_id:     Option<String>,
  pub qr_code:      Option<String>,
  pub url:          Option<String>,
  pub image_id:     Option<String>,
  pub participants: String,
  pub approved:     bool,
  pub created_at:   String,
}

impl RawEvent {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id:     row.get(0)?,
      title:        row.get(1)?,
      description:  row.get(2)?,
      organizer_id: row.get(3)?,
      date:         row.get(4)?,
      location:     row.get(5)?,
      badge_id:     row.get(6)?,
      qr_code:      row.get(7)?,
      url:          row.get(8)?,
      image_id:     row.get(9)?,
      participants: row.get(10)?,
      approved:     row.get(11)?,
      created_at:   row.get(12)?,
    })
  }

  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      event_id:     decode_uuid(&self.event_id)?,
      title:        self.title,
      description:  self.description,
      organizer_id: decode_uuid(&self.organizer_id)?,
      date:         decode_dt(&self.date)?,
      location:     self.location,
      badge_id:     decode_opt_uuid(self.badge_id)?,
      qr_code:      self.qr_code,
      url:          self.url,
      image_id:     decode_opt_uuid(self.image_id)?,
      participants: decode_json(&self.participants)?,
      approved:     self.approved,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

pub const ANNOUNCEMENT_COLUMNS: &str = "announcement_id, title, content, \
  image_id, organization_id, approved, created_at";

/// Raw values read directly from an `announcements` row.
pub struct RawAnnouncement {
  pub announcement_id: String,
  pub title:           String,
  pub content:         String,
  pub image_id:        String,
  pub organization_id: String,
  pub approved:        bool,
  pub created_at:      String,
}

impl RawAnnouncement {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      announcement_id: row.get(0)?,
      title:           row.get(1)?,
      content:         row.get(2)?,
      image_id:        row.get(3)?,
      organization_id: row.get(4)?,
      approved:        row.get(5)?,
      created_at:      row.get(6)?,
    })
  }

  pub fn into_announcement(self) -> Result<Announcement> {
    Ok(Announcement {
      announcement_id: decode_uuid(&self.announcement_id)?,
      title:           self.title,
      content:         self.content,
      image_id:        decode_uuid(&self.image_id)?,
      organization_id: decode_uuid(&self.organization_id)?,
      approved:        self.approved,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

pub const BADGE_COLUMNS: &str =
  "badge_id, name, description, icon_id, point, created_at";

/// Raw values read directly from a `badges` row.
pub struct RawBadge {
  pub badge_id:    String,
  pub name:        String,
  pub description: String,
  pub icon_id:     Option<String>,
  pub point:       i64,
  pub created_at:  String,
}

impl RawBadge {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      badge_id:    row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      icon_id:     row.get(3)?,
      point:       row.get(4)?,
      created_at:  row.get(5)?,
    })
  }

  pub fn into_badge(self) -> Result<Badge> {
    Ok(Badge {
      badge_id:    decode_uuid(&self.badge_id)?,
      name:        self.name,
      description: self.description,
      icon_id:     decode_opt_uuid(self.icon_id)?,
      point:       self.point,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub const POST_COLUMNS: &str = "post_id, title, content, author_id, comments, \
  likes, dislikes, tags, created_at";

/// Raw values read directly from a `forum_posts` row.
pub struct RawPost {
  pub post_id:    String,
  pub title:      String,
  pub content:    String,
  pub author_id:  String,
  pub comments:   String,
  pub likes:      String,
  pub dislikes:   String,
  pub tags:       String,
  pub created_at: String,
}

impl RawPost {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      post_id:    row.get(0)?,
      title:      row.get(1)?,
      content:    row.get(2)?,
      author_id:  row.get(3)?,
      comments:   row.get(4)?,
      likes:      row.get(5)?,
      dislikes:   row.get(6)?,
      tags:       row.get(7)?,
      created_at: row.get(8)?,
    })
  }

  pub fn into_post(self) -> Result<ForumPost> {
    Ok(ForumPost {
      post_id:    decode_uuid(&self.post_id)?,
      title:      self.title,
      content:    self.content,
      author_id:  decode_uuid(&self.author_id)?,
      comments:   decode_json(&self.comments)?,
      likes:      decode_json(&self.likes)?,
      dislikes:   decode_json(&self.dislikes)?,
      tags:       decode_json(&self.tags)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const UPLOAD_COLUMNS: &str =
  "file_id, owner_id, file_path, file_type, created_at";

/// Raw values read directly from an `uploads` row.
pub struct RawUpload {
  pub file_id:    String,
  pub owner_id:   String,
  pub file_path:  String,
  pub file_type:  String,
  pub created_at: String,
}

impl RawUpload {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      file_id:    row.get(0)?,
      owner_id:   row.get(1)?,
      file_path:  row.get(2)?,
      file_type:  row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_upload(self) -> Result<FileUpload> {
    Ok(FileUpload {
      file_id:    decode_uuid(&self.file_id)?,
      owner_id:   decode_uuid(&self.owner_id)?,
      file_path:  self.file_path,
      file_type:  self.file_type,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const COMPLAINT_COLUMNS: &str = "complaint_id, content_id, content_type, \
  reported_by, note, status, created_at";

/// Raw values read directly from a `complaints` row.
pub struct RawComplaint {
  pub complaint_id: String,
  pub content_id:   String,
  pub content_type: String,
  pub reported_by:  String,
  pub note:         String,
  pub status:       String,
  pub created_at:   String,
}

impl RawComplaint {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      complaint_id: row.get(0)?,
      content_id:   row.get(1)?,
      content_type: row.get(2)?,
      reported_by:  row.get(3)?,
      note:         row.get(4)?,
      status:       row.get(5)?,
      created_at:   row.get(6)?,
    })
  }

  pub fn into_complaint(self) -> Result<Complaint> {
    Ok(Complaint {
      complaint_id: decode_uuid(&self.complaint_id)?,
      content_id:   decode_uuid(&self.content_id)?,
      content_type: decode_variant::<ContentType>("content_type", self.content_type)?,
      reported_by:  decode_uuid(&self.reported_by)?,
      note:         self.note,
      status:       decode_variant::<ComplaintStatus>("status", self.status)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

pub const TRANSLATION_COLUMNS: &str = "translation_id, lang, key, value";

/// Raw values read directly from a `translations` row.
pub struct RawTranslation {
  pub translation_id: String,
  pub lang:           String,
  pub key:            String,
  pub value:          String,
}

impl RawTranslation {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      translation_id: row.get(0)?,
      lang:           row.get(1)?,
      key:            row.get(2)?,
      value:          row.get(3)?,
    })
  }

  pub fn into_translation(self) -> Result<Translation> {
    Ok(Translation {
      translation_id: decode_uuid(&self.translation_id)?,
      lang:           self.lang,
      key:            self.key,
      value:          self.value,
    })
  }
}
