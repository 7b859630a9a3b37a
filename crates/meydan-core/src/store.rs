//! Store traits implemented by storage backends (e.g. `meydan-store-sqlite`).
//!
//! Higher layers (`meydan-api`) depend on these abstractions, not on any
//! concrete backend. Each resource has its own trait; [`Store`] is the union
//! that handlers are generic over.
//!
//! # Atomicity
//!
//! Every mutation is a single atomic operation in the backend: the id filter,
//! the [`Scope`] ownership filter and the write happen together, so there is
//! no read-then-write window between concurrent requests. A mutation whose
//! filter matches nothing returns `None` / `false`, whether the id is unknown
//! or owned by someone else.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  access::Scope,
  announcement::{Announcement, AnnouncementPatch, NewAnnouncement},
  badge::{Badge, BadgePatch, NewBadge},
  complaint::{Complaint, ComplaintStatus, NewComplaint},
  event::{Event, EventPatch, NewEvent, Participation},
  forum::{ForumPost, ForumPostPatch, NewForumPost, Reaction},
  translation::{NewTranslation, Translation},
  upload::{FileUpload, NewUpload},
  user::{NewUser, User, UserCredentials},
};

/// The error type shared by every store trait of a backend.
pub trait Backend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub trait UserStore: Backend {
  /// Persist a new user. Returns `None` if the email is already registered.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look up a user and their password hash by (case-insensitive) email.
  fn find_credentials(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<UserCredentials>, Self::Error>> + Send + '_;
}

// ─── Events ──────────────────────────────────────────────────────────────────

pub trait EventStore: Backend {
  fn create_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn get_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  /// All events, or only those organised by `organizer` when given.
  fn list_events(
    &self,
    organizer: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  fn update_event(
    &self,
    id: Uuid,
    scope: Scope,
    patch: EventPatch,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  fn delete_event(
    &self,
    id: Uuid,
    scope: Scope,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn approve_event(
    &self,
    id: Uuid,
    scope: Scope,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  /// Add `user` to the event's participants. `None` if the event does not
  /// exist.
  fn add_participant(
    &self,
    id: Uuid,
    user: Uuid,
  ) -> impl Future<Output = Result<Option<Participation>, Self::Error>> + Send + '_;
}

// ─── Announcements ───────────────────────────────────────────────────────────

pub trait AnnouncementStore: Backend {
  fn create_announcement(
    &self,
    input: NewAnnouncement,
  ) -> impl Future<Output = Result<Announcement, Self::Error>> + Send + '_;

  fn get_announcement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Announcement>, Self::Error>> + Send + '_;

  fn list_announcements(
    &self,
    organization: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Announcement>, Self::Error>> + Send + '_;

  fn update_announcement(
    &self,
    id: Uuid,
    scope: Scope,
    patch: AnnouncementPatch,
  ) -> impl Future<Output = Result<Option<Announcement>, Self::Error>> + Send + '_;

  fn delete_announcement(
    &self,
    id: Uuid,
    scope: Scope,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn approve_announcement(
    &self,
    id: Uuid,
    scope: Scope,
  ) -> impl Future<Output = Result<Option<Announcement>, Self::Error>> + Send + '_;
}

// ─── Badges ──────────────────────────────────────────────────────────────────

/// Badges have no owner; every write is gated by role before reaching here.
pub trait BadgeStore: Backend {
  fn create_badge(
    &self,
    input: NewBadge,
  ) -> impl Future<Output = Result<Badge, Self::Error>> + Send + '_;

  fn get_badge(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Badge>, Self::Error>> + Send + '_;

  fn list_badges(
    &self,
  ) -> impl Future<Output = Result<Vec<Badge>, Self::Error>> + Send + '_;

  fn update_badge(
    &self,
    id: Uuid,
    patch: BadgePatch,
  ) -> impl Future<Output = Result<Option<Badge>, Self::Error>> + Send + '_;

  fn delete_badge(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Forum ───────────────────────────────────────────────────────────────────

pub trait ForumStore: Backend {
  fn create_post(
    &self,
    input: NewForumPost,
  ) -> impl Future<Output = Result<ForumPost, Self::Error>> + Send + '_;

  fn get_post(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ForumPost>, Self::Error>> + Send + '_;

  /// All posts, newest first.
  fn list_posts(
    &self,
  ) -> impl Future<Output = Result<Vec<ForumPost>, Self::Error>> + Send + '_;

  fn update_post(
    &self,
    id: Uuid,
    scope: Scope,
    patch: ForumPostPatch,
  ) -> impl Future<Output = Result<Option<ForumPost>, Self::Error>> + Send + '_;

  fn delete_post(
    &self,
    id: Uuid,
    scope: Scope,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn add_comment(
    &self,
    id: Uuid,
    user: Uuid,
    content: String,
  ) -> impl Future<Output = Result<Option<ForumPost>, Self::Error>> + Send + '_;

  /// Flip `user`'s membership in the post's `reaction` set.
  fn toggle_reaction(
    &self,
    id: Uuid,
    user: Uuid,
    reaction: Reaction,
  ) -> impl Future<Output = Result<Option<ForumPost>, Self::Error>> + Send + '_;
}

// ─── Uploads ─────────────────────────────────────────────────────────────────

pub trait UploadStore: Backend {
  fn record_upload(
    &self,
    input: NewUpload,
  ) -> impl Future<Output = Result<FileUpload, Self::Error>> + Send + '_;

  fn get_upload(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<FileUpload>, Self::Error>> + Send + '_;

  fn list_uploads(
    &self,
    owner: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<FileUpload>, Self::Error>> + Send + '_;

  /// Remove the record and return it, so the caller can remove the file.
  fn delete_upload(
    &self,
    id: Uuid,
    scope: Scope,
  ) -> impl Future<Output = Result<Option<FileUpload>, Self::Error>> + Send + '_;
}

// ─── Complaints ──────────────────────────────────────────────────────────────

pub trait ComplaintStore: Backend {
  fn create_complaint(
    &self,
    input: NewComplaint,
  ) -> impl Future<Output = Result<Complaint, Self::Error>> + Send + '_;

  fn list_complaints(
    &self,
  ) -> impl Future<Output = Result<Vec<Complaint>, Self::Error>> + Send + '_;

  fn set_complaint_status(
    &self,
    id: Uuid,
    status: ComplaintStatus,
  ) -> impl Future<Output = Result<Option<Complaint>, Self::Error>> + Send + '_;
}

// ─── Translations ────────────────────────────────────────────────────────────

pub trait TranslationStore: Backend {
  fn add_translation(
    &self,
    input: NewTranslation,
  ) -> impl Future<Output = Result<Translation, Self::Error>> + Send + '_;

  fn translations_for(
    &self,
    lang: String,
  ) -> impl Future<Output = Result<Vec<Translation>, Self::Error>> + Send + '_;
}

// ─── Union ───────────────────────────────────────────────────────────────────

/// A backend implementing every resource store.
pub trait Store:
  UserStore
  + EventStore
  + AnnouncementStore
  + BadgeStore
  + ForumStore
  + UploadStore
  + ComplaintStore
  + TranslationStore
{
}

impl<T> Store for T where
  T: UserStore
    + EventStore
    + AnnouncementStore
    + BadgeStore
    + ForumStore
    + UploadStore
    + ComplaintStore
    + TranslationStore
{
}
