use meydan_core::{
  access::Scope,
  announcement::{Announcement, AnnouncementPatch, NewAnnouncement},
  store::AnnouncementStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use super::{SqliteStore, owner_param};
use crate::{
  Result,
  encode::{ANNOUNCEMENT_COLUMNS, RawAnnouncement, encode_dt, encode_uuid, now},
};

impl AnnouncementStore for SqliteStore {
  async fn create_announcement(&self, input: NewAnnouncement) -> Result<Announcement> {
    let announcement = Announcement {
      announcement_id: Uuid::new_v4(),
      title:           input.title,
      content:         input.content,
      image_id:        input.image_id,
      organization_id: input.organization_id,
      approved:        false,
      created_at:      now(),
    };

    let params = (
      encode_uuid(announcement.announcement_id),
      announcement.title.clone(),
      announcement.content.clone(),
      encode_uuid(announcement.image_id),
      encode_uuid(announcement.organization_id),
      encode_dt(announcement.created_at),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO announcements (
             announcement_id, title, content, image_id, organization_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          params,
        )?;
        Ok(())
      })
      .await?;

    Ok(announcement)
  }

  async fn get_announcement(&self, id: Uuid) -> Result<Option<Announcement>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAnnouncement> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE announcement_id = ?1"
            ),
            rusqlite::params![id_str],
            RawAnnouncement::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAnnouncement::into_announcement).transpose()
  }

  async fn list_announcements(&self, organization: Option<Uuid>) -> Result<Vec<Announcement>> {
    let organization_str = organization.map(encode_uuid);

    let raws: Vec<RawAnnouncement> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
           WHERE ?1 IS NULL OR organization_id = ?1
           ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![organization_str], RawAnnouncement::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnnouncement::into_announcement).collect()
  }

  async fn update_announcement(
    &self,
    id:    Uuid,
    scope: Scope,
    patch: AnnouncementPatch,
  ) -> Result<Option<Announcement>> {
    let params = (
      encode_uuid(id),
      owner_param(scope),
      patch.title,
      patch.content,
      patch.image_id.map(encode_uuid),
    );

    let raw: Option<RawAnnouncement> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE announcements SET
                 title    = COALESCE(?3, title),
                 content  = COALESCE(?4, content),
                 image_id = COALESCE(?5, image_id)
               WHERE announcement_id = ?1 AND (?2 IS NULL OR organization_id = ?2)
               RETURNING {ANNOUNCEMENT_COLUMNS}"
            ),
            params,
            RawAnnouncement::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAnnouncement::into_announcement).transpose()
  }

  async fn delete_announcement(&self, id: Uuid, scope: Scope) -> Result<bool> {
    let id_str    = encode_uuid(id);
    let owner_str = owner_param(scope);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM announcements
           WHERE announcement_id = ?1 AND (?2 IS NULL OR organization_id = ?2)",
          rusqlite::params![id_str, owner_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  async fn approve_announcement(&self, id: Uuid, scope: Scope) -> Result<Option<Announcement>> {
    let id_str    = encode_uuid(id);
    let owner_str = owner_param(scope);

    let raw: Option<RawAnnouncement> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE announcements SET approved = 1
               WHERE announcement_id = ?1 AND (?2 IS NULL OR organization_id = ?2)
               RETURNING {ANNOUNCEMENT_COLUMNS}"
            ),
            rusqlite::params![id_str, owner_str],
            RawAnnouncement::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAnnouncement::into_announcement).transpose()
  }
}
