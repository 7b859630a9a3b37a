use meydan_core::{
  badge::{Badge, BadgePatch, NewBadge},
  store::BadgeStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use super::SqliteStore;
use crate::{
  Result,
  encode::{BADGE_COLUMNS, RawBadge, encode_dt, encode_uuid, now},
};

impl BadgeStore for SqliteStore {
  async fn create_badge(&self, input: NewBadge) -> Result<Badge> {
    let badge = Badge {
      badge_id:    Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      icon_id:     input.icon_id,
      point:       input.point,
      created_at:  now(),
    };

    let params = (
      encode_uuid(badge.badge_id),
      badge.name.clone(),
      badge.description.clone(),
      badge.icon_id.map(encode_uuid),
      badge.point,
      encode_dt(badge.created_at),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO badges (badge_id, name, description, icon_id, point, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          params,
        )?;
        Ok(())
      })
      .await?;

    Ok(badge)
  }

  async fn get_badge(&self, id: Uuid) -> Result<Option<Badge>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawBadge> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {BADGE_COLUMNS} FROM badges WHERE badge_id = ?1"),
            rusqlite::params![id_str],
            RawBadge::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawBadge::into_badge).transpose()
  }

  async fn list_badges(&self) -> Result<Vec<Badge>> {
    let raws: Vec<RawBadge> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {BADGE_COLUMNS} FROM badges ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map([], RawBadge::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBadge::into_badge).collect()
  }

  async fn update_badge(&self, id: Uuid, patch: BadgePatch) -> Result<Option<Badge>> {
    let params = (
      encode_uuid(id),
      patch.name,
      patch.description,
      patch.icon_id.map(encode_uuid),
      patch.point,
    );

    let raw: Option<RawBadge> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE badges SET
                 name        = COALESCE(?2, name),
                 description = COALESCE(?3, description),
                 icon_id     = COALESCE(?4, icon_id),
                 point       = COALESCE(?5, point)
               WHERE badge_id = ?1
               RETURNING {BADGE_COLUMNS}"
            ),
            params,
            RawBadge::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawBadge::into_badge).transpose()
  }

  async fn delete_badge(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM badges WHERE badge_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
