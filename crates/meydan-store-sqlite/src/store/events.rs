use meydan_core::{
  access::Scope,
  event::{Event, EventPatch, NewEvent, Participation},
  membership,
  store::EventStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use super::{SqliteStore, owner_param};
use crate::{
  Result,
  encode::{
    EVENT_COLUMNS,
    RawEvent,
    decode_json,
    encode_dt,
    encode_json,
    encode_uuid,
    in_call,
    now,
    stored_precision,
  },
};

/// Result of the participant transaction, before decoding.
enum Join {
  Missing,
  Already,
  Joined(RawEvent),
}

impl EventStore for SqliteStore {
  async fn create_event(&self, input: NewEvent) -> Result<Event> {
    let event = Event {
      event_id:     Uuid::new_v4(),
      title:        input.title,
      description:  input.description,
      organizer_id: input.organizer_id,
      date:         stored_precision(input.date),
      location:     input.location,
      badge_id:     input.badge_id,
      qr_code:      input.qr_code,
      url:          input.url,
      image_id:     input.image_id,
      participants: Vec::new(),
      approved:     false,
      created_at:   now(),
    };

    let params = (
      encode_uuid(event.event_id),
      event.title.clone(),
      event.description.clone(),
      encode_uuid(event.organizer_id),
      encode_dt(event.date),
      event.location.clone(),
      event.badge_id.map(encode_uuid),
      event.qr_code.clone(),
      event.url.clone(),
      event.image_id.map(encode_uuid),
      encode_dt(event.created_at),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (
             event_id, title, description, organizer_id, date, location,
             badge_id, qr_code, url, image_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          params,
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE event_id = ?1"),
            rusqlite::params![id_str],
            RawEvent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn list_events(&self, organizer: Option<Uuid>) -> Result<Vec<Event>> {
    let organizer_str = organizer.map(encode_uuid);

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EVENT_COLUMNS} FROM events
           WHERE ?1 IS NULL OR organizer_id = ?1
           ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![organizer_str], RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn update_event(
    &self,
    id:    Uuid,
    scope: Scope,
    patch: EventPatch,
  ) -> Result<Option<Event>> {
    let params = (
      encode_uuid(id),
      owner_param(scope),
      patch.title,
      patch.description,
      patch.date.map(encode_dt),
      patch.location,
      patch.badge_id.map(encode_uuid),
      patch.qr_code,
      patch.url,
      patch.image_id.map(encode_uuid),
    );

    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE events SET
                 title       = COALESCE(?3, title),
                 description = COALESCE(?4, description),
                 date        = COALESCE(?5, date),
                 location    = COALESCE(?6, location),
                 badge_id    = COALESCE(?7, badge_id),
                 qr_code     = COALESCE(?8, qr_code),
                 url         = COALESCE(?9, url),
                 image_id    = COALESCE(?10, image_id)
               WHERE event_id = ?1 AND (?2 IS NULL OR organizer_id = ?2)
               RETURNING {EVENT_COLUMNS}"
            ),
            params,
            RawEvent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn delete_event(&self, id: Uuid, scope: Scope) -> Result<bool> {
    let id_str    = encode_uuid(id);
    let owner_str = owner_param(scope);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM events WHERE event_id = ?1 AND (?2 IS NULL OR organizer_id = ?2)",
          rusqlite::params![id_str, owner_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  async fn approve_event(&self, id: Uuid, scope: Scope) -> Result<Option<Event>> {
    let id_str    = encode_uuid(id);
    let owner_str = owner_param(scope);

    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE events SET approved = 1
               WHERE event_id = ?1 AND (?2 IS NULL OR organizer_id = ?2)
               RETURNING {EVENT_COLUMNS}"
            ),
            rusqlite::params![id_str, owner_str],
            RawEvent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn add_participant(&self, id: Uuid, user: Uuid) -> Result<Option<Participation>> {
    let id_str = encode_uuid(id);

    let join = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: Option<String> = tx
          .query_row(
            "SELECT participants FROM events WHERE event_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;
        let Some(current) = current else {
          return Ok(Join::Missing);
        };

        let mut participants: Vec<Uuid> = decode_json(&current).map_err(in_call)?;
        if !membership::insert(&mut participants, user) {
          return Ok(Join::Already);
        }
        let updated = encode_json(&participants).map_err(in_call)?;

        let raw = tx.query_row(
          &format!(
            "UPDATE events SET participants = ?2 WHERE event_id = ?1
             RETURNING {EVENT_COLUMNS}"
          ),
          rusqlite::params![id_str, updated],
          RawEvent::from_row,
        )?;
        tx.commit()?;
        Ok(Join::Joined(raw))
      })
      .await?;

    match join {
      Join::Missing => Ok(None),
      Join::Already => Ok(Some(Participation::AlreadyJoined)),
      Join::Joined(raw) => Ok(Some(Participation::Joined(raw.into_event()?))),
    }
  }
}
