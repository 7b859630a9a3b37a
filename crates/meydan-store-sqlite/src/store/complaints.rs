use meydan_core::{
  complaint::{Complaint, ComplaintStatus, NewComplaint},
  store::ComplaintStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use super::SqliteStore;
use crate::{
  Result,
  encode::{COMPLAINT_COLUMNS, RawComplaint, encode_dt, encode_uuid, now},
};

impl ComplaintStore for SqliteStore {
  async fn create_complaint(&self, input: NewComplaint) -> Result<Complaint> {
    let complaint = Complaint {
      complaint_id: Uuid::new_v4(),
      content_id:   input.content_id,
      content_type: input.content_type,
      reported_by:  input.reported_by,
      note:         input.note,
      status:       ComplaintStatus::default(),
      created_at:   now(),
    };

    let params = (
      encode_uuid(complaint.complaint_id),
      encode_uuid(complaint.content_id),
      complaint.content_type.as_ref().to_owned(),
      encode_uuid(complaint.reported_by),
      complaint.note.clone(),
      complaint.status.as_ref().to_owned(),
      encode_dt(complaint.created_at),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO complaints (
             complaint_id, content_id, content_type, reported_by, note, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          params,
        )?;
        Ok(())
      })
      .await?;

    Ok(complaint)
  }

  async fn list_complaints(&self) -> Result<Vec<Complaint>> {
    let raws: Vec<RawComplaint> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMPLAINT_COLUMNS} FROM complaints ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map([], RawComplaint::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComplaint::into_complaint).collect()
  }

  async fn set_complaint_status(
    &self,
    id:     Uuid,
    status: ComplaintStatus,
  ) -> Result<Option<Complaint>> {
    let id_str     = encode_uuid(id);
    let status_str = status.as_ref().to_owned();

    let raw: Option<RawComplaint> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE complaints SET status = ?2 WHERE complaint_id = ?1
               RETURNING {COMPLAINT_COLUMNS}"
            ),
            rusqlite::params![id_str, status_str],
            RawComplaint::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawComplaint::into_complaint).transpose()
  }
}
