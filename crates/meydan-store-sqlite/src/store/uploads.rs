use meydan_core::{
  access::Scope,
  store::UploadStore,
  upload::{FileUpload, NewUpload},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use super::{SqliteStore, owner_param};
use crate::{
  Result,
  encode::{UPLOAD_COLUMNS, RawUpload, encode_dt, encode_uuid, now},
};

impl UploadStore for SqliteStore {
  async fn record_upload(&self, input: NewUpload) -> Result<FileUpload> {
    let upload = FileUpload {
      file_id:    Uuid::new_v4(),
      owner_id:   input.owner_id,
      file_path:  input.file_path,
      file_type:  input.file_type,
      created_at: now(),
    };

    let params = (
      encode_uuid(upload.file_id),
      encode_uuid(upload.owner_id),
      upload.file_path.clone(),
      upload.file_type.clone(),
      encode_dt(upload.created_at),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO uploads (file_id, owner_id, file_path, file_type, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          params,
        )?;
        Ok(())
      })
      .await?;

    Ok(upload)
  }

  async fn get_upload(&self, id: Uuid) -> Result<Option<FileUpload>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUpload> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {UPLOAD_COLUMNS} FROM uploads WHERE file_id = ?1"),
            rusqlite::params![id_str],
            RawUpload::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUpload::into_upload).transpose()
  }

  async fn list_uploads(&self, owner: Option<Uuid>) -> Result<Vec<FileUpload>> {
    let owner_str = owner.map(encode_uuid);

    let raws: Vec<RawUpload> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {UPLOAD_COLUMNS} FROM uploads
           WHERE ?1 IS NULL OR owner_id = ?1
           ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], RawUpload::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUpload::into_upload).collect()
  }

  async fn delete_upload(&self, id: Uuid, scope: Scope) -> Result<Option<FileUpload>> {
    let id_str    = encode_uuid(id);
    let owner_str = owner_param(scope);

    let raw: Option<RawUpload> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "DELETE FROM uploads WHERE file_id = ?1 AND (?2 IS NULL OR owner_id = ?2)
               RETURNING {UPLOAD_COLUMNS}"
            ),
            rusqlite::params![id_str, owner_str],
            RawUpload::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUpload::into_upload).transpose()
  }
}
