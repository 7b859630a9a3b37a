//! Metadata for files stored on disk. No binary data lives in the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
  pub file_id:    Uuid,
  pub owner_id:   Uuid,
  /// Location of the stored file on the server.
  pub file_path:  String,
  /// MIME type reported by the uploader, e.g. `image/png`.
  pub file_type:  String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUpload {
  pub owner_id:  Uuid,
  pub file_path: String,
  pub file_type: String,
}
