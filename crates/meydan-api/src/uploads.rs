//! Local directory holding uploaded files.
//!
//! Files are written as `<uuid>-<sanitised original name>` directly under the
//! root. Only paths inside the root are ever read or removed.

use std::{
  io,
  path::{Path, PathBuf},
};

use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;

/// Request body limit for uploads unless configured otherwise.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct UploadDir {
  root:      PathBuf,
  max_bytes: usize,
}

impl UploadDir {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into(), max_bytes: DEFAULT_MAX_UPLOAD_BYTES }
  }

  /// Largest upload request body accepted, multipart framing included.
  pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
    self.max_bytes = max_bytes;
    self
  }

  pub fn root(&self) -> &Path { &self.root }

  pub fn max_bytes(&self) -> usize { self.max_bytes }

  /// Create the directory if it does not exist yet.
  pub async fn ensure(&self) -> io::Result<()> {
    tokio::fs::create_dir_all(&self.root).await
  }

  /// Write `bytes` under a fresh unique name and return the stored path.
  pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let path = self
      .root
      .join(format!("{}-{}", Uuid::new_v4(), sanitize(original_name)));
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
  }

  pub async fn read(&self, stored: &Path) -> io::Result<Vec<u8>> {
    tokio::fs::read(self.contained(stored)?).await
  }

  pub async fn remove(&self, stored: &Path) -> io::Result<()> {
    tokio::fs::remove_file(self.contained(stored)?).await
  }

  fn contained<'a>(&self, stored: &'a Path) -> io::Result<&'a Path> {
    let inside = stored.parent() == Some(self.root.as_path())
      && stored.file_name().is_some();
    if inside {
      Ok(stored)
    } else {
      Err(io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("{} is outside the upload directory", stored.display()),
      ))
    }
  }
}

/// Reduce a client-supplied file name to a safe single path component.
pub fn sanitize(name: &str) -> String {
  let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
  let cleaned: String = base
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
        c
      } else {
        '_'
      }
    })
    .take(MAX_NAME_LEN)
    .collect();
  let cleaned = cleaned.trim_start_matches('.');
  if cleaned.is_empty() {
    "file".to_owned()
  } else {
    cleaned.to_owned()
  }
}
