//! [`SqliteStore`] is the SQLite implementation of the Meydan store traits.
//!
//! One submodule per resource. Scoped mutations bind the owner filter as a
//! nullable parameter (`?2 IS NULL OR <owner> = ?2`) so the id filter, the
//! ownership filter and the write are one statement.

mod announcements;
mod badges;
mod complaints;
mod events;
mod forum;
mod translations;
mod uploads;
mod users;

use std::path::Path;

use meydan_core::{access::Scope, store::Backend};

use crate::{Error, Result, encode::encode_uuid, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Meydan store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }
}

impl Backend for SqliteStore {
  type Error = Error;
}

/// The owner filter parameter for a scoped statement; `NULL` matches any
/// owner.
fn owner_param(scope: Scope) -> Option<String> { scope.owner().map(encode_uuid) }
