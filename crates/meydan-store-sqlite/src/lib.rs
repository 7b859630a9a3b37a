//! SQLite backend for the Meydan store traits.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Because every call is executed in
//! order on that one connection, a multi-statement closure run inside a
//! transaction is atomic with respect to every other request.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
