//! Core types and trait definitions for the Meydan community platform.
//!
//! This crate has no HTTP or database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod access;
pub mod announcement;
pub mod badge;
pub mod complaint;
pub mod error;
pub mod event;
pub mod forum;
pub mod membership;
pub mod store;
pub mod translation;
pub mod upload;
pub mod user;

pub use error::{Error, Result};
