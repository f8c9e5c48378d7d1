//! Repository implementations module.
//!
//! This module contains the implementations of the ticketing repository
//! traits:
//! - `sqlite`: Diesel-backed SQLite implementation (the terminal's store)
//! - `local`: in-memory implementation for unit testing and local
//!   development

pub mod local;
#[cfg(feature = "sqlite-store")]
pub mod sqlite;

pub use local::LocalRepository;
#[cfg(feature = "sqlite-store")]
pub use sqlite::{SqliteRepository, SqliteSettings};
