//! Storage module for the ticketing terminal.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (CLI terminal, excluded)             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Issuance Orchestrator (issuance) - Business Logic      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Sqlite Repository│     │  Local Repository       │
//! │ (Diesel)         │     │  (in-memory)            │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! The module includes:
//! - `repository`: trait definitions for storage operations
//! - `repositories::sqlite`: Diesel-backed SQLite implementation
//! - `repositories::local`: in-memory implementation for unit testing
//!   and local development
//! - `factory`: factory for creating repository instances
//!
//! The process entry point owns the storage handle and injects it into
//! the fare calculator and issuance orchestrator; each operation acquires
//! a connection for its own scope and releases it on every exit path.

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
#[cfg(feature = "sqlite-store")]
pub use repositories::{SqliteRepository, SqliteSettings};
pub use repositories::LocalRepository;
pub use repository::{
    AdminRepository, StationDirectory, StationRepository, StoreError, StoreResult,
    TicketRepository, TicketingRepository,
};
