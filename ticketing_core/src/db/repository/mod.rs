//! Repository trait definitions for storage operations.
//!
//! This module provides a collection of focused traits that abstract the
//! ticketing store. By splitting responsibilities across multiple traits,
//! implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for storage operations
//! - [`station`]: Station registry (directory view plus admin surface)
//! - [`ticket`]: Ticket persistence and audit queries
//! - [`admin`]: Admin credential storage
//!
//! # Trait Composition
//!
//! A complete backend implements all three repository traits. For code
//! that needs the whole surface, use the [`TicketingRepository`] bound:
//!
//! ```ignore
//! fn audit<R: TicketingRepository + ?Sized>(repo: &R) -> StoreResult<usize> {
//!     Ok(repo.list_tickets()?.len())
//! }
//! ```

pub mod admin;
pub mod error;
pub mod station;
pub mod ticket;

pub use admin::{hash_password, AdminRepository};
pub use error::{StoreError, StoreResult};
pub use station::{StationDirectory, StationRepository};
pub use ticket::TicketRepository;

/// Composite trait bound for a complete ticketing store.
///
/// Automatically implemented for any type that implements the station,
/// ticket, and admin repository traits.
pub trait TicketingRepository:
    StationRepository + TicketRepository + AdminRepository
{
}

impl<T> TicketingRepository for T where
    T: StationRepository + TicketRepository + AdminRepository
{
}
