//! Ticket store trait.

use super::error::StoreResult;
use crate::core::{NewTicket, Ticket};

/// Persistence surface for issued tickets.
///
/// Every write is a single-statement commit; no multi-statement
/// transaction spans components.
pub trait TicketRepository: Send + Sync {
    /// Persist one issued ticket and return the stored row.
    ///
    /// # Errors
    /// * `StoreError::DuplicateArtifact` if the artifact id already exists
    /// * `StoreError::UnknownStation` if either station name is absent
    /// * `StoreError::StorageUnavailable` on underlying I/O failure
    fn insert_ticket(&self, ticket: &NewTicket) -> StoreResult<Ticket>;

    /// All issued tickets, most recent first.
    fn list_tickets(&self) -> StoreResult<Vec<Ticket>>;

    /// Fetch one ticket by row id.
    ///
    /// # Errors
    /// * `StoreError::NotFound` if no ticket has this id
    fn get_ticket(&self, id: i64) -> StoreResult<Ticket>;
}
