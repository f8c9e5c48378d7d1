//! Batch ticket issuance orchestration.
//!
//! One purchase transaction covers a route and a list of passengers. The
//! orchestrator quotes every fare up front and aborts the whole batch on
//! any quoting failure (no partial charge); once issuance begins,
//! artifact or persistence failures are recorded per passenger and the
//! rest of the batch proceeds, because money and seat commitment are per
//! passenger.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, Timelike};
use log::{info, warn};

use crate::artifact::{ArtifactEncoder, ArtifactError, TicketPayload};
use crate::core::{NewTicket, PassengerRequest};
use crate::db::repository::{StoreError, TicketingRepository};
use crate::fare::{quote, FareError, FarePolicy};


/// Why one passenger's ticket could not be issued.
#[derive(Debug, thiserror::Error)]
pub enum IssueFailure {
    #[error("artifact generation failed: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("ticket could not be persisted: {0}")]
    Store(#[from] StoreError),
}

/// Outcome for one passenger within a batch.
#[derive(Debug)]
pub enum Outcome {
    /// Ticket persisted and artifact written.
    Issued {
        ticket_id: i64,
        artifact_location: PathBuf,
    },
    /// This passenger was skipped; the rest of the batch continued.
    Failed { reason: IssueFailure },
}

impl Outcome {
    pub fn is_issued(&self) -> bool {
        matches!(self, Outcome::Issued { .. })
    }
}

/// One passenger's line on the receipt.
#[derive(Debug)]
pub struct PassengerOutcome {
    pub passenger: PassengerRequest,
    /// The quoted fare, also present for failed passengers.
    pub fare: i64,
    pub outcome: Outcome,
}

/// Receipt for one purchase transaction, in input order.
#[derive(Debug)]
pub struct Receipt {
    pub start: String,
    pub end: String,
    pub outcomes: Vec<PassengerOutcome>,
    /// Sum of fares over issued tickets only.
    pub total_fare: i64,
}

/// Orchestrates fare computation, artifact generation, and persistence.
///
/// The storage handle and the artifact encoder are injected so the
/// issuance path can be exercised against the in-memory repository and a
/// stub encoder.
pub struct TicketIssuer {
    repository: Arc<dyn TicketingRepository>,
    encoder: Box<dyn ArtifactEncoder>,
    policy: FarePolicy,
}

impl TicketIssuer {
    pub fn new(
        repository: Arc<dyn TicketingRepository>,
        encoder: Box<dyn ArtifactEncoder>,
        policy: FarePolicy,
    ) -> Self {
        Self {
            repository,
            encoder,
            policy,
        }
    }

    /// Quote a fare without issuing anything.
    pub fn quote_fare(&self, start: &str, end: &str, age: i64) -> Result<i64, FareError> {
        quote(self.repository.as_ref(), &self.policy, start, end, age)
    }

    /// Issue tickets for one batch of passengers on a route.
    ///
    /// # Errors
    /// Returns the first [`FareError`] if any passenger's fare cannot be
    /// computed; in that case nothing has been persisted and no artifact
    /// has been written.
    pub fn issue(
        &self,
        passengers: &[PassengerRequest],
        start: &str,
        end: &str,
    ) -> Result<Receipt, FareError> {
        // Phase one: every fare must be computable before any side effect.
        let mut fares = Vec::with_capacity(passengers.len());
        for passenger in passengers {
            fares.push(quote(
                self.repository.as_ref(),
                &self.policy,
                start,
                end,
                passenger.age,
            )?);
        }

        // Phase two: per-passenger artifact and row, in input order.
        let mut outcomes = Vec::with_capacity(passengers.len());
        let mut total_fare = 0;
        for (index, (passenger, fare)) in passengers.iter().zip(fares).enumerate() {
            let serial = (index + 1) as u32;
            let issued_at = Local::now().naive_local();
            // Artifact stamps have second resolution; keep the row in step.
            let issued_at = issued_at.with_nanosecond(0).unwrap_or(issued_at);
            let payload = TicketPayload::new(
                serial,
                passenger.name.clone(),
                passenger.age,
                start,
                end,
                fare,
                issued_at,
            );

            let outcome = match self.encoder.encode(&payload) {
                Err(e) => {
                    warn!("artifact generation failed for {}: {e}", passenger.name);
                    Outcome::Failed {
                        reason: IssueFailure::Artifact(e),
                    }
                }
                Ok(artifact) => {
                    let row = NewTicket {
                        name: passenger.name.clone(),
                        age: passenger.age,
                        start_station: start.to_string(),
                        end_station: end.to_string(),
                        fare,
                        issued_at,
                        artifact_id: artifact.artifact_id,
                    };
                    match self.repository.insert_ticket(&row) {
                        Ok(stored) => {
                            total_fare += fare;
                            Outcome::Issued {
                                ticket_id: stored.id,
                                artifact_location: artifact.location,
                            }
                        }
                        Err(e) => {
                            warn!("ticket persistence failed for {}: {e}", passenger.name);
                            Outcome::Failed {
                                reason: IssueFailure::Store(e),
                            }
                        }
                    }
                }
            };
            outcomes.push(PassengerOutcome {
                passenger: passenger.clone(),
                fare,
                outcome,
            });
        }

        let issued = outcomes.iter().filter(|o| o.outcome.is_issued()).count();
        info!(
            "issued {issued}/{} tickets {start} -> {end}, total fare {total_fare}",
            outcomes.len()
        );

        Ok(Receipt {
            start: start.to_string(),
            end: end.to_string(),
            outcomes,
            total_fare,
        })
    }
}
