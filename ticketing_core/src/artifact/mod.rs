//! Ticket artifact construction and encoding.
//!
//! The artifact pipeline is split in two so the business-rule half stays
//! free of I/O:
//!
//! - [`payload`]: the versioned ticket record, its text rendering, and
//!   the uniqueness key derived from it. Pure and fully testable.
//! - [`writer`]: the injectable encoding boundary ([`ArtifactEncoder`])
//!   and the QR/PNG implementation that writes one image per ticket.
//!
//! Opening the generated image in a viewer belongs to the presentation
//! layer and has no counterpart here.

pub mod payload;
pub mod writer;


pub use payload::{TicketPayload, PAYLOAD_VERSION};
pub use writer::{ArtifactEncoder, ArtifactError, QrArtifactWriter, StoredArtifact};
