//! The ticket payload record and its projections.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Version of the payload record format embedded in every artifact.
pub const PAYLOAD_VERSION: u32 = 1;

/// The structured record encoded into a ticket artifact.
///
/// The payload is the source of truth for everything the artifact
/// carries: the text block is a projection of it, and the uniqueness key
/// stored alongside the ticket is a digest of that projection. The
/// `serial` is the passenger's 1-based position within the purchase
/// batch; together with the second-resolution issue stamp it makes the
/// payload unique even for same-named passengers issued within the same
/// second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPayload {
    pub version: u32,
    pub serial: u32,
    pub name: String,
    pub age: i64,
    pub start: String,
    pub end: String,
    pub fare: i64,
    pub issued_at: NaiveDateTime,
}

impl TicketPayload {
    pub fn new(
        serial: u32,
        name: impl Into<String>,
        age: i64,
        start: impl Into<String>,
        end: impl Into<String>,
        fare: i64,
        issued_at: NaiveDateTime,
    ) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            serial,
            name: name.into(),
            age,
            start: start.into(),
            end: end.into(),
            fare,
            issued_at,
        }
    }

    /// Render the fixed-format text block encoded into the artifact.
    ///
    /// This is the scanner-facing projection of the record. The issue
    /// stamp keeps second resolution so the digest over this text stays
    /// unique per ticket.
    pub fn render_text(&self) -> String {
        format!(
            "TRANSIT TICKET v{version}\n\
             ----------------\n\
             Name: {name}\n\
             Age: {age}\n\
             From: {start}\n\
             To: {end}\n\
             Fare: {fare}\n\
             Issued: {issued}\n\
             Serial: {serial:03}\n\
             ----------------",
            version = self.version,
            name = self.name,
            age = self.age,
            start = self.start,
            end = self.end,
            fare = self.fare,
            issued = self.issued_at.format("%d-%b-%Y %H:%M:%S"),
            serial = self.serial,
        )
    }

    /// Machine-readable projection of the record, for audit tooling.
    ///
    /// Scanners read the text block; anything that wants the fields back
    /// without re-parsing free text uses this projection instead.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Uniqueness key for this payload: hex SHA-256 of the rendered text.
    ///
    /// The store enforces uniqueness of this value, so artifact identity
    /// never rests on wall-clock resolution alone.
    pub fn artifact_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.render_text().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Filename stem for the written artifact image.
    ///
    /// Pattern: `<name>_<start>_<end>_<YYYYMMDDHHMMSS>_<serial>`, each
    /// name component sanitized. The serial suffix keeps two same-named
    /// passengers from the same second apart on disk.
    pub fn file_stem(&self) -> String {
        format!(
            "{}_{}_{}_{}_{:02}",
            sanitize_component(&self.name),
            sanitize_component(&self.start),
            sanitize_component(&self.end),
            self.issued_at.format("%Y%m%d%H%M%S"),
            self.serial,
        )
    }
}

/// Replace every non-alphanumeric character with an underscore.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
