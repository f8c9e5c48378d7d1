//! Domain models for stations, passengers, and issued tickets.
//!
//! These types carry no storage or presentation concerns. Tickets are
//! created once at issuance and never mutated afterwards; the `used` flag
//! is flipped by the gate-scan collaborator, which is outside this crate.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum accepted passenger name length, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Inclusive passenger age range accepted by the terminal.
pub const AGE_RANGE: std::ops::RangeInclusive<i64> = 0..=120;

/// A named station on the line, with its distance from the common origin.
///
/// Stations sit on a single line, so the distance between two stations is
/// the absolute difference of their `distance_km` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station name.
    pub name: String,
    /// Distance from the line origin in kilometres. Never negative.
    pub distance_km: i64,
}

impl Station {
    pub fn new(name: impl Into<String>, distance_km: i64) -> Self {
        Self {
            name: name.into(),
            distance_km,
        }
    }
}

/// Validation failure for a passenger request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("passenger name must be 1-{MAX_NAME_LEN} characters")]
    NameLength,
    #[error("passenger name contains invalid characters")]
    NameCharacters,
    #[error("age {0} is outside the accepted range 0-120")]
    AgeRange(i64),
}

/// One passenger in a purchase transaction.
///
/// The request is ephemeral: it exists only for the duration of one batch
/// and is never stored as-is. The calling layer is expected to validate
/// raw input before building a request; [`PassengerRequest::validate`]
/// re-checks the same rules so a misbehaving caller fails loudly instead
/// of issuing a garbage ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRequest {
    pub name: String,
    pub age: i64,
}

impl PassengerRequest {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Check name and age against the terminal's input rules.
    ///
    /// Names are 1-50 characters drawn from ASCII letters, spaces,
    /// hyphens, apostrophes, and periods. Ages must fall in 0-120.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticketing_core::core::PassengerRequest;
    ///
    /// assert!(PassengerRequest::new("Mary O'Brien-Smith Jr.", 34).validate().is_ok());
    /// assert!(PassengerRequest::new("x4", 34).validate().is_err());
    /// assert!(PassengerRequest::new("Mary", 121).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameLength);
        }
        let allowed = |c: char| {
            c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == '\'' || c == '.'
        };
        if !trimmed.chars().all(allowed) {
            return Err(ValidationError::NameCharacters);
        }
        if !AGE_RANGE.contains(&self.age) {
            return Err(ValidationError::AgeRange(self.age));
        }
        Ok(())
    }
}

/// A persisted ticket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub start_station: String,
    pub end_station: String,
    pub fare: i64,
    pub issued_at: NaiveDateTime,
    /// Uniqueness key derived from the artifact payload.
    pub artifact_id: String,
    /// Set by the gate-scan collaborator; always `false` at issuance.
    pub used: bool,
}

/// A ticket about to be persisted. The store assigns the row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub name: String,
    pub age: i64,
    pub start_station: String,
    pub end_station: String,
    pub fare: i64,
    pub issued_at: NaiveDateTime,
    pub artifact_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_punctuated_names() {
        for name in ["Asha", "Mary Jane", "O'Neil", "J. R. Hartley", "Smith-Jones"] {
            assert!(
                PassengerRequest::new(name, 30).validate().is_ok(),
                "{name} should be valid"
            );
        }
    }

    #[test]
    fn rejects_bad_names() {
        assert_eq!(
            PassengerRequest::new("", 30).validate(),
            Err(ValidationError::NameLength)
        );
        assert_eq!(
            PassengerRequest::new("   ", 30).validate(),
            Err(ValidationError::NameLength)
        );
        assert_eq!(
            PassengerRequest::new("a".repeat(51), 30).validate(),
            Err(ValidationError::NameLength)
        );
        assert_eq!(
            PassengerRequest::new("R2-D2", 30).validate(),
            Err(ValidationError::NameCharacters)
        );
        assert_eq!(
            PassengerRequest::new("Anna_Lee", 30).validate(),
            Err(ValidationError::NameCharacters)
        );
    }

    #[test]
    fn rejects_out_of_range_ages() {
        assert_eq!(
            PassengerRequest::new("Asha", -1).validate(),
            Err(ValidationError::AgeRange(-1))
        );
        assert_eq!(
            PassengerRequest::new("Asha", 121).validate(),
            Err(ValidationError::AgeRange(121))
        );
        assert!(PassengerRequest::new("Asha", 0).validate().is_ok());
        assert!(PassengerRequest::new("Asha", 120).validate().is_ok());
    }
}
