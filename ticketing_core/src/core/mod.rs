//! Core domain models for the ticketing terminal.

pub mod domain;

pub use domain::{NewTicket, PassengerRequest, Station, Ticket, ValidationError};
