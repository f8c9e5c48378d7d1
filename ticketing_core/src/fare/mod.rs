//! Point-to-point fare computation.
//!
//! The calculator is a pure function over the station registry: it never
//! writes anything and is safe to call concurrently. Callers that only
//! need a price quote (no ticket issued) call [`quote`] directly.

pub mod calculator;

#[cfg(test)]
mod calculator_tests;

pub use calculator::{quote, FareError, FarePolicy};
