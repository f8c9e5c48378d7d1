//! Fare calculation against the station registry.

use serde::{Deserialize, Serialize};

use crate::core::domain::AGE_RANGE;
use crate::db::repository::{StationDirectory, StoreError};

/// Fare policy constants.
///
/// These are policy, not geometry: the rate applied per kilometre and the
/// floor below which no paid fare falls. They are injected rather than
/// hardcoded so deployments (and tests) can vary them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarePolicy {
    /// Currency units charged per kilometre of route distance.
    pub per_km_rate: i64,
    /// Minimum fare for any paid ticket.
    pub minimum_fare: i64,
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self {
            per_km_rate: 3,
            minimum_fare: 5,
        }
    }
}

/// Error type for fare computation.
///
/// Route and age violations are caller bugs (the presentation layer
/// pre-validates input), but the calculator re-checks and fails rather
/// than silently computing garbage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FareError {
    /// Unknown or identical start/end stations.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// Age outside the accepted 0-120 range.
    #[error("age {0} is outside the accepted range 0-120")]
    InvalidAge(i64),

    /// The registry lookup itself failed.
    #[error("station registry lookup failed")]
    Registry(#[from] StoreError),
}

/// Compute the fare for one passenger on a route.
///
/// The route distance is the absolute difference of the two stations'
/// distances from the origin. The base fare is `distance * per_km_rate`,
/// floored at `minimum_fare`. Age bands apply after the floor and are
/// mutually exclusive, checked in order: age 5 and under travels free
/// (overrides the senior discount), age 60 and over pays half the fare
/// rounded down, everyone else pays full fare.
///
/// # Errors
/// * [`FareError::InvalidRoute`] if either station is unknown or the two
///   are identical
/// * [`FareError::InvalidAge`] if `age` is outside 0-120
/// * [`FareError::Registry`] if the registry lookup fails
///
/// # Examples
///
/// ```
/// use ticketing_core::core::Station;
/// use ticketing_core::db::{LocalRepository, StationRepository};
/// use ticketing_core::fare::{quote, FarePolicy};
///
/// let repo = LocalRepository::new();
/// repo.add_station(&Station::new("Origin", 0)).unwrap();
/// repo.add_station(&Station::new("Edge", 25)).unwrap();
///
/// let policy = FarePolicy::default();
/// assert_eq!(quote(&repo, &policy, "Origin", "Edge", 30).unwrap(), 75);
/// assert_eq!(quote(&repo, &policy, "Origin", "Edge", 65).unwrap(), 37);
/// ```
pub fn quote<D: StationDirectory + ?Sized>(
    directory: &D,
    policy: &FarePolicy,
    start: &str,
    end: &str,
    age: i64,
) -> Result<i64, FareError> {
    let start_km = directory
        .distance_km(start)?
        .ok_or_else(|| FareError::InvalidRoute(format!("unknown station: {start}")))?;
    let end_km = directory
        .distance_km(end)?
        .ok_or_else(|| FareError::InvalidRoute(format!("unknown station: {end}")))?;
    if start == end {
        return Err(FareError::InvalidRoute(
            "start and end stations are identical".to_string(),
        ));
    }
    if !AGE_RANGE.contains(&age) {
        return Err(FareError::InvalidAge(age));
    }

    let distance = (end_km - start_km).abs();
    let fare = (distance * policy.per_km_rate).max(policy.minimum_fare);

    if age <= 5 {
        Ok(0)
    } else if age >= 60 {
        Ok(fare / 2)
    } else {
        Ok(fare)
    }
}
