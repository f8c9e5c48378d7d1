//! Station registry traits.

use super::error::StoreResult;
use crate::core::Station;

/// Read-only view of the station registry consumed by the fare calculator.
///
/// Lookups go straight to the backing store so a quote always reflects the
/// registry as currently persisted. Implementations must not mutate any
/// state on lookup.
pub trait StationDirectory: Send + Sync {
    /// Distance of a station from the line origin, in kilometres.
    ///
    /// # Returns
    /// * `Ok(Some(km))` if the station exists
    /// * `Ok(None)` if no station has this name
    /// * `Err(StoreError)` if the lookup itself fails
    fn distance_km(&self, name: &str) -> StoreResult<Option<i64>>;

    /// Whether a station with this name exists in the registry.
    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.distance_km(name)?.is_some())
    }
}

/// Full station registry surface used by the admin collaborator.
pub trait StationRepository: StationDirectory {
    /// Add a station to the registry.
    ///
    /// # Errors
    /// * `StoreError::DuplicateStation` if the name is already registered
    /// * `StoreError::Configuration` if the distance is negative
    fn add_station(&self, station: &Station) -> StoreResult<()>;

    /// Remove a station from the registry.
    ///
    /// # Errors
    /// * `StoreError::StationInUse` if any ticket references the station
    /// * `StoreError::NotFound` if the station does not exist
    fn delete_station(&self, name: &str) -> StoreResult<()>;

    /// All stations, ordered by ascending distance from the origin.
    fn list_stations(&self) -> StoreResult<Vec<Station>>;
}
