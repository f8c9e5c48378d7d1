//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the ticketing
//! repository traits suitable for unit testing and local development.
//! All data is stored in memory using HashMap and Vec structures,
//! providing fast, deterministic, and isolated execution.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::{NewTicket, Station, Ticket};
use crate::db::repository::{
    hash_password, AdminRepository, StationDirectory, StationRepository, StoreError, StoreResult,
    TicketRepository,
};

/// In-memory ticketing repository.
///
/// # Example
/// ```
/// use ticketing_core::core::Station;
/// use ticketing_core::db::{LocalRepository, StationRepository};
///
/// let repo = LocalRepository::new();
/// repo.add_station(&Station::new("Origin", 0)).unwrap();
/// assert_eq!(repo.list_stations().unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    stations: HashMap<String, i64>,
    tickets: Vec<Ticket>,
    admins: HashMap<String, String>,
    next_ticket_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            stations: HashMap::new(),
            tickets: Vec::new(),
            admins: HashMap::new(),
            next_ticket_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Simulate a storage outage for testing failure paths.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    /// Number of persisted tickets.
    pub fn ticket_count(&self) -> usize {
        self.data.read().unwrap().tickets.len()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, LocalData>> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(StoreError::StorageUnavailable(
                "simulated storage outage".to_string(),
            ));
        }
        Ok(data)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, LocalData>> {
        let data = self.data.write().unwrap();
        if !data.is_healthy {
            return Err(StoreError::StorageUnavailable(
                "simulated storage outage".to_string(),
            ));
        }
        Ok(data)
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl StationDirectory for LocalRepository {
    fn distance_km(&self, name: &str) -> StoreResult<Option<i64>> {
        Ok(self.read()?.stations.get(name).copied())
    }
}

impl StationRepository for LocalRepository {
    fn add_station(&self, station: &Station) -> StoreResult<()> {
        if station.distance_km < 0 {
            return Err(StoreError::Configuration(format!(
                "negative distance for station {}",
                station.name
            )));
        }
        let mut data = self.write()?;
        if data.stations.contains_key(&station.name) {
            return Err(StoreError::DuplicateStation(station.name.clone()));
        }
        data.stations
            .insert(station.name.clone(), station.distance_km);
        Ok(())
    }

    fn delete_station(&self, name: &str) -> StoreResult<()> {
        let mut data = self.write()?;
        if !data.stations.contains_key(name) {
            return Err(StoreError::NotFound(format!("station {name}")));
        }
        let referenced = data
            .tickets
            .iter()
            .any(|t| t.start_station == name || t.end_station == name);
        if referenced {
            return Err(StoreError::StationInUse(name.to_string()));
        }
        data.stations.remove(name);
        Ok(())
    }

    fn list_stations(&self) -> StoreResult<Vec<Station>> {
        let data = self.read()?;
        let mut stations: Vec<Station> = data
            .stations
            .iter()
            .map(|(name, km)| Station::new(name.clone(), *km))
            .collect();
        stations.sort_by(|a, b| {
            a.distance_km
                .cmp(&b.distance_km)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(stations)
    }
}

impl TicketRepository for LocalRepository {
    fn insert_ticket(&self, ticket: &NewTicket) -> StoreResult<Ticket> {
        let mut data = self.write()?;
        for station in [&ticket.start_station, &ticket.end_station] {
            if !data.stations.contains_key(station.as_str()) {
                return Err(StoreError::UnknownStation(station.clone()));
            }
        }
        if data
            .tickets
            .iter()
            .any(|t| t.artifact_id == ticket.artifact_id)
        {
            return Err(StoreError::DuplicateArtifact(ticket.artifact_id.clone()));
        }

        let id = data.next_ticket_id;
        data.next_ticket_id += 1;
        let stored = Ticket {
            id,
            name: ticket.name.clone(),
            age: ticket.age,
            start_station: ticket.start_station.clone(),
            end_station: ticket.end_station.clone(),
            fare: ticket.fare,
            issued_at: ticket.issued_at,
            artifact_id: ticket.artifact_id.clone(),
            used: false,
        };
        data.tickets.push(stored.clone());
        Ok(stored)
    }

    fn list_tickets(&self) -> StoreResult<Vec<Ticket>> {
        let data = self.read()?;
        let mut tickets = data.tickets.clone();
        tickets.sort_by(|a, b| {
            b.issued_at
                .cmp(&a.issued_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(tickets)
    }

    fn get_ticket(&self, id: i64) -> StoreResult<Ticket> {
        self.read()?
            .tickets
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("ticket {id}")))
    }
}

impl AdminRepository for LocalRepository {
    fn upsert_admin(&self, username: &str, password: &str) -> StoreResult<()> {
        self.write()?
            .admins
            .insert(username.to_string(), hash_password(password));
        Ok(())
    }

    fn verify_admin(&self, username: &str, password: &str) -> StoreResult<bool> {
        let data = self.read()?;
        Ok(data
            .admins
            .get(username)
            .is_some_and(|stored| *stored == hash_password(password)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ticket(name: &str, start: &str, end: &str, artifact_id: &str, day: u32) -> NewTicket {
        NewTicket {
            name: name.to_string(),
            age: 30,
            start_station: start.to_string(),
            end_station: end.to_string(),
            fare: 75,
            issued_at: NaiveDate::from_ymd_opt(2025, 3, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            artifact_id: artifact_id.to_string(),
        }
    }

    fn seeded() -> LocalRepository {
        let repo = LocalRepository::new();
        repo.add_station(&Station::new("Origin", 0)).unwrap();
        repo.add_station(&Station::new("Midtown", 10)).unwrap();
        repo.add_station(&Station::new("Edge", 25)).unwrap();
        repo
    }

    #[test]
    fn stations_are_listed_by_distance() {
        let repo = seeded();
        let names: Vec<String> = repo
            .list_stations()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Origin", "Midtown", "Edge"]);
    }

    #[test]
    fn duplicate_station_is_rejected() {
        let repo = seeded();
        assert_eq!(
            repo.add_station(&Station::new("Edge", 30)),
            Err(StoreError::DuplicateStation("Edge".to_string()))
        );
    }

    #[test]
    fn deleting_a_referenced_station_fails() {
        let repo = seeded();
        repo.insert_ticket(&ticket("Asha", "Origin", "Edge", "a1", 1))
            .unwrap();

        assert_eq!(
            repo.delete_station("Edge"),
            Err(StoreError::StationInUse("Edge".to_string()))
        );
        // Still listed.
        assert!(repo.exists("Edge").unwrap());
    }

    #[test]
    fn deleting_an_unreferenced_station_succeeds() {
        let repo = seeded();
        repo.delete_station("Midtown").unwrap();

        assert!(!repo.exists("Midtown").unwrap());
        assert_eq!(
            repo.delete_station("Midtown"),
            Err(StoreError::NotFound("station Midtown".to_string()))
        );
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let repo = seeded();
        let first = repo
            .insert_ticket(&ticket("Asha", "Origin", "Edge", "a1", 1))
            .unwrap();
        let second = repo
            .insert_ticket(&ticket("Ravi", "Origin", "Edge", "a2", 1))
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.used);
    }

    #[test]
    fn duplicate_artifact_leaves_the_store_unchanged() {
        let repo = seeded();
        repo.insert_ticket(&ticket("Asha", "Origin", "Edge", "a1", 1))
            .unwrap();

        let result = repo.insert_ticket(&ticket("Ravi", "Origin", "Edge", "a1", 2));
        assert_eq!(
            result,
            Err(StoreError::DuplicateArtifact("a1".to_string()))
        );
        assert_eq!(repo.ticket_count(), 1);
    }

    #[test]
    fn unknown_station_is_rejected_at_insert() {
        let repo = seeded();
        let result = repo.insert_ticket(&ticket("Asha", "Origin", "Nowhere", "a1", 1));
        assert_eq!(
            result,
            Err(StoreError::UnknownStation("Nowhere".to_string()))
        );
        assert_eq!(repo.ticket_count(), 0);
    }

    #[test]
    fn tickets_are_listed_most_recent_first() {
        let repo = seeded();
        repo.insert_ticket(&ticket("Early", "Origin", "Edge", "a1", 1))
            .unwrap();
        repo.insert_ticket(&ticket("Late", "Origin", "Edge", "a2", 9))
            .unwrap();
        repo.insert_ticket(&ticket("Middle", "Origin", "Edge", "a3", 5))
            .unwrap();

        let names: Vec<String> = repo
            .list_tickets()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Late", "Middle", "Early"]);
    }

    #[test]
    fn get_ticket_round_trips() {
        let repo = seeded();
        let stored = repo
            .insert_ticket(&ticket("Asha", "Origin", "Edge", "a1", 1))
            .unwrap();

        assert_eq!(repo.get_ticket(stored.id).unwrap(), stored);
        assert_eq!(
            repo.get_ticket(999),
            Err(StoreError::NotFound("ticket 999".to_string()))
        );
    }

    #[test]
    fn admin_credentials_verify_by_hash() {
        let repo = seeded();
        repo.upsert_admin("admin", "admin123").unwrap();

        assert!(repo.verify_admin("admin", "admin123").unwrap());
        assert!(!repo.verify_admin("admin", "wrong").unwrap());
        assert!(!repo.verify_admin("ghost", "admin123").unwrap());
    }

    #[test]
    fn outage_surfaces_as_storage_unavailable() {
        let repo = seeded();
        repo.set_healthy(false);

        assert!(matches!(
            repo.list_stations(),
            Err(StoreError::StorageUnavailable(_))
        ));
        assert!(matches!(
            repo.insert_ticket(&ticket("Asha", "Origin", "Edge", "a1", 1)),
            Err(StoreError::StorageUnavailable(_))
        ));

        repo.set_healthy(true);
        assert!(repo.list_stations().is_ok());
    }
}
