//! SQLite repository implementation using Diesel.
//!
//! This module implements the ticketing repository traits against the
//! local SQLite store created by the migrations in `migrations/`. The
//! terminal is a single-writer process; connections are checked out of a
//! small r2d2 pool for the scope of each operation, so the handle is
//! released on every exit path.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, info};

mod models;
mod schema;

use models::{AdminRow, NewTicketRow, StationRow, TicketRow};
use schema::{admins, stations, tickets};

use crate::core::{NewTicket, Station, Ticket};
use crate::db::repository::{
    hash_password, AdminRepository, StationDirectory, StationRepository, StoreError, StoreResult,
    TicketRepository,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Connection settings for the SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteSettings {
    /// Path to the database file; created on first open.
    pub database_path: String,
    /// One connection is enough for the single-threaded terminal.
    pub max_pool_size: u32,
}

impl SqliteSettings {
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            max_pool_size: 1,
        }
    }
}

/// Referential integrity is per-connection in SQLite.
#[derive(Debug)]
struct ForeignKeySetup;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ForeignKeySetup {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Diesel-backed repository for SQLite.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open (or create) the store and run pending migrations.
    pub fn new(settings: SqliteSettings) -> StoreResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(&settings.database_path);
        let pool = Pool::builder()
            .max_size(settings.max_pool_size.max(1))
            .connection_customizer(Box::new(ForeignKeySetup))
            .build(manager)
            .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;

        {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| StoreError::Configuration(format!("migration error: {e}")))?;
        }

        info!("opened sqlite store at {}", settings.database_path);
        Ok(Self { pool })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;
        f(&mut conn)
    }
}

fn map_diesel_error(err: DieselError) -> StoreError {
    match err {
        DieselError::NotFound => StoreError::NotFound("record not found".to_string()),
        other => StoreError::StorageUnavailable(other.to_string()),
    }
}

fn station_exists(conn: &mut SqliteConnection, name: &str) -> StoreResult<bool> {
    let count: i64 = stations::table
        .filter(stations::name.eq(name))
        .count()
        .get_result(conn)
        .map_err(map_diesel_error)?;
    Ok(count > 0)
}

impl StationDirectory for SqliteRepository {
    fn distance_km(&self, name: &str) -> StoreResult<Option<i64>> {
        self.with_conn(|conn| {
            stations::table
                .filter(stations::name.eq(name))
                .select(stations::distance)
                .first::<i64>(conn)
                .optional()
                .map_err(map_diesel_error)
        })
    }
}

impl StationRepository for SqliteRepository {
    fn add_station(&self, station: &Station) -> StoreResult<()> {
        if station.distance_km < 0 {
            return Err(StoreError::Configuration(format!(
                "negative distance for station {}",
                station.name
            )));
        }
        self.with_conn(|conn| {
            let row = StationRow {
                name: station.name.clone(),
                distance: station.distance_km,
            };
            diesel::insert_into(stations::table)
                .values(&row)
                .execute(conn)
                .map_err(|e| match e {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateStation(station.name.clone())
                    }
                    other => map_diesel_error(other),
                })?;
            debug!(
                "registered station {} at {} km",
                station.name, station.distance_km
            );
            Ok(())
        })
    }

    fn delete_station(&self, name: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            if !station_exists(conn, name)? {
                return Err(StoreError::NotFound(format!("station {name}")));
            }
            let referenced: i64 = tickets::table
                .filter(
                    tickets::start_station
                        .eq(name)
                        .or(tickets::end_station.eq(name)),
                )
                .count()
                .get_result(conn)
                .map_err(map_diesel_error)?;
            if referenced > 0 {
                return Err(StoreError::StationInUse(name.to_string()));
            }
            diesel::delete(stations::table.filter(stations::name.eq(name)))
                .execute(conn)
                .map_err(|e| match e {
                    // Backstop; the reference count above normally catches this.
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        StoreError::StationInUse(name.to_string())
                    }
                    other => map_diesel_error(other),
                })?;
            debug!("removed station {name}");
            Ok(())
        })
    }

    fn list_stations(&self) -> StoreResult<Vec<Station>> {
        self.with_conn(|conn| {
            let rows = stations::table
                .order((stations::distance.asc(), stations::name.asc()))
                .load::<StationRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Station::from).collect())
        })
    }
}

impl TicketRepository for SqliteRepository {
    fn insert_ticket(&self, ticket: &NewTicket) -> StoreResult<Ticket> {
        self.with_conn(|conn| {
            for station in [&ticket.start_station, &ticket.end_station] {
                if !station_exists(conn, station)? {
                    return Err(StoreError::UnknownStation(station.clone()));
                }
            }

            let row = NewTicketRow {
                name: &ticket.name,
                age: ticket.age,
                start_station: &ticket.start_station,
                end_station: &ticket.end_station,
                fare: ticket.fare,
                issued_at: ticket.issued_at,
                artifact_id: &ticket.artifact_id,
                used: false,
            };
            diesel::insert_into(tickets::table)
                .values(&row)
                .execute(conn)
                .map_err(|e| match e {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateArtifact(ticket.artifact_id.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        StoreError::UnknownStation(format!(
                            "{} or {}",
                            ticket.start_station, ticket.end_station
                        ))
                    }
                    other => map_diesel_error(other),
                })?;

            // The artifact id is unique, so the fresh row can be read back by it.
            let stored = tickets::table
                .filter(tickets::artifact_id.eq(&ticket.artifact_id))
                .first::<TicketRow>(conn)
                .map_err(map_diesel_error)?;
            debug!("persisted ticket id={} for {}", stored.id, stored.name);
            Ok(Ticket::from(stored))
        })
    }

    fn list_tickets(&self) -> StoreResult<Vec<Ticket>> {
        self.with_conn(|conn| {
            let rows = tickets::table
                .order((tickets::issued_at.desc(), tickets::id.desc()))
                .load::<TicketRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Ticket::from).collect())
        })
    }

    fn get_ticket(&self, id: i64) -> StoreResult<Ticket> {
        self.with_conn(|conn| {
            tickets::table
                .find(id)
                .first::<TicketRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(Ticket::from)
                .ok_or_else(|| StoreError::NotFound(format!("ticket {id}")))
        })
    }
}

impl AdminRepository for SqliteRepository {
    fn upsert_admin(&self, username: &str, password: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            let row = AdminRow {
                username: username.to_string(),
                password_hash: hash_password(password),
            };
            diesel::replace_into(admins::table)
                .values(&row)
                .execute(conn)
                .map_err(map_diesel_error)?;
            Ok(())
        })
    }

    fn verify_admin(&self, username: &str, password: &str) -> StoreResult<bool> {
        self.with_conn(|conn| {
            let stored: Option<String> = admins::table
                .filter(admins::username.eq(username))
                .select(admins::password_hash)
                .first(conn)
                .optional()
                .map_err(map_diesel_error)?;
            Ok(stored.is_some_and(|hash| hash == hash_password(password)))
        })
    }
}
