//! Row types mapping the ticketing schema to domain models.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{admins, stations, tickets};
use crate::core::{Station, Ticket};

#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = stations)]
pub struct StationRow {
    pub name: String,
    pub distance: i64,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Station {
            name: row.name,
            distance_km: row.distance,
        }
    }
}

#[derive(Debug, Queryable)]
pub struct TicketRow {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub start_station: String,
    pub end_station: String,
    pub fare: i64,
    pub issued_at: NaiveDateTime,
    pub artifact_id: String,
    pub used: bool,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            name: row.name,
            age: row.age,
            start_station: row.start_station,
            end_station: row.end_station,
            fare: row.fare,
            issued_at: row.issued_at,
            artifact_id: row.artifact_id,
            used: row.used,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tickets)]
pub struct NewTicketRow<'a> {
    pub name: &'a str,
    pub age: i64,
    pub start_station: &'a str,
    pub end_station: &'a str,
    pub fare: i64,
    pub issued_at: NaiveDateTime,
    pub artifact_id: &'a str,
    pub used: bool,
}

#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = admins)]
pub struct AdminRow {
    pub username: String,
    pub password_hash: String,
}
