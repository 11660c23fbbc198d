//! Trip repository contracts and SQLite implementation.

use crate::model::trip::{Trip, TripId};
use crate::repo::equipment_repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TRIP_SELECT_SQL: &str = "SELECT uuid, name, description, created_at FROM trips";

/// Repository interface for trips.
pub trait TripRepository {
    /// Creates one trip and returns the stored record.
    fn create_trip(&self, name: &str, description: Option<&str>) -> RepoResult<Trip>;
    fn get_trip(&self, id: TripId) -> RepoResult<Option<Trip>>;
    /// All trips, oldest first.
    fn list_trips(&self) -> RepoResult<Vec<Trip>>;
}

/// SQLite-backed trip repository.
pub struct SqliteTripRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTripRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TripRepository for SqliteTripRepository<'_> {
    fn create_trip(&self, name: &str, description: Option<&str>) -> RepoResult<Trip> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepoError::InvalidData(
                "trip name must not be blank".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO trips (uuid, name, description) VALUES (?1, ?2, ?3);",
            params![id.to_string(), name, description],
        )?;

        self.get_trip(id)?.ok_or(RepoError::NotFound(id))
    }

    fn get_trip(&self, id: TripId) -> RepoResult<Option<Trip>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRIP_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_trip_row(row)?));
        }
        Ok(None)
    }

    fn list_trips(&self) -> RepoResult<Vec<Trip>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRIP_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut trips = Vec::new();
        while let Some(row) = rows.next()? {
            trips.push(parse_trip_row(row)?);
        }
        Ok(trips)
    }
}

fn parse_trip_row(row: &Row<'_>) -> RepoResult<Trip> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Trip {
        id: parse_uuid(&uuid_text, "trips.uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
    })
}
