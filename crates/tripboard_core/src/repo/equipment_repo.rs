//! Equipment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store and query equipment rows by trip.
//! - Apply partial updates that touch only supplied columns.
//!
//! # Invariants
//! - Write paths call `EquipmentItem::validate()` before SQL mutations.
//! - Read paths reject unknown enum text instead of masking it.
//! - `list_equipment` returns rows in insertion order.
//! - `update_equipment` is a single-row `UPDATE`; omitted fields are never
//!   written.

use crate::db::DbError;
use crate::model::equipment::{
    Assignment, EquipmentId, EquipmentItem, EquipmentPatch, EquipmentValidationError, ItemStatus,
    SourceType, StatusField,
};
use crate::model::trip::TripId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const EQUIPMENT_SELECT_SQL: &str = "SELECT
    uuid,
    trip_uuid,
    name,
    category,
    assignment,
    general_status,
    jonne_status,
    frank_status,
    notes,
    source_type,
    source_url
FROM equipment_items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for board persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(EquipmentValidationError),
    Db(DbError),
    /// Target row does not exist.
    NotFound(Uuid),
    InvalidData(String),
    /// Partial update supplied no field.
    EmptyPatch(EquipmentId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::EmptyPatch(id) => write!(f, "no fields to update for equipment {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::EmptyPatch(_) => None,
        }
    }
}

impl From<EquipmentValidationError> for RepoError {
    fn from(value: EquipmentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence collaborator for equipment rows.
pub trait EquipmentRepository {
    fn create_equipment(&self, item: &EquipmentItem) -> RepoResult<EquipmentId>;
    fn get_equipment(&self, id: EquipmentId) -> RepoResult<Option<EquipmentItem>>;
    /// All rows of one trip, in insertion order.
    fn list_equipment(&self, trip_id: TripId) -> RepoResult<Vec<EquipmentItem>>;
    /// Applies only the supplied fields and returns the full updated row.
    fn update_equipment(
        &self,
        id: EquipmentId,
        patch: &EquipmentPatch,
    ) -> RepoResult<EquipmentItem>;
    fn delete_equipment(&self, id: EquipmentId) -> RepoResult<()>;
}

/// SQLite-backed equipment repository.
pub struct SqliteEquipmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEquipmentRepository<'conn> {
    /// Wraps a migrated connection from `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EquipmentRepository for SqliteEquipmentRepository<'_> {
    fn create_equipment(&self, item: &EquipmentItem) -> RepoResult<EquipmentId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO equipment_items (
                uuid,
                trip_uuid,
                name,
                category,
                assignment,
                general_status,
                jonne_status,
                frank_status,
                notes,
                source_type,
                source_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                item.id.to_string(),
                item.trip_id.to_string(),
                item.name.as_str(),
                item.category.as_deref(),
                item.assignment.as_str(),
                item.general_status.map(ItemStatus::as_str),
                item.jonne_status.map(ItemStatus::as_str),
                item.frank_status.map(ItemStatus::as_str),
                item.notes.as_deref(),
                item.source_type.map(SourceType::as_str),
                item.source_url.as_deref(),
            ],
        )?;

        Ok(item.id)
    }

    fn get_equipment(&self, id: EquipmentId) -> RepoResult<Option<EquipmentItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EQUIPMENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_equipment_row(row)?));
        }
        Ok(None)
    }

    fn list_equipment(&self, trip_id: TripId) -> RepoResult<Vec<EquipmentItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EQUIPMENT_SELECT_SQL}
             WHERE trip_uuid = ?1
             ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([trip_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_equipment_row(row)?);
        }
        Ok(items)
    }

    fn update_equipment(
        &self,
        id: EquipmentId,
        patch: &EquipmentPatch,
    ) -> RepoResult<EquipmentItem> {
        if patch.is_empty() {
            return Err(RepoError::EmptyPatch(id));
        }
        if let Some(name) = patch.name.as_ref() {
            if name.trim().is_empty() {
                return Err(EquipmentValidationError::BlankName.into());
            }
        }

        let (assignments, mut bind_values) = patch_assignments(patch);
        let sql = format!(
            "UPDATE equipment_items
             SET {}, updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get_equipment(id)?.ok_or(RepoError::NotFound(id))
    }

    fn delete_equipment(&self, id: EquipmentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM equipment_items WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

/// Builds `column = ?` fragments and their bind values for supplied fields.
fn patch_assignments(patch: &EquipmentPatch) -> (Vec<&'static str>, Vec<Value>) {
    let mut assignments = Vec::new();
    let mut values = Vec::new();

    if let Some(name) = patch.name.as_ref() {
        assignments.push("name = ?");
        values.push(Value::Text(name.trim().to_string()));
    }
    if let Some(category) = patch.category.as_ref() {
        assignments.push("category = ?");
        values.push(optional_text(category.as_deref()));
    }
    if let Some(assignment) = patch.assignment {
        assignments.push("assignment = ?");
        values.push(Value::Text(assignment.as_str().to_string()));
    }
    for (field, status) in [
        (StatusField::General, patch.general_status),
        (StatusField::Jonne, patch.jonne_status),
        (StatusField::Frank, patch.frank_status),
    ] {
        if let Some(status) = status {
            assignments.push(match field {
                StatusField::General => "general_status = ?",
                StatusField::Jonne => "jonne_status = ?",
                StatusField::Frank => "frank_status = ?",
            });
            values.push(optional_text(status.map(ItemStatus::as_str)));
        }
    }
    if let Some(notes) = patch.notes.as_ref() {
        assignments.push("notes = ?");
        values.push(optional_text(notes.as_deref()));
    }
    if let Some(source_type) = patch.source_type {
        assignments.push("source_type = ?");
        values.push(optional_text(source_type.map(SourceType::as_str)));
    }
    if let Some(source_url) = patch.source_url.as_ref() {
        assignments.push("source_url = ?");
        values.push(optional_text(source_url.as_deref()));
    }

    (assignments, values)
}

fn optional_text(value: Option<&str>) -> Value {
    match value {
        Some(text) => Value::Text(text.to_string()),
        None => Value::Null,
    }
}

fn parse_equipment_row(row: &Row<'_>) -> RepoResult<EquipmentItem> {
    let id = parse_uuid(row.get::<_, String>("uuid")?.as_str(), "equipment_items.uuid")?;
    let trip_id = parse_uuid(
        row.get::<_, String>("trip_uuid")?.as_str(),
        "equipment_items.trip_uuid",
    )?;

    let assignment_text: String = row.get("assignment")?;
    let assignment = Assignment::parse(&assignment_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid assignment `{assignment_text}` in equipment_items.assignment"
        ))
    })?;

    let source_type = match row.get::<_, Option<String>>("source_type")? {
        Some(value) => Some(SourceType::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid source type `{value}` in equipment_items.source_type"
            ))
        })?),
        None => None,
    };

    let item = EquipmentItem {
        id,
        trip_id,
        name: row.get("name")?,
        category: row.get("category")?,
        assignment,
        general_status: parse_status_column(row, StatusField::General)?,
        jonne_status: parse_status_column(row, StatusField::Jonne)?,
        frank_status: parse_status_column(row, StatusField::Frank)?,
        notes: row.get("notes")?,
        source_type,
        source_url: row.get("source_url")?,
    };
    item.validate()?;
    Ok(item)
}

fn parse_status_column(row: &Row<'_>, field: StatusField) -> RepoResult<Option<ItemStatus>> {
    let column = field.column();
    match row.get::<_, Option<String>>(column)? {
        Some(value) => ItemStatus::parse(&value).map(Some).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid status `{value}` in equipment_items.{column}"
            ))
        }),
        None => Ok(None),
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
