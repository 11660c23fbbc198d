//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose board render/move and identity calls to Dart via FRB.
//! - Flatten core types into string envelopes the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens its own migrated connection; no connection is cached.
//! - The board view never outlives one call; the UI re-loads after a failed
//!   or stale move.

use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use tripboard_core::db::open_db;
use tripboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Assignment, BoardError, BoardItem, BoardService, BoardServiceError, EquipmentService,
    MoveOutcome, NewEquipment, SettingsRepository, SqliteEquipmentRepository,
    SqliteSettingsRepository, SqliteTripRepository, Traveler, TripId, TripRepository, ViewFilter,
};
use uuid::Uuid;

const BOARD_DB_FILE_NAME: &str = "tripboard.sqlite3";
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One card in a rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCardView {
    /// Drag identity; pass back unchanged to `board_move`.
    pub slot_id: String,
    pub equipment_id: String,
    pub name: String,
    pub category: Option<String>,
    /// `jonne|frank|shared`.
    pub view_owner: String,
    pub current_status: String,
    pub notes: Option<String>,
}

/// One rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumnView {
    pub status: String,
    pub title: String,
    pub cards: Vec<BoardCardView>,
}

/// Render envelope for `board_load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLoadResponse {
    pub ok: bool,
    /// Always six columns when `ok`; empty otherwise.
    pub columns: Vec<BoardColumnView>,
    pub message: String,
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    pub ok: bool,
    /// Id of the created or updated record.
    pub id: Option<String>,
    /// Set when the UI must re-load before retrying.
    pub stale: bool,
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            stale: false,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>, stale: bool) -> Self {
        Self {
            ok: false,
            id: None,
            stale,
            message: message.into(),
        }
    }
}

/// Renders the packing board of one trip.
///
/// Input semantics:
/// - `filter`: `all|mine|shared`.
/// - `current_user`: `jonne|frank`, or `None` when no identity is chosen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_load(
    trip_id: String,
    filter: String,
    current_user: Option<String>,
) -> BoardLoadResponse {
    let failure = |message: String| BoardLoadResponse {
        ok: false,
        columns: Vec::new(),
        message,
    };

    let trip_id = match parse_trip_id(&trip_id) {
        Ok(trip_id) => trip_id,
        Err(err) => return failure(err),
    };
    let Some(filter) = ViewFilter::parse(filter.trim()) else {
        return failure(format!("board_load failed: unknown filter `{filter}`"));
    };
    let current_user = match parse_user(current_user.as_deref()) {
        Ok(user) => user,
        Err(err) => return failure(err),
    };

    let result = with_connection(|conn| {
        let board = BoardService::open(SqliteEquipmentRepository::new(conn), trip_id)
            .map_err(|err| err.to_string())?;
        Ok(board.columns(filter, current_user))
    });

    match result {
        Ok(columns) => {
            let columns = columns
                .into_iter()
                .map(|column| BoardColumnView {
                    status: column.status.as_str().to_string(),
                    title: column.title.to_string(),
                    cards: column.items.into_iter().map(to_card_view).collect(),
                })
                .collect::<Vec<_>>();
            let total = columns.iter().map(|column| column.cards.len()).sum::<usize>();
            BoardLoadResponse {
                ok: true,
                columns,
                message: format!("{total} card(s)."),
            }
        }
        Err(err) => failure(format!("board_load failed: {err}")),
    }
}

/// Moves one card to a column.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `stale=true` means the card no longer exists; re-load the board.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_move(trip_id: String, slot_id: String, target_status: String) -> BoardActionResponse {
    let trip_id = match parse_trip_id(&trip_id) {
        Ok(trip_id) => trip_id,
        Err(err) => return BoardActionResponse::failure(err, false),
    };

    let result = with_connection(|conn| {
        let mut board = BoardService::open(SqliteEquipmentRepository::new(conn), trip_id)
            .map_err(|err| err.to_string())?;
        Ok(board.move_slot(slot_id.as_str(), target_status.as_str()))
    });

    match result {
        Ok(Ok(MoveOutcome::Unchanged)) => {
            BoardActionResponse::success("Already in that column.", None)
        }
        Ok(Ok(MoveOutcome::Moved { item, .. })) => {
            BoardActionResponse::success("Card moved.", Some(item.id.to_string()))
        }
        Ok(Err(BoardServiceError::Board(BoardError::NotFound(slot)))) => {
            warn!("event=ffi_board_move module=ffi status=stale slot={slot}");
            BoardActionResponse::failure(
                format!("board_move failed: card {slot} is gone; please refresh"),
                true,
            )
        }
        Ok(Err(err)) => BoardActionResponse::failure(format!("board_move failed: {err}"), false),
        Err(err) => BoardActionResponse::failure(format!("board_move failed: {err}"), false),
    }
}

/// Creates a trip and returns its id.
#[flutter_rust_bridge::frb(sync)]
pub fn trip_create(name: String, description: Option<String>) -> BoardActionResponse {
    let result = with_connection(|conn| {
        SqliteTripRepository::new(conn)
            .create_trip(name.as_str(), description.as_deref())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(trip) => BoardActionResponse::success("Trip created.", Some(trip.id.to_string())),
        Err(err) => BoardActionResponse::failure(format!("trip_create failed: {err}"), false),
    }
}

/// Adds one equipment row to a trip.
///
/// Input semantics:
/// - `assignment`: `jonne|frank|shared|both_individual`.
#[flutter_rust_bridge::frb(sync)]
pub fn equipment_create(
    trip_id: String,
    name: String,
    assignment: String,
    category: Option<String>,
) -> BoardActionResponse {
    let trip_id = match parse_trip_id(&trip_id) {
        Ok(trip_id) => trip_id,
        Err(err) => return BoardActionResponse::failure(err, false),
    };
    let Some(assignment) = Assignment::parse(assignment.trim()) else {
        return BoardActionResponse::failure(
            format!("equipment_create failed: unknown assignment `{assignment}`"),
            false,
        );
    };

    let mut request = NewEquipment::new(trip_id, name, assignment);
    request.category = category;
    let result = with_connection(|conn| {
        EquipmentService::new(SqliteEquipmentRepository::new(conn))
            .create_item(request)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(item) => BoardActionResponse::success("Item created.", Some(item.id.to_string())),
        Err(err) => BoardActionResponse::failure(format!("equipment_create failed: {err}"), false),
    }
}

/// Returns the persisted identity (`jonne|frank`) or `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn identity_get() -> Option<String> {
    with_connection(|conn| {
        SqliteSettingsRepository::new(conn)
            .current_user()
            .map_err(|err| err.to_string())
    })
    .ok()
    .flatten()
    .map(|user| user.as_str().to_string())
}

/// Persists the identity; `None` clears it.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn identity_set(user: Option<String>) -> String {
    let user = match parse_user(user.as_deref()) {
        Ok(user) => user,
        Err(err) => return err,
    };
    match with_connection(|conn| {
        SqliteSettingsRepository::new(conn)
            .set_current_user(user)
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => String::new(),
        Err(err) => format!("identity_set failed: {err}"),
    }
}

fn parse_trip_id(value: &str) -> Result<TripId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid trip id `{value}`"))
}

fn parse_user(value: Option<&str>) -> Result<Option<Traveler>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Traveler::parse(text)
            .map(Some)
            .ok_or_else(|| format!("unknown user `{text}`; expected jonne|frank")),
    }
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TRIPBOARD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(BOARD_DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let conn =
        open_db(resolve_board_db_path()).map_err(|err| format!("board DB open failed: {err}"))?;
    f(&conn)
}

fn to_card_view(slot: BoardItem) -> BoardCardView {
    BoardCardView {
        slot_id: slot.slot_id.to_string(),
        equipment_id: slot.item.id.to_string(),
        name: slot.item.name,
        category: slot.item.category,
        view_owner: slot.view_owner.as_str().to_string(),
        current_status: slot.current_status.as_str().to_string(),
        notes: slot.item.notes,
    }
}
