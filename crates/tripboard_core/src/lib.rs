//! Core domain logic for the shared trip packing board.
//! This crate is the single source of truth for board ownership invariants.

pub mod board;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use board::{
    filter_board_items, group_into_columns, project, project_board_items, reconcile_move,
    reconcile_move_str, BoardColumn, BoardColumns, BoardError, BoardItem, MoveResolution, SlotId,
    StatusUpdate, ViewFilter, ViewOwner,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::equipment::{
    Assignment, EquipmentId, EquipmentItem, EquipmentPatch, EquipmentValidationError, ItemStatus,
    SourceType, StatusField, Traveler, UnknownStatus,
};
pub use model::trip::{Trip, TripId};
pub use repo::equipment_repo::{
    EquipmentRepository, RepoError, RepoResult, SqliteEquipmentRepository,
};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::trip_repo::{SqliteTripRepository, TripRepository};
pub use service::board_service::{BoardService, BoardServiceError, MoveOutcome};
pub use service::equipment_service::{EquipmentService, NewEquipment};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
