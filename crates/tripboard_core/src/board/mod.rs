//! Packing board projection and reconciliation.
//!
//! # Responsibility
//! - Fan stored equipment rows out into per-owner board slots.
//! - Filter and group slots into the fixed status columns.
//! - Resolve board moves back into single-field equipment patches.
//!
//! # Invariants
//! - Everything here is pure and synchronous over an in-memory snapshot.
//! - Board items are never persisted; they are recomputed on every pass.
//! - A move touches exactly one stored status field of exactly one row.

pub mod columns;
pub mod filter;
pub mod projection;
pub mod reconcile;

use crate::model::equipment::{EquipmentItem, Traveler};

pub use columns::{group_into_columns, BoardColumn, BoardColumns};
pub use filter::{filter_board_items, ViewFilter};
pub use projection::{project_board_items, BoardItem, SlotId, ViewOwner};
pub use reconcile::{
    reconcile_move, reconcile_move_str, BoardError, MoveResolution, StatusUpdate,
};

/// Single render entry point: project, filter, then group into columns.
pub fn project(
    items: &[EquipmentItem],
    filter: ViewFilter,
    current_user: Option<Traveler>,
) -> BoardColumns {
    let board_items = project_board_items(items);
    group_into_columns(filter_board_items(board_items, filter, current_user))
}
