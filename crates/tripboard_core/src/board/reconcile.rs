//! Board move resolution.
//!
//! # Responsibility
//! - Turn "move slot X to column Y" into a single-field equipment patch.
//!
//! # Invariants
//! - Moving a slot to its current column resolves to `NoOp` (no write).
//! - `both_individual` slots only ever write their own traveller's field;
//!   every other slot only writes `general_status`.
//! - Unknown target columns are rejected, never coerced.

use crate::board::projection::{project_board_items, SlotId};
use crate::model::equipment::{
    EquipmentId, EquipmentItem, EquipmentPatch, ItemStatus, StatusField,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from resolving a board move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Slot is not part of the current snapshot (stale view).
    NotFound(String),
    /// Target column is not one of the six board statuses.
    InvalidTarget(String),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(slot) => {
                write!(f, "board slot not found: {slot}; view is stale, please refresh")
            }
            Self::InvalidTarget(target) => write!(f, "invalid target column: `{target}`"),
        }
    }
}

impl Error for BoardError {}

/// Write required by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub equipment_id: EquipmentId,
    pub slot_id: SlotId,
    pub field: StatusField,
    pub from: ItemStatus,
    pub to: ItemStatus,
}

impl StatusUpdate {
    /// Partial update carrying only the resolved field.
    pub fn patch(&self) -> EquipmentPatch {
        EquipmentPatch::status(self.field, self.to)
    }
}

/// Outcome of resolving a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResolution {
    NoOp,
    Update(StatusUpdate),
}

/// Resolves a move of `slot_id` to the `target` column.
///
/// # Errors
/// - `BoardError::NotFound` when the slot is absent from `items`.
pub fn reconcile_move(
    items: &[EquipmentItem],
    slot_id: &SlotId,
    target: ItemStatus,
) -> Result<MoveResolution, BoardError> {
    let board_item = project_board_items(items)
        .into_iter()
        .find(|candidate| candidate.slot_id == *slot_id)
        .ok_or_else(|| BoardError::NotFound(slot_id.to_string()))?;

    if board_item.current_status == target {
        return Ok(MoveResolution::NoOp);
    }

    Ok(MoveResolution::Update(StatusUpdate {
        equipment_id: board_item.item.id,
        slot_id: board_item.slot_id,
        field: board_item.status_field(),
        from: board_item.current_status,
        to: target,
    }))
}

/// String-level variant for callers holding wire values.
///
/// The target is validated first; a malformed slot id is reported as
/// `NotFound` since it cannot be part of any snapshot.
pub fn reconcile_move_str(
    items: &[EquipmentItem],
    slot_id: &str,
    target: &str,
) -> Result<MoveResolution, BoardError> {
    let target = ItemStatus::parse(target.trim())
        .ok_or_else(|| BoardError::InvalidTarget(target.to_string()))?;
    let slot = SlotId::parse(slot_id).ok_or_else(|| BoardError::NotFound(slot_id.to_string()))?;
    reconcile_move(items, &slot, target)
}
