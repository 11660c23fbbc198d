//! Equipment row to board slot fan-out.
//!
//! # Invariants
//! - `both_individual` rows yield a Jonne slot immediately followed by a
//!   Frank slot; every other row yields exactly one slot.
//! - Output order follows input order; no row is dropped.
//! - `current_status` falls back to `ItemStatus::Backlog` when the
//!   authoritative field is unset.

use crate::model::equipment::{
    Assignment, EquipmentId, EquipmentItem, ItemStatus, StatusField, Traveler,
};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Length of a hyphenated UUID, the row part of every slot id.
const ROW_ID_LEN: usize = 36;

/// Synthetic identity of one board slot.
///
/// Rendered as `<row uuid>` for single slots and `<row uuid>-<traveler>`
/// for fan-out slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub equipment_id: EquipmentId,
    /// Set only for slots of `both_individual` rows.
    pub traveler: Option<Traveler>,
}

impl SlotId {
    pub fn single(equipment_id: EquipmentId) -> Self {
        Self {
            equipment_id,
            traveler: None,
        }
    }

    pub fn for_traveler(equipment_id: EquipmentId, traveler: Traveler) -> Self {
        Self {
            equipment_id,
            traveler: Some(traveler),
        }
    }

    /// Parses the rendered form. Returns `None` for anything malformed.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.len() < ROW_ID_LEN || !value.is_char_boundary(ROW_ID_LEN) {
            return None;
        }
        let (row, rest) = value.split_at(ROW_ID_LEN);
        let equipment_id = Uuid::parse_str(row).ok()?;
        if rest.is_empty() {
            return Some(Self::single(equipment_id));
        }
        let traveler = Traveler::parse(rest.strip_prefix('-')?)?;
        Some(Self::for_traveler(equipment_id, traveler))
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.traveler {
            Some(traveler) => write!(f, "{}-{}", self.equipment_id.hyphenated(), traveler),
            None => write!(f, "{}", self.equipment_id.hyphenated()),
        }
    }
}

impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whose card a slot is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOwner {
    Jonne,
    Frank,
    Shared,
}

impl ViewOwner {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jonne => "jonne",
            Self::Frank => "frank",
            Self::Shared => "shared",
        }
    }

    /// Returns whether this slot belongs to `traveler` personally.
    pub fn is_traveler(self, traveler: Traveler) -> bool {
        matches!(
            (self, traveler),
            (Self::Jonne, Traveler::Jonne) | (Self::Frank, Traveler::Frank)
        )
    }
}

impl From<Traveler> for ViewOwner {
    fn from(value: Traveler) -> Self {
        match value {
            Traveler::Jonne => Self::Jonne,
            Traveler::Frank => Self::Frank,
        }
    }
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardItem {
    pub slot_id: SlotId,
    pub view_owner: ViewOwner,
    pub current_status: ItemStatus,
    /// Source row snapshot, for card details.
    pub item: EquipmentItem,
}

impl BoardItem {
    /// The stored field a move of this slot writes to.
    pub fn status_field(&self) -> StatusField {
        match self.slot_id.traveler {
            Some(traveler) if self.item.assignment.is_per_traveler() => {
                StatusField::for_traveler(traveler)
            }
            _ => StatusField::General,
        }
    }
}

/// Projects rows into board slots, preserving input order.
pub fn project_board_items(items: &[EquipmentItem]) -> Vec<BoardItem> {
    let mut board_items = Vec::with_capacity(items.len());
    for item in items {
        match item.assignment {
            Assignment::BothIndividual => {
                for traveler in Traveler::ALL {
                    let field = StatusField::for_traveler(traveler);
                    board_items.push(BoardItem {
                        slot_id: SlotId::for_traveler(item.id, traveler),
                        view_owner: ViewOwner::from(traveler),
                        current_status: item.status(field).unwrap_or_default(),
                        item: item.clone(),
                    });
                }
            }
            single => {
                let view_owner = match single {
                    Assignment::Jonne => ViewOwner::Jonne,
                    Assignment::Frank => ViewOwner::Frank,
                    _ => ViewOwner::Shared,
                };
                board_items.push(BoardItem {
                    slot_id: SlotId::single(item.id),
                    view_owner,
                    current_status: item.general_status.unwrap_or_default(),
                    item: item.clone(),
                });
            }
        }
    }
    board_items
}
