//! Fixed status columns of the packing board.
//!
//! # Invariants
//! - All six columns exist in `ItemStatus::ALL` order, even when empty.
//! - Every grouped item lands in exactly one column, chosen only by
//!   `current_status`.

use crate::board::projection::BoardItem;
use crate::model::equipment::ItemStatus;
use serde::Serialize;

/// One board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    pub status: ItemStatus,
    pub title: &'static str,
    pub items: Vec<BoardItem>,
}

impl BoardColumn {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// The full set of board columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumns {
    columns: Vec<BoardColumn>,
}

impl BoardColumns {
    /// Six empty columns.
    pub fn empty() -> Self {
        Self {
            columns: ItemStatus::ALL
                .into_iter()
                .map(|status| BoardColumn {
                    status,
                    title: column_title(status),
                    items: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn column(&self, status: ItemStatus) -> &BoardColumn {
        &self.columns[status.column_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoardColumn> {
        self.columns.iter()
    }

    /// `(status, count)` pairs in column order.
    pub fn counts(&self) -> Vec<(ItemStatus, usize)> {
        self.columns
            .iter()
            .map(|column| (column.status, column.count()))
            .collect()
    }

    /// Total number of visible items.
    pub fn total(&self) -> usize {
        self.columns.iter().map(BoardColumn::count).sum()
    }

    fn push(&mut self, item: BoardItem) {
        self.columns[item.current_status.column_index()]
            .items
            .push(item);
    }
}

impl IntoIterator for BoardColumns {
    type Item = BoardColumn;
    type IntoIter = std::vec::IntoIter<BoardColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

/// Partitions items by `current_status`, preserving order within a column.
pub fn group_into_columns(items: Vec<BoardItem>) -> BoardColumns {
    let mut columns = BoardColumns::empty();
    for item in items {
        columns.push(item);
    }
    columns
}

/// Display title shown above a column.
pub fn column_title(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Backlog => "Backlog",
        ItemStatus::ToBuy => "Noch besorgen",
        ItemStatus::ReadyToPack => "Bereit",
        ItemStatus::Packed => "Eingepackt",
        ItemStatus::Optional => "Optional",
        ItemStatus::NotNeeded => "Nicht benötigt",
    }
}
