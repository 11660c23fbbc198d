//! View filters applied after projection.

use crate::board::projection::{BoardItem, ViewOwner};
use crate::model::equipment::Traveler;
use serde::{Deserialize, Serialize};

/// Board view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewFilter {
    #[default]
    All,
    /// The current user's slots plus shared slots.
    Mine,
    Shared,
}

impl ViewFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mine => "mine",
            Self::Shared => "shared",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "mine" => Some(Self::Mine),
            "shared" => Some(Self::Shared),
            _ => None,
        }
    }

    /// Returns whether `item` is visible under this filter.
    ///
    /// `Mine` without a current user shows everything.
    pub fn matches(self, item: &BoardItem, current_user: Option<Traveler>) -> bool {
        match (self, current_user) {
            (Self::All, _) | (Self::Mine, None) => true,
            (Self::Mine, Some(user)) => {
                item.view_owner == ViewOwner::Shared || item.view_owner.is_traveler(user)
            }
            (Self::Shared, _) => item.view_owner == ViewOwner::Shared,
        }
    }
}

/// Keeps the visible items, preserving order.
pub fn filter_board_items(
    items: Vec<BoardItem>,
    filter: ViewFilter,
    current_user: Option<Traveler>,
) -> Vec<BoardItem> {
    items
        .into_iter()
        .filter(|item| filter.matches(item, current_user))
        .collect()
}
