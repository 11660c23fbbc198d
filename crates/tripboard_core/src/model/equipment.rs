//! Equipment domain model.
//!
//! # Responsibility
//! - Define the persisted packing row with its dual-ownership status fields.
//! - Provide partial-update (`EquipmentPatch`) semantics shared by storage
//!   and optimistic local updates.
//!
//! # Invariants
//! - `id` is stable and never reused for another row.
//! - `name` is non-blank after trim.
//! - Exactly one status "slot shape" is live per row, decided by
//!   `assignment`: `both_individual` uses `jonne_status` + `frank_status`,
//!   every other assignment uses `general_status`. Unused fields are kept
//!   as stored and never cleared by core.

use crate::model::trip::TripId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for one equipment row.
pub type EquipmentId = Uuid;

/// One of the two travellers sharing a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traveler {
    Jonne,
    Frank,
}

impl Traveler {
    pub const ALL: [Traveler; 2] = [Traveler::Jonne, Traveler::Frank];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jonne => "jonne",
            Self::Frank => "frank",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "jonne" => Some(Self::Jonne),
            "frank" => Some(Self::Frank),
            _ => None,
        }
    }
}

impl Display for Traveler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ownership mode of an equipment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignment {
    /// Owned and packed by Jonne alone.
    Jonne,
    /// Owned and packed by Frank alone.
    Frank,
    /// One item for both travellers, tracked once.
    Shared,
    /// Each traveller brings their own; statuses are tracked independently.
    BothIndividual,
}

impl Assignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jonne => "jonne",
            Self::Frank => "frank",
            Self::Shared => "shared",
            Self::BothIndividual => "both_individual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "jonne" => Some(Self::Jonne),
            "frank" => Some(Self::Frank),
            "shared" => Some(Self::Shared),
            "both_individual" => Some(Self::BothIndividual),
            _ => None,
        }
    }

    /// Returns whether rows with this assignment fan out into one slot per
    /// traveller.
    pub fn is_per_traveler(self) -> bool {
        matches!(self, Self::BothIndividual)
    }
}

/// Packing status. Declaration order is the board column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Backlog,
    ToBuy,
    ReadyToPack,
    Packed,
    Optional,
    NotNeeded,
}

impl ItemStatus {
    /// All statuses in board column order.
    pub const ALL: [ItemStatus; 6] = [
        ItemStatus::Backlog,
        ItemStatus::ToBuy,
        ItemStatus::ReadyToPack,
        ItemStatus::Packed,
        ItemStatus::Optional,
        ItemStatus::NotNeeded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::ToBuy => "to_buy",
            Self::ReadyToPack => "ready_to_pack",
            Self::Packed => "packed",
            Self::Optional => "optional",
            Self::NotNeeded => "not_needed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
    }

    /// Zero-based board column position.
    pub fn column_index(self) -> usize {
        self as usize
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Text that does not name one of the six board statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl Display for UnknownStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown item status `{}`", self.0)
    }
}

impl Error for UnknownStatus {}

/// Where an item is acquired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Shop,
    LocalStore,
    Borrow,
    Own,
    Other,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::LocalStore => "local_store",
            Self::Borrow => "borrow",
            Self::Own => "own",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "shop" => Some(Self::Shop),
            "local_store" => Some(Self::LocalStore),
            "borrow" => Some(Self::Borrow),
            "own" => Some(Self::Own),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// One of the three stored status columns of an equipment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    General,
    Jonne,
    Frank,
}

impl StatusField {
    /// Storage column name.
    pub fn column(self) -> &'static str {
        match self {
            Self::General => "general_status",
            Self::Jonne => "jonne_status",
            Self::Frank => "frank_status",
        }
    }

    /// Per-traveller status field.
    pub fn for_traveler(traveler: Traveler) -> Self {
        match traveler {
            Traveler::Jonne => Self::Jonne,
            Traveler::Frank => Self::Frank,
        }
    }
}

/// Model-level validation failures for equipment rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentValidationError {
    NilId,
    BlankName,
}

impl Display for EquipmentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "equipment id must not be nil"),
            Self::BlankName => write!(f, "equipment name must not be blank"),
        }
    }
}

impl Error for EquipmentValidationError {}

/// Persisted packing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: EquipmentId,
    pub trip_id: TripId,
    pub name: String,
    pub category: Option<String>,
    pub assignment: Assignment,
    /// Live only when `assignment` is not `both_individual`.
    pub general_status: Option<ItemStatus>,
    /// Live only when `assignment == both_individual`.
    pub jonne_status: Option<ItemStatus>,
    /// Live only when `assignment == both_individual`.
    pub frank_status: Option<ItemStatus>,
    pub notes: Option<String>,
    pub source_type: Option<SourceType>,
    pub source_url: Option<String>,
}

impl EquipmentItem {
    /// Creates a row with a generated id and every optional field unset.
    pub fn new(trip_id: TripId, name: impl Into<String>, assignment: Assignment) -> Self {
        Self::with_id(Uuid::new_v4(), trip_id, name, assignment)
    }

    /// Creates a row with a caller-provided id. Does not validate.
    pub fn with_id(
        id: EquipmentId,
        trip_id: TripId,
        name: impl Into<String>,
        assignment: Assignment,
    ) -> Self {
        Self {
            id,
            trip_id,
            name: name.into(),
            category: None,
            assignment,
            general_status: None,
            jonne_status: None,
            frank_status: None,
            notes: None,
            source_type: None,
            source_url: None,
        }
    }

    /// Checks model invariants before persistence.
    pub fn validate(&self) -> Result<(), EquipmentValidationError> {
        if self.id.is_nil() {
            return Err(EquipmentValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(EquipmentValidationError::BlankName);
        }
        Ok(())
    }

    /// Raw stored value of one status field.
    pub fn status(&self, field: StatusField) -> Option<ItemStatus> {
        match field {
            StatusField::General => self.general_status,
            StatusField::Jonne => self.jonne_status,
            StatusField::Frank => self.frank_status,
        }
    }

    /// Applies only the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: &EquipmentPatch) {
        if let Some(name) = patch.name.as_ref() {
            self.name = name.clone();
        }
        if let Some(category) = patch.category.as_ref() {
            self.category = category.clone();
        }
        if let Some(assignment) = patch.assignment {
            self.assignment = assignment;
        }
        if let Some(status) = patch.general_status {
            self.general_status = status;
        }
        if let Some(status) = patch.jonne_status {
            self.jonne_status = status;
        }
        if let Some(status) = patch.frank_status {
            self.frank_status = status;
        }
        if let Some(notes) = patch.notes.as_ref() {
            self.notes = notes.clone();
        }
        if let Some(source_type) = patch.source_type {
            self.source_type = source_type;
        }
        if let Some(source_url) = patch.source_url.as_ref() {
            self.source_url = source_url.clone();
        }
    }
}

/// Partial update for one equipment row.
///
/// Outer `None` means "leave unchanged"; for nullable columns the inner
/// `None` means "set to NULL".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentPatch {
    pub name: Option<String>,
    pub category: Option<Option<String>>,
    pub assignment: Option<Assignment>,
    pub general_status: Option<Option<ItemStatus>>,
    pub jonne_status: Option<Option<ItemStatus>>,
    pub frank_status: Option<Option<ItemStatus>>,
    pub notes: Option<Option<String>>,
    pub source_type: Option<Option<SourceType>>,
    pub source_url: Option<Option<String>>,
}

impl EquipmentPatch {
    /// Patch that sets exactly one status field.
    pub fn status(field: StatusField, value: ItemStatus) -> Self {
        let mut patch = Self::default();
        match field {
            StatusField::General => patch.general_status = Some(Some(value)),
            StatusField::Jonne => patch.jonne_status = Some(Some(value)),
            StatusField::Frank => patch.frank_status = Some(Some(value)),
        }
        patch
    }

    /// Returns whether no field is supplied.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
