//! Equipment maintenance use-cases (item editor flows).
//!
//! # Invariants
//! - Names are trimmed; blank optional text is stored as NULL.
//! - New rows start with every status unset, so they render in `backlog`.
//! - Changing `assignment` never rewrites status fields.

use crate::model::equipment::{Assignment, EquipmentId, EquipmentItem, EquipmentPatch, SourceType};
use crate::model::trip::TripId;
use crate::repo::equipment_repo::{EquipmentRepository, RepoError, RepoResult};

/// Request model for adding one item to a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEquipment {
    pub trip_id: TripId,
    pub name: String,
    pub assignment: Assignment,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub source_type: Option<SourceType>,
    pub source_url: Option<String>,
}

impl NewEquipment {
    pub fn new(trip_id: TripId, name: impl Into<String>, assignment: Assignment) -> Self {
        Self {
            trip_id,
            name: name.into(),
            assignment,
            category: None,
            notes: None,
            source_type: None,
            source_url: None,
        }
    }
}

/// Equipment service facade over repository implementations.
pub struct EquipmentService<R: EquipmentRepository> {
    repo: R,
}

impl<R: EquipmentRepository> EquipmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one row and returns the stored record.
    pub fn create_item(&self, request: NewEquipment) -> RepoResult<EquipmentItem> {
        let mut item = EquipmentItem::new(request.trip_id, request.name.trim(), request.assignment);
        item.category = normalize_text(request.category);
        item.notes = normalize_text(request.notes);
        item.source_type = request.source_type;
        item.source_url = normalize_text(request.source_url);

        let id = self.repo.create_equipment(&item)?;
        self.repo.get_equipment(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Applies an editor patch, normalizing optional text.
    pub fn edit_item(&self, id: EquipmentId, patch: EquipmentPatch) -> RepoResult<EquipmentItem> {
        let patch = EquipmentPatch {
            name: patch.name.map(|name| name.trim().to_string()),
            category: patch.category.map(normalize_text),
            notes: patch.notes.map(normalize_text),
            source_url: patch.source_url.map(normalize_text),
            ..patch
        };
        self.repo.update_equipment(id, &patch)
    }

    pub fn delete_item(&self, id: EquipmentId) -> RepoResult<()> {
        self.repo.delete_equipment(id)
    }

    pub fn list_items(&self, trip_id: TripId) -> RepoResult<Vec<EquipmentItem>> {
        self.repo.list_equipment(trip_id)
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
