//! Packing board use-case service.
//!
//! # Responsibility
//! - Hold the equipment snapshot one board view renders from.
//! - Run a board move end to end: resolve, apply optimistically, persist,
//!   then confirm or roll back.
//!
//! # Invariants
//! - The store is the source of truth; after a failed write the snapshot is
//!   re-fetched, and restored to the pre-move copy if re-fetch also fails.
//! - No-op moves never reach the repository.

use crate::board::{
    project, reconcile_move_str, BoardColumns, BoardError, MoveResolution, StatusUpdate,
    ViewFilter,
};
use crate::model::equipment::{EquipmentItem, Traveler};
use crate::model::trip::TripId;
use crate::repo::equipment_repo::{EquipmentRepository, RepoError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors from board use-cases.
#[derive(Debug)]
pub enum BoardServiceError {
    /// Move could not be resolved, or the row vanished from the store.
    Board(BoardError),
    /// Store read/write failed.
    Persistence(RepoError),
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "board persistence failed: {err}"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Board(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<BoardError> for BoardServiceError {
    fn from(value: BoardError) -> Self {
        Self::Board(value)
    }
}

impl From<RepoError> for BoardServiceError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// Result of a confirmed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Slot was already in the target column; nothing was written.
    Unchanged,
    /// Store confirmed the write; `item` is the updated row.
    Moved {
        update: StatusUpdate,
        item: EquipmentItem,
    },
}

/// Board view state for one trip.
pub struct BoardService<R: EquipmentRepository> {
    repo: R,
    trip_id: TripId,
    items: Vec<EquipmentItem>,
}

impl<R: EquipmentRepository> BoardService<R> {
    /// Loads the trip snapshot.
    pub fn open(repo: R, trip_id: TripId) -> Result<Self, BoardServiceError> {
        let items = repo.list_equipment(trip_id)?;
        debug!(
            "event=board_open module=service status=ok trip={trip_id} rows={}",
            items.len()
        );
        Ok(Self {
            repo,
            trip_id,
            items,
        })
    }

    pub fn trip_id(&self) -> TripId {
        self.trip_id
    }

    /// Current snapshot, including unconfirmed optimistic changes.
    pub fn items(&self) -> &[EquipmentItem] {
        &self.items
    }

    /// Replaces the snapshot with the stored rows.
    pub fn refresh(&mut self) -> Result<(), BoardServiceError> {
        self.items = self.repo.list_equipment(self.trip_id)?;
        Ok(())
    }

    /// Renders the columns for one view.
    pub fn columns(&self, filter: ViewFilter, current_user: Option<Traveler>) -> BoardColumns {
        project(&self.items, filter, current_user)
    }

    /// Moves one slot to the `target` column.
    ///
    /// # Errors
    /// - `Board(InvalidTarget)` for unknown columns, before any write.
    /// - `Board(NotFound)` when the slot is stale, locally or in the store.
    /// - `Persistence` when the write fails; the snapshot is resynced.
    pub fn move_slot(
        &mut self,
        slot_id: &str,
        target: &str,
    ) -> Result<MoveOutcome, BoardServiceError> {
        let update = match reconcile_move_str(&self.items, slot_id, target)? {
            MoveResolution::NoOp => {
                debug!("event=board_move module=service status=noop slot={slot_id}");
                return Ok(MoveOutcome::Unchanged);
            }
            MoveResolution::Update(update) => update,
        };

        let started_at = Instant::now();
        let previous = self.items.clone();
        let patch = update.patch();
        if let Some(row) = self
            .items
            .iter_mut()
            .find(|row| row.id == update.equipment_id)
        {
            row.apply_patch(&patch);
        }

        match self.repo.update_equipment(update.equipment_id, &patch) {
            Ok(stored) => {
                if let Some(row) = self.items.iter_mut().find(|row| row.id == stored.id) {
                    *row = stored.clone();
                }
                info!(
                    "event=board_move module=service status=ok slot={} field={} from={} to={} duration_ms={}",
                    update.slot_id,
                    update.field.column(),
                    update.from,
                    update.to,
                    started_at.elapsed().as_millis()
                );
                Ok(MoveOutcome::Moved {
                    update,
                    item: stored,
                })
            }
            Err(err) => {
                error!(
                    "event=board_move module=service status=error slot={} duration_ms={} error={}",
                    update.slot_id,
                    started_at.elapsed().as_millis(),
                    err
                );
                self.resync(previous);
                Err(match err {
                    RepoError::NotFound(_) => {
                        BoardError::NotFound(update.slot_id.to_string()).into()
                    }
                    other => BoardServiceError::Persistence(other),
                })
            }
        }
    }

    fn resync(&mut self, previous: Vec<EquipmentItem>) {
        match self.repo.list_equipment(self.trip_id) {
            Ok(items) => self.items = items,
            Err(err) => {
                warn!(
                    "event=board_resync module=service status=error trip={} error={}",
                    self.trip_id, err
                );
                self.items = previous;
            }
        }
    }
}
