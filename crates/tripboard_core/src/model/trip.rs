//! Trip record owning equipment rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a trip.
pub type TripId = Uuid;

/// One planned trip. Equipment rows reference it by `TripId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub description: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}
