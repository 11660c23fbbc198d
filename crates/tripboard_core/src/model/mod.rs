//! Domain model for trip packing boards.
//!
//! # Responsibility
//! - Define canonical persisted records (`Trip`, `EquipmentItem`).
//! - Define the fixed status and ownership vocabularies shared by board
//!   projection, reconciliation and storage.
//!
//! # Invariants
//! - Every persisted record is identified by a stable UUID.
//! - Status columns are a closed, ordered set; `backlog` is the default.

pub mod equipment;
pub mod trip;
