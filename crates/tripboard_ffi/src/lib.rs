//! Flutter-facing bindings for the trip board core.

pub mod api;
