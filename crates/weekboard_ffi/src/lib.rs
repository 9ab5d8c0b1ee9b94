//! Flutter-facing bindings for `weekboard_core`.

pub mod api;
