//! Store layer: session-owned project catalog and board snapshots.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep storage details behind traits so services stay storage-agnostic.
//!
//! # Invariants
//! - Catalog writes validate names before mutating.
//! - Board operations are total: stale ids are no-ops, unknown boards are empty.

pub mod board_repo;
pub mod catalog_repo;
