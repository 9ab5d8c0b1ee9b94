//! Domain model for the project catalog and weekly task boards.
//!
//! # Responsibility
//! - Define canonical records shared by stores, services and statistics.
//! - Keep legacy seed shapes at the import boundary only.
//!
//! # Invariants
//! - Boards hold canonical `Task` records; bare strings never reach them.
//! - Column and week identifiers are typed; wire strings are parsed once.

pub mod board;
pub mod project;
pub mod task;
