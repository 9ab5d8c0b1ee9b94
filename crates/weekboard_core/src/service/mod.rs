//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into form- and event-level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_service;
pub mod drag;
pub mod project_service;
