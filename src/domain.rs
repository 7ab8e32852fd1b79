//! Domain models for roadmap extraction.
//!
//! This module contains the project hierarchy, the derived positional
//! numbering used by renderers, and configuration.

/// The Project → Deliverable → `KeyTask` hierarchy.
pub mod project;
pub use project::{Deliverable, Entry, KeyTask, PrereqRef, Project, RefKind};

mod config;
pub use config::Config;

/// Positional codes derived from insertion order.
pub mod numbering;
pub use numbering::{numbered_tasks, NumberedTask, TaskCode};
