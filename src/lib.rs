//! LaTeX Roadmap Extraction
//!
//! Roadmap chapters declare their plan with four commands:
//!
//! ```text
//! \keyproject[][P1]{2020}{Proj One}
//! \deliverable[][D1]{2021}{Deliv One}
//! \keytask[][T1]{2021}{Task One}
//! \prereq{\deliverableref{D0}}
//! ```
//!
//! [`parse`] rebuilds the Project → Deliverable → `KeyTask` hierarchy those
//! commands describe, and [`render`] turns a set of parsed documents into
//! tables and outlines.

pub mod domain;
pub use domain::{Config, Deliverable, KeyTask, PrereqRef, Project, RefKind, TaskCode};

pub mod parser;
pub use parser::{parse, Error as ParseError};

pub mod render;

/// Reading source documents and collecting their results.
pub mod storage;
pub use storage::{find_included, Document, DocumentSet, FsSource, LoadError, Source};
