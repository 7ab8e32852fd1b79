//! Extraction of the project hierarchy from roadmap markup.
//!
//! The parser pairs up the document's brackets once, then makes one
//! left-to-right pass over it. Each backslash is a candidate command
//! position; [`command::recognize`] decides whether one of the four commands
//! starts there, and the match is applied to a per-document [`ParseContext`]
//! that tracks the open project and deliverable.

/// Balanced `[...]` and `{...}` groups.
pub mod bracket;
/// Recognition of the four commands.
pub mod command;
mod context;
/// Resolution of `\prereq` reference lists.
pub mod prereq;
mod scan;

pub use bracket::{BracketError, Brackets, Delimiter, Group};
pub use command::{Command, CommandKind, Located};
pub use context::ParseContext;
pub use scan::{parse, Commands};

/// Structural authoring errors that abort the parse of a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A `\deliverable` appeared before any `\keyproject`.
    #[error("\\deliverable at byte {offset} has no preceding \\keyproject")]
    NoOpenProject {
        /// Byte offset of the offending command.
        offset: usize,
    },
    /// A `\keytask` or `\prereq` appeared with no open deliverable.
    #[error("{command} at byte {offset} has no preceding \\deliverable in the current project")]
    NoOpenDeliverable {
        /// The offending command.
        command: CommandKind,
        /// Byte offset of the offending command.
        offset: usize,
    },
}

impl Error {
    /// Byte offset of the command that caused the error.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::NoOpenProject { offset } | Self::NoOpenDeliverable { offset, .. } => *offset,
        }
    }
}
