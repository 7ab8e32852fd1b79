use std::{io, path::PathBuf};

/// Parsed documents and document sets.
pub mod document;
/// Reading and pre-processing of source files.
pub mod source;

pub use document::{Document, DocumentSet};
pub use source::{document_name, find_included, strip_comments, FsSource, Source};

use crate::parser;

/// Errors that can occur when loading a document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document file was not found.
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),
    /// An I/O error occurred while reading the document.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The document is structurally invalid.
    #[error("{document}:{line}:{column}: {source}")]
    Parse {
        /// The document name.
        document: String,
        /// 1-based line of the offending command.
        line: usize,
        /// 1-based column of the offending command.
        column: usize,
        /// What went wrong.
        source: parser::Error,
    },
    /// The configured include pattern is not a valid regular expression.
    #[error("invalid include pattern: {0}")]
    IncludePattern(#[from] regex::Error),
}
