//! Reading roadmap sources.
//!
//! The parser itself never touches the filesystem. A [`Source`] supplies the
//! comment-stripped text of a named document; [`FsSource`] is the
//! implementation backed by a directory of `.tex` files.

use std::{
    io,
    path::{Path, PathBuf},
};

use regex::Regex;

use super::LoadError;
use crate::domain::Config;

/// Supplies the text of documents by reference.
pub trait Source {
    /// Returns the comment-stripped text of the referenced document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or cannot be read.
    fn read(&self, reference: &str) -> Result<String, LoadError>;
}

/// Reads documents from files under a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    config: Config,
}

impl FsSource {
    /// Creates a source resolving references relative to `root`.
    #[must_use]
    pub const fn new(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// Resolves a reference to a file path.
    ///
    /// The configured extension is appended when the reference has none, so
    /// both `intro` and `intro.tex` name the same file.
    #[must_use]
    pub fn path_for(&self, reference: &str) -> PathBuf {
        let path = self.root.join(reference);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension(self.config.source_extension())
        }
    }
}

impl Source for FsSource {
    fn read(&self, reference: &str) -> Result<String, LoadError> {
        let path = self.path_for(reference);
        let text = std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.clone()),
            _ => LoadError::Io {
                path: path.clone(),
                source,
            },
        })?;
        tracing::debug!("Read {}", path.display());
        Ok(strip_comments(&text, self.config.comment_prefix()))
    }
}

/// The name of the document a reference points at: its file stem.
#[must_use]
pub fn document_name(reference: &str) -> String {
    Path::new(reference)
        .file_stem()
        .map_or_else(|| reference.to_owned(), |s| s.to_string_lossy().into_owned())
}

/// Blanks every line whose first non-whitespace characters are `prefix`.
///
/// Comment lines are emptied rather than removed so that line numbers in
/// diagnostics still match the file on disk.
#[must_use]
pub fn strip_comments(text: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return text.to_owned();
    }
    text.lines()
        .map(|line| {
            if line.trim_start().starts_with(prefix) {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds the documents included by a root document, in order of appearance.
///
/// # Errors
///
/// Returns an error if the configured include pattern is not a valid regular
/// expression.
pub fn find_included(text: &str, config: &Config) -> Result<Vec<String>, LoadError> {
    let include = Regex::new(config.include_pattern())?;
    Ok(include
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_owned())
        .collect())
}
