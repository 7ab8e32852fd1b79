//! Parsed documents and the ordered set of them.

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{ser::SerializeMap, Serialize, Serializer};

use super::{source::document_name, LoadError, Source};
use crate::{
    domain::{numbered_tasks, NumberedTask, Project},
    parser,
};

/// The projects extracted from one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// The document name (the file stem of its reference).
    pub name: String,
    /// Projects in source order.
    pub projects: Vec<Project>,
}

impl Document {
    /// Parses comment-stripped text into a document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] with the line and column of the first
    /// command that has no parent to attach to.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, LoadError> {
        let name = name.into();
        match parser::parse(text) {
            Ok(projects) => Ok(Self { name, projects }),
            Err(source) => {
                let (line, column) = line_column(text, source.offset());
                Err(LoadError::Parse {
                    document: name,
                    line,
                    column,
                    source,
                })
            }
        }
    }

    /// The prefix used for derived codes: the document name, upper-cased.
    #[must_use]
    pub fn group(&self) -> String {
        self.name.to_uppercase()
    }

    /// Every key task with its position, in document order.
    pub fn numbered_tasks(&self) -> impl Iterator<Item = NumberedTask<'_>> {
        numbered_tasks(&self.projects)
    }
}

/// 1-based line and column (in characters) of a byte offset.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |n| n + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// An ordered collection of parsed documents.
///
/// Documents keep the order in which they were requested, so every rendering
/// of the same inputs is identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    documents: Vec<Document>,
}

impl DocumentSet {
    /// Reads and parses every referenced document.
    ///
    /// Documents are independent, so they are parsed in parallel. A failure
    /// in one document is collected and does not affect the others. Documents
    /// that contain no projects are left out of the set.
    pub fn load<S>(source: &S, references: &[String]) -> (Self, Vec<LoadError>)
    where
        S: Source + Sync,
    {
        let results: Vec<Result<Document, LoadError>> = references
            .par_iter()
            .map(|reference| {
                let text = source.read(reference)?;
                Document::parse(document_name(reference), &text)
            })
            .collect();

        let mut set = Self::default();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(document) if document.projects.is_empty() => {
                    tracing::info!("Skipping {}: no projects found", document.name);
                }
                Ok(document) => set.push(document),
                Err(error) => {
                    tracing::warn!("{error}");
                    errors.push(error);
                }
            }
        }
        (set, errors)
    }

    /// Appends a document.
    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Iterates over the documents in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Looks up a document by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == name)
    }

    /// The number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the set holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<'a> IntoIterator for &'a DocumentSet {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Document> for DocumentSet {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

/// Serializes as a map from document name to its projects.
impl Serialize for DocumentSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.documents.len()))?;
        for document in &self.documents {
            map.serialize_entry(&document.name, &document.projects)?;
        }
        map.end()
    }
}
