//! The project hierarchy recovered from roadmap sources.
//!
//! A document yields an ordered list of [`Project`]s. Each project owns its
//! [`Deliverable`]s, and each deliverable owns its [`KeyTask`]s and the
//! [`PrereqRef`]s it declares. Children are kept in source order; that order
//! drives the derived numbering (see [`crate::domain::TaskCode`]).

use std::fmt;

use serde::Serialize;

/// The author-supplied fields shared by every entity command.
///
/// None of these are validated: dates and names are free text and the code is
/// whatever identifier the author wrote.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Entry {
    /// The raw identifier from the source (e.g. `TJP2-DC1-SW1`).
    pub code: String,
    /// The due date, as written.
    pub date: String,
    /// The human-readable name.
    pub name: String,
}

impl Entry {
    /// Creates an entry from its three payload fields.
    #[must_use]
    pub fn new(code: impl Into<String>, date: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            date: date.into(),
            name: name.into(),
        }
    }
}

/// A top-level project, introduced by `\keyproject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// The raw identifier from the source.
    pub code: String,
    /// The due date, as written.
    pub date: String,
    /// The human-readable name.
    pub name: String,
    /// Deliverables in source order.
    pub deliverables: Vec<Deliverable>,
}

impl Project {
    /// Creates a project with no deliverables.
    #[must_use]
    pub fn new(entry: Entry) -> Self {
        let Entry { code, date, name } = entry;
        Self {
            code,
            date,
            name,
            deliverables: Vec::new(),
        }
    }

    /// Iterates over every key task of every deliverable, in source order.
    pub fn keytasks(&self) -> impl Iterator<Item = &KeyTask> {
        self.deliverables.iter().flat_map(|d| d.keytasks.iter())
    }
}

/// A deliverable, introduced by `\deliverable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deliverable {
    /// The raw identifier from the source.
    pub code: String,
    /// The due date, as written.
    pub date: String,
    /// The human-readable name.
    pub name: String,
    /// Key tasks in source order.
    pub keytasks: Vec<KeyTask>,
    /// Prerequisites in the order they were declared.
    pub prereqs: Vec<PrereqRef>,
}

impl Deliverable {
    /// Creates a deliverable with no key tasks or prerequisites.
    #[must_use]
    pub fn new(entry: Entry) -> Self {
        let Entry { code, date, name } = entry;
        Self {
            code,
            date,
            name,
            keytasks: Vec::new(),
            prereqs: Vec::new(),
        }
    }
}

/// A key task, introduced by `\keytask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyTask {
    /// The raw identifier from the source.
    pub code: String,
    /// The due date, as written.
    pub date: String,
    /// The human-readable name.
    pub name: String,
}

impl From<Entry> for KeyTask {
    fn from(entry: Entry) -> Self {
        let Entry { code, date, name } = entry;
        Self { code, date, name }
    }
}

/// What a prerequisite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    /// A `\deliverableref` target.
    Deliverable,
    /// A `\keyprojectref` target.
    #[serde(rename = "keyproject")]
    Project,
}

impl RefKind {
    /// The source command that introduces references of this kind.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Deliverable => r"\deliverableref",
            Self::Project => r"\keyprojectref",
        }
    }
}

/// A typed cross-reference recorded against a deliverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrereqRef {
    /// The kind of entity referenced.
    pub kind: RefKind,
    /// The referenced entity's raw code.
    pub code: String,
}

impl PrereqRef {
    /// Creates a reference of the given kind.
    #[must_use]
    pub fn new(kind: RefKind, code: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
        }
    }
}

impl fmt::Display for PrereqRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RefKind::Deliverable => "deliverable",
            RefKind::Project => "keyproject",
        };
        write!(f, "{kind}:{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        let mut project = Project::new(Entry::new("P1", "2020", "Proj One"));
        let mut first = Deliverable::new(Entry::new("D1", "2021", "Deliv One"));
        first.keytasks.push(Entry::new("T1", "2021", "Task One").into());
        first.keytasks.push(Entry::new("T2", "2021", "Task Two").into());
        let mut second = Deliverable::new(Entry::new("D2", "2022", "Deliv Two"));
        second.keytasks.push(Entry::new("T3", "2022", "Task Three").into());
        project.deliverables.push(first);
        project.deliverables.push(second);
        project
    }

    #[test]
    fn keytasks_are_flattened_in_source_order() {
        let project = sample();
        let codes: Vec<_> = project.keytasks().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, ["T1", "T2", "T3"]);
    }

    #[test]
    fn prereq_display_matches_kind() {
        assert_eq!(
            PrereqRef::new(RefKind::Deliverable, "CI5").to_string(),
            "deliverable:CI5"
        );
        assert_eq!(
            PrereqRef::new(RefKind::Project, "TJP2").to_string(),
            "keyproject:TJP2"
        );
    }

    #[test]
    fn serializes_ref_kind_by_command_name() {
        let json = serde_json::to_string(&PrereqRef::new(RefKind::Project, "C")).unwrap();
        assert_eq!(json, r#"{"kind":"keyproject","code":"C"}"#);
    }
}
