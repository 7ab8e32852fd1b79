//! The per-document hierarchy builder.
//!
//! Roadmap sources have no closing markers: a project stays open until the
//! next `\keyproject`, a deliverable until the next `\deliverable` or
//! `\keyproject`. The open entities are therefore always the last project and,
//! when one has been opened since that project, its last deliverable.

use super::{prereq, CommandKind, Error};
use crate::domain::{Deliverable, Entry, Project};

/// Mutable state for the scan of exactly one document.
///
/// A context is created for a document, fed commands in source order, and
/// consumed by [`ParseContext::finish`]. It must never be reused for a second
/// document.
#[derive(Debug, Default)]
pub struct ParseContext {
    projects: Vec<Project>,
    deliverable_open: bool,
}

impl ParseContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new project and closes any open deliverable.
    pub fn open_project(&mut self, entry: Entry) {
        self.projects.push(Project::new(entry));
        self.deliverable_open = false;
    }

    /// Opens a new deliverable under the most recently opened project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenProject`] if no project has been opened yet.
    pub fn open_deliverable(&mut self, entry: Entry, offset: usize) -> Result<(), Error> {
        let project = self
            .projects
            .last_mut()
            .ok_or(Error::NoOpenProject { offset })?;
        project.deliverables.push(Deliverable::new(entry));
        self.deliverable_open = true;
        Ok(())
    }

    /// Appends a key task to the open deliverable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenDeliverable`] if no deliverable is open.
    pub fn add_keytask(&mut self, entry: Entry, offset: usize) -> Result<(), Error> {
        let deliverable = self.open_deliverable_mut(CommandKind::KeyTask, offset)?;
        deliverable.keytasks.push(entry.into());
        Ok(())
    }

    /// Resolves the raw content of a `\prereq` group against the open
    /// deliverable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenDeliverable`] if no deliverable is open, even
    /// when the list itself is empty.
    pub fn add_prereqs(&mut self, raw: &str, offset: usize) -> Result<(), Error> {
        let deliverable = self.open_deliverable_mut(CommandKind::Prereq, offset)?;
        deliverable.prereqs.extend(prereq::resolve(raw));
        Ok(())
    }

    /// The project currently open, if any.
    #[must_use]
    pub fn current_project(&self) -> Option<&Project> {
        self.projects.last()
    }

    /// The deliverable currently open, if any.
    #[must_use]
    pub fn current_deliverable(&self) -> Option<&Deliverable> {
        if !self.deliverable_open {
            return None;
        }
        self.projects.last()?.deliverables.last()
    }

    /// Consumes the context, returning the projects in source order.
    #[must_use]
    pub fn finish(self) -> Vec<Project> {
        self.projects
    }

    fn open_deliverable_mut(
        &mut self,
        command: CommandKind,
        offset: usize,
    ) -> Result<&mut Deliverable, Error> {
        let missing = Error::NoOpenDeliverable { command, offset };
        if !self.deliverable_open {
            return Err(missing);
        }
        self.projects
            .last_mut()
            .and_then(|project| project.deliverables.last_mut())
            .ok_or(missing)
    }
}
