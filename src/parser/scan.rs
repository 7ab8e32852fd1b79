//! The single-pass scan driver.

use super::{
    bracket::Brackets,
    command::{self, Command, Located},
    context::ParseContext,
    Error,
};
use crate::domain::Project;

/// An iterator over the commands of a text, in document order.
///
/// Only positions holding a backslash are candidates. After a match the scan
/// resumes past the consumed span; otherwise it resumes one byte past the
/// backslash. Group boundaries come from a [`Brackets`] index built once per
/// text, so a failed candidate never rescans what follows it.
#[derive(Debug, Clone)]
pub struct Commands<'a> {
    brackets: Brackets<'a>,
    pos: usize,
}

impl<'a> Commands<'a> {
    /// Starts a scan at the beginning of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            brackets: Brackets::new(text),
            pos: 0,
        }
    }
}

impl Iterator for Commands<'_> {
    type Item = Located;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.brackets.text();
        while let Some(found) = text[self.pos..].find('\\') {
            let at = self.pos + found;
            if let Some(located) = command::recognize(&self.brackets, at) {
                self.pos = located.end;
                return Some(located);
            }
            self.pos = at + 1;
        }
        self.pos = text.len();
        None
    }
}

/// Parses one document into its projects.
///
/// Comment lines should already have been blanked out.
///
/// # Errors
///
/// Returns [`Error::NoOpenProject`] or [`Error::NoOpenDeliverable`] at the
/// first command with no parent to attach to. Nothing is returned for the
/// document in that case, since dropping the orphan would shift the derived
/// numbering of everything after it.
pub fn parse(text: &str) -> Result<Vec<Project>, Error> {
    let mut context = ParseContext::new();
    for located in Commands::new(text) {
        tracing::trace!(kind = %located.command.kind(), offset = located.start, "command");
        apply(&mut context, located)?;
    }
    let projects = context.finish();
    tracing::debug!(projects = projects.len(), "scan complete");
    Ok(projects)
}

fn apply(context: &mut ParseContext, located: Located) -> Result<(), Error> {
    let Located { command, start, .. } = located;
    match command {
        Command::Project(entry) => {
            context.open_project(entry);
            Ok(())
        }
        Command::Deliverable(entry) => context.open_deliverable(entry, start),
        Command::KeyTask(entry) => context.add_keytask(entry, start),
        Command::Prereq(raw) => context.add_prereqs(&raw, start),
    }
}
