use std::fmt;

use serde::Serialize;

use crate::domain::{Deliverable, KeyTask, Project};

/// The positional code assigned to a key task, e.g. `INTRO1.2.3`.
///
/// This is distinct from the author-supplied `code` on each entity: it is
/// derived purely from insertion order, 1-based at every level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCode {
    /// The group prefix, usually the upper-cased document name.
    pub group: String,
    /// 1-based project position within the document.
    pub project: usize,
    /// 1-based deliverable position within the project.
    pub deliverable: usize,
    /// 1-based key task position within the deliverable.
    pub task: usize,
}

impl fmt::Display for TaskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            self.group, self.project, self.deliverable, self.task
        )
    }
}

/// A key task together with its derived code and its ancestors.
#[derive(Debug, Clone, Copy)]
pub struct NumberedTask<'a> {
    /// 1-based project position.
    pub project_index: usize,
    /// 1-based deliverable position.
    pub deliverable_index: usize,
    /// 1-based key task position.
    pub task_index: usize,
    /// The owning project.
    pub project: &'a Project,
    /// The owning deliverable.
    pub deliverable: &'a Deliverable,
    /// The key task itself.
    pub task: &'a KeyTask,
}

impl NumberedTask<'_> {
    /// Builds the positional code under the given group prefix.
    #[must_use]
    pub fn code(&self, group: &str) -> TaskCode {
        TaskCode {
            group: group.to_owned(),
            project: self.project_index,
            deliverable: self.deliverable_index,
            task: self.task_index,
        }
    }
}

/// Walks every key task in `projects` in document order with its position.
pub fn numbered_tasks(projects: &[Project]) -> impl Iterator<Item = NumberedTask<'_>> {
    projects.iter().zip(1..).flat_map(|(project, project_index)| {
        project
            .deliverables
            .iter()
            .zip(1..)
            .flat_map(move |(deliverable, deliverable_index)| {
                deliverable
                    .keytasks
                    .iter()
                    .zip(1..)
                    .map(move |(task, task_index)| NumberedTask {
                        project_index,
                        deliverable_index,
                        task_index,
                        project,
                        deliverable,
                        task,
                    })
            })
    })
}
