//! Recognition of the four roadmap commands.
//!
//! ```text
//! \keyproject[ANY][code]{date}{name}
//! \deliverable[ANY][code]{date}{name}
//! \keytask[ANY][code]{date}{name}
//! \prereq{\deliverableref{id1,id2} \keyprojectref{id3}}
//! ```
//!
//! The leading `[ANY]` group is reserved and its content discarded. It may be
//! omitted, in which case the single square group is the code.

use std::fmt;

use super::bracket::{self, Brackets, Delimiter, Group};
use crate::domain::Entry;

/// The four command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `\keyproject`
    Project,
    /// `\deliverable`
    Deliverable,
    /// `\keytask`
    KeyTask,
    /// `\prereq`
    Prereq,
}

impl CommandKind {
    /// Every kind, in recognition order.
    pub const ALL: [Self; 4] = [Self::Project, Self::Deliverable, Self::KeyTask, Self::Prereq];

    /// The literal token that introduces the command.
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Project => r"\keyproject",
            Self::Deliverable => r"\deliverable",
            Self::KeyTask => r"\keytask",
            Self::Prereq => r"\prereq",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// A recognized command and what it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `\keyproject` with its code, date and name.
    Project(Entry),
    /// `\deliverable` with its code, date and name.
    Deliverable(Entry),
    /// `\keytask` with its code, date and name.
    KeyTask(Entry),
    /// `\prereq` with the raw, unflattened content of its group.
    Prereq(String),
}

impl Command {
    /// Which command this is.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Project(_) => CommandKind::Project,
            Self::Deliverable(_) => CommandKind::Deliverable,
            Self::KeyTask(_) => CommandKind::KeyTask,
            Self::Prereq(_) => CommandKind::Prereq,
        }
    }
}

/// A command together with the bytes it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// The recognized command.
    pub command: Command,
    /// Byte offset of the leading backslash.
    pub start: usize,
    /// Byte offset immediately past the last consumed group.
    pub end: usize,
}

/// Tries to recognize a command starting at byte offset `at`.
///
/// Returns `None` when no command literal starts there, or when any required
/// group is missing or unbalanced. An unbalanced group never aborts the
/// caller's scan; the literal is simply treated as plain text.
///
/// Group contents are only copied out once every group has matched, so a
/// failed attempt costs nothing beyond the whitespace it skips.
#[must_use]
pub fn recognize(brackets: &Brackets<'_>, at: usize) -> Option<Located> {
    let rest = brackets.text().get(at..)?;
    let kind = CommandKind::ALL
        .into_iter()
        .find(|kind| starts_with_command(rest, kind.literal()))?;

    let mut cursor = Cursor {
        brackets,
        pos: at + kind.literal().len(),
    };
    let command = match kind {
        CommandKind::Prereq => {
            let group = cursor.group(Delimiter::Curly)?;
            Command::Prereq(group.inner(brackets.text()).to_owned())
        }
        CommandKind::Project => Command::Project(cursor.entry()?),
        CommandKind::Deliverable => Command::Deliverable(cursor.entry()?),
        CommandKind::KeyTask => Command::KeyTask(cursor.entry()?),
    };

    Some(Located {
        command,
        start: at,
        end: cursor.pos,
    })
}

/// A command literal only matches when it is not the prefix of a longer
/// control word, so `\deliverableref` is never read as `\deliverable`.
fn starts_with_command(rest: &str, literal: &str) -> bool {
    rest.strip_prefix(literal)
        .is_some_and(|after| !after.starts_with(|c: char| c.is_ascii_alphabetic()))
}

struct Cursor<'b, 'a> {
    brackets: &'b Brackets<'a>,
    pos: usize,
}

impl Cursor<'_, '_> {
    fn skip_whitespace(&mut self) {
        let rest = &self.brackets.text()[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self, delimiter: Delimiter) -> bool {
        self.skip_whitespace();
        self.brackets.text().as_bytes().get(self.pos) == Some(&delimiter.open())
    }

    fn group(&mut self, delimiter: Delimiter) -> Option<Group> {
        if !self.peek(delimiter) {
            return None;
        }
        match self.brackets.group(self.pos) {
            Ok(group) => {
                self.pos = group.end;
                Some(group)
            }
            Err(error) => {
                tracing::trace!("{error}");
                None
            }
        }
    }

    fn entry(&mut self) -> Option<Entry> {
        let first = self.group(Delimiter::Square)?;
        let code = if self.peek(Delimiter::Square) {
            self.group(Delimiter::Square)?
        } else {
            first
        };
        let date = self.group(Delimiter::Curly)?;
        let name = self.group(Delimiter::Curly)?;

        let text = self.brackets.text();
        let flat = |group: &Group| bracket::flatten(group.inner(text), group.delimiter);
        Some(Entry {
            code: flat(&code),
            date: flat(&date),
            name: flat(&name),
        })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn at(text: &str, offset: usize) -> Option<Located> {
        recognize(&Brackets::new(text), offset)
    }

    fn entry(text: &str) -> (CommandKind, Entry) {
        let located = at(text, 0).expect("should recognize a command");
        let kind = located.command.kind();
        match located.command {
            Command::Project(entry) | Command::Deliverable(entry) | Command::KeyTask(entry) => {
                (kind, entry)
            }
            Command::Prereq(_) => panic!("expected an entry command"),
        }
    }

    #[test]
    fn recognizes_full_form() {
        let (kind, entry) = entry(r"\keyproject[][P1]{2020}{Proj One}");
        assert_eq!(kind, CommandKind::Project);
        assert_eq!(entry, Entry::new("P1", "2020", "Proj One"));
    }

    #[test]
    fn reserved_group_content_is_ignored() {
        let (_, entry) = entry(r"\deliverable[whatever][D1]{2021}{Deliv One}");
        assert_eq!(entry.code, "D1");
    }

    #[test]
    fn reserved_group_is_optional() {
        let (kind, entry) = entry(r"\keytask[x]{c1}{n1}");
        assert_eq!(kind, CommandKind::KeyTask);
        assert_eq!(entry, Entry::new("x", "c1", "n1"));
    }

    #[test]
    fn whitespace_between_groups_is_allowed() {
        let (_, entry) = entry("\\keytask [] [T1]\n  {2021}\n  {Task\n   One}");
        assert_eq!(entry, Entry::new("T1", "2021", "Task One"));
    }

    #[test]
    fn nested_markup_is_flattened() {
        let (_, entry) = entry(r"\keytask[][T1]{2021}{Run \emph{all} the tests}");
        assert_eq!(entry.name, r"Run \emph all the tests");
    }

    #[test]
    fn end_points_past_last_group() {
        let text = r"\keytask[][T1]{2021}{Task} trailing";
        let located = at(text, 0).unwrap();
        assert_eq!(&text[located.end..], " trailing");
        assert_eq!(located.start, 0);
    }

    #[test]
    fn recognizes_at_offset() {
        let text = r"intro \keytask[T]{d}{n}";
        let located = at(text, 6).unwrap();
        assert_eq!(located.start, 6);
        assert_eq!(located.end, text.len());
    }

    #[test]
    fn prereq_content_is_raw() {
        let located = at(r"\prereq{\deliverableref{A,B} \keyprojectref{C}}", 0).unwrap();
        assert_eq!(located.command.kind(), CommandKind::Prereq);
        assert_eq!(
            located.command,
            Command::Prereq(r"\deliverableref{A,B} \keyprojectref{C}".to_owned())
        );
    }

    #[test_case(r"\deliverableref{D1}"; "reference command")]
    #[test_case(r"\keyprojectref{P1}"; "project reference command")]
    #[test_case(r"\keytasks[x]{a}{b}"; "longer control word")]
    #[test_case(r"\keytask{a}{b}"; "missing square group")]
    #[test_case(r"\keytask[x]{a}"; "missing name")]
    #[test_case(r"\keytask[a][b][c]{d}{e}"; "three square groups")]
    #[test_case(r"\keytask[x]{bad{"; "unterminated group")]
    #[test_case(r"\keytask[x{a}{b}"; "unterminated square group")]
    #[test_case(r"\prereq"; "prereq without group")]
    #[test_case(r"\prereq[A]"; "prereq with square group")]
    #[test_case("plain text"; "no command")]
    fn no_match(text: &str) {
        assert_eq!(at(text, 0), None);
    }

    #[test]
    fn out_of_range_offset_is_no_match() {
        assert_eq!(at("abc", 10), None);
    }

    #[test]
    fn kind_matches_variant() {
        let located = at(r"\deliverable[D]{d}{n}", 0).unwrap();
        assert_eq!(located.command.kind(), CommandKind::Deliverable);
        assert_eq!(
            located.command,
            Command::Deliverable(Entry::new("D", "d", "n"))
        );
    }
}
