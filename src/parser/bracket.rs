//! Balanced bracket groups.
//!
//! Only same-kind nesting is counted: inside a `{...}` group, square brackets
//! are ordinary characters, and vice versa. Delimiters are ASCII, so matching
//! works on bytes without ever splitting a UTF-8 sequence.
//!
//! [`Brackets`] pairs every opener with its closer in a single pass up front,
//! so asking for the group at an offset never rescans the text. A document
//! with many unterminated groups still costs one pass in total.

use std::{collections::HashMap, fmt, ops::Range};

/// The two delimiter pairs the roadmap markup uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `[...]`
    Square,
    /// `{...}`
    Curly,
}

impl Delimiter {
    /// The opening byte.
    #[must_use]
    pub const fn open(self) -> u8 {
        match self {
            Self::Square => b'[',
            Self::Curly => b'{',
        }
    }

    /// The closing byte.
    #[must_use]
    pub const fn close(self) -> u8 {
        match self {
            Self::Square => b']',
            Self::Curly => b'}',
        }
    }

    /// Returns the delimiter opened by `byte`, if any.
    #[must_use]
    pub const fn from_open(byte: u8) -> Option<Self> {
        match byte {
            b'[' => Some(Self::Square),
            b'{' => Some(Self::Curly),
            _ => None,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.open() as char, self.close() as char)
    }
}

/// A matched group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Which pair delimits the group.
    pub delimiter: Delimiter,
    /// Byte range of the content between the delimiters.
    pub inner: Range<usize>,
    /// Byte offset immediately past the closing delimiter.
    pub end: usize,
}

impl Group {
    /// The raw text between the delimiters.
    #[must_use]
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.inner.clone()]
    }
}

/// Errors from [`Brackets::group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BracketError {
    /// The byte at the given offset does not open a group.
    #[error("no opening delimiter at byte {0}")]
    NotAnOpener(usize),
    /// The group is never closed before the end of input.
    #[error("unbalanced delimiter: {delimiter} group opened at byte {open} is never closed")]
    UnbalancedDelimiter {
        /// The kind of group that was opened.
        delimiter: Delimiter,
        /// Offset of the opening delimiter.
        open: usize,
    },
}

/// The matching closer of every balanced group in a text.
#[derive(Debug, Clone)]
pub struct Brackets<'a> {
    text: &'a str,
    closers: HashMap<usize, usize>,
}

impl<'a> Brackets<'a> {
    /// Pairs up the delimiters of `text`.
    ///
    /// Each kind keeps its own stack of open offsets. A closer pops the most
    /// recent opener of its kind, which is the same closer a depth counter
    /// started at that opener would stop on. Stray closers are ignored and
    /// openers still on a stack at the end are unbalanced.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut closers = HashMap::new();
        let mut square = Vec::new();
        let mut curly = Vec::new();
        for (offset, &byte) in text.as_bytes().iter().enumerate() {
            let open = match byte {
                b'[' => {
                    square.push(offset);
                    continue;
                }
                b'{' => {
                    curly.push(offset);
                    continue;
                }
                b']' => square.pop(),
                b'}' => curly.pop(),
                _ => continue,
            };
            if let Some(open) = open {
                closers.insert(open, offset);
            }
        }
        Self { text, closers }
    }

    /// The indexed text.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// The group opened at byte offset `at`.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NotAnOpener`] if `text[at]` is not `[` or `{`,
    /// and [`BracketError::UnbalancedDelimiter`] if the group is never closed.
    pub fn group(&self, at: usize) -> Result<Group, BracketError> {
        let delimiter = self
            .text
            .as_bytes()
            .get(at)
            .copied()
            .and_then(Delimiter::from_open)
            .ok_or(BracketError::NotAnOpener(at))?;

        let close = self
            .closers
            .get(&at)
            .copied()
            .ok_or(BracketError::UnbalancedDelimiter {
                delimiter,
                open: at,
            })?;

        Ok(Group {
            delimiter,
            inner: (at + 1)..close,
            end: close + 1,
        })
    }
}

/// Flattens the content of a group into a single space-joined string.
///
/// Nested groups of the same kind are dissolved and runs of whitespace
/// collapse to one space, so `{a {b  c} d}` reads `a b c d`. Nested
/// formatting commands are kept verbatim.
#[must_use]
pub fn flatten(inner: &str, delimiter: Delimiter) -> String {
    let (open, close) = (char::from(delimiter.open()), char::from(delimiter.close()));
    inner
        .split(|c: char| c == open || c == close || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
