//! Colored output for the terminal

use owo_colors::{colors::css, OwoColorize};
use roadmap::render::{Highlight, Level};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_owned()
    }
}

/// Status colors for command output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        paint(self, |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self, |s| s.fg::<css::Orange>().to_string())
    }

    fn dim(&self) -> String {
        paint(self, |s| s.dimmed().to_string())
    }
}

/// Highlights the tree outline for the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl Highlight for Terminal {
    fn highlight(&self, level: Level, text: &str) -> String {
        match level {
            Level::Document => paint(text, |s| s.bold().to_string()),
            Level::Project => paint(text, |s| s.fg::<css::LightBlue>().to_string()),
            Level::Deliverable => text.success(),
            Level::KeyTask => text.to_string(),
            Level::Prereq => text.dim(),
        }
    }
}
