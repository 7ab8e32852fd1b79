//! Output formats for a [`DocumentSet`].
//!
//! Renderers only read the parsed model. Derived codes restart in every
//! document and are prefixed with the document's group name, e.g. `SRM1.2.3`.

use std::io::{self, Write};

use crate::{domain::NumberedTask, storage::DocumentSet};

/// Column headings of the key task table.
pub const TABLE_HEADER: [&str; 6] = [
    "Key Task",
    "Due date",
    "Description",
    "People working on this",
    "Existing / completed work",
    "Status",
];

/// Errors that can occur while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization failed.
    #[error("failed to render json output: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML serialization failed.
    #[error("failed to render yaml output: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One row of the key task table.
fn task_row(group: &str, task: &NumberedTask<'_>, status: &str) -> [String; 6] {
    [
        task.code(group).to_string(),
        task.task.date.clone(),
        task.task.name.clone(),
        " ".to_owned(),
        " ".to_owned(),
        status.to_owned(),
    ]
}

/// Writes the key task table in Confluence wiki markup.
///
/// Paste the output into a Confluence "markup" macro. `status` fills the last
/// column of every row (typically a `{status:...}` macro).
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn confluence<W: Write>(writer: &mut W, set: &DocumentSet, status: &str) -> io::Result<()> {
    writeln!(writer, "||{}||", TABLE_HEADER.join("||"))?;
    for document in set {
        let group = document.group();
        for task in document.numbered_tasks() {
            writeln!(writer, "|{}|", task_row(&group, &task, status).join("|"))?;
        }
    }
    Ok(())
}

/// Writes the key task table as CSV.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn csv<W: Write>(writer: &mut W, set: &DocumentSet, status: &str) -> io::Result<()> {
    let header: Vec<_> = TABLE_HEADER.iter().map(|h| csv_escape(h)).collect();
    writeln!(writer, "{}", header.join(","))?;
    for document in set {
        let group = document.group();
        for task in document.numbered_tasks() {
            let row: Vec<_> = task_row(&group, &task, status)
                .iter()
                .map(|value| csv_escape(value))
                .collect();
            writeln!(writer, "{}", row.join(","))?;
        }
    }
    Ok(())
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Writes the full hierarchy as pretty-printed JSON, keyed by document name.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn json<W: Write>(writer: &mut W, set: &DocumentSet) -> Result<(), RenderError> {
    serde_json::to_writer_pretty(&mut *writer, set)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes the full hierarchy as YAML, keyed by document name.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn yaml<W: Write>(writer: &mut W, set: &DocumentSet) -> Result<(), RenderError> {
    serde_yaml::to_writer(writer, set)?;
    Ok(())
}

/// The nesting level of a line in the tree outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A document heading.
    Document,
    /// A project line.
    Project,
    /// A deliverable line.
    Deliverable,
    /// A key task line.
    KeyTask,
    /// A prerequisite line.
    Prereq,
}

/// Decorates tree outline text, e.g. with terminal colours.
pub trait Highlight {
    /// Returns `text` decorated for the given level.
    fn highlight(&self, level: Level, text: &str) -> String;
}

/// Leaves text undecorated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Highlight for Plain {
    fn highlight(&self, _level: Level, text: &str) -> String {
        text.to_owned()
    }
}

/// Writes a human-readable outline of every document.
///
/// ```text
/// INTRO
/// ==========
///
/// + Proj One  [P1]
///     -  Deliv One  [D1]
///         + Task One  [T1]
///         requires deliverable:D0
/// ```
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn tree<W: Write, H: Highlight>(writer: &mut W, set: &DocumentSet, style: &H) -> io::Result<()> {
    for (i, document) in set.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        let heading = document.name.to_uppercase();
        let underline = "=".repeat(heading.chars().count().max(10));
        writeln!(writer, "{}", style.highlight(Level::Document, &heading))?;
        writeln!(writer, "{underline}")?;
        writeln!(writer)?;

        for project in &document.projects {
            let line = format!("+ {}  [{}]", project.name, project.code);
            writeln!(writer, "{}", style.highlight(Level::Project, &line))?;
            for deliverable in &project.deliverables {
                let line = format!("    -  {}  [{}]", deliverable.name, deliverable.code);
                writeln!(writer, "{}", style.highlight(Level::Deliverable, &line))?;
                for task in &deliverable.keytasks {
                    let line = format!("        + {}  [{}]", task.name, task.code);
                    writeln!(writer, "{}", style.highlight(Level::KeyTask, &line))?;
                }
                for prereq in &deliverable.prereqs {
                    let line = format!("        requires {prereq}");
                    writeln!(writer, "{}", style.highlight(Level::Prereq, &line))?;
                }
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Document;

    fn set() -> DocumentSet {
        let intro = Document::parse(
            "intro",
            r"
\keyproject[][P1]{2020}{Proj One}
\deliverable[][D1]{2021}{Deliv One}
\keytask[][T1]{2021}{Task One}
\keytask[][T2]{2022}{Task, Two}
\prereq{\deliverableref{D0}}
\deliverable[][D2]{2022}{Deliv Two}
\keytask[][T3]{2023}{Task Three}
",
        )
        .unwrap();
        let dc2 = Document::parse(
            "dc2",
            r#"
\keyproject[][Q1]{2020}{Other}
\deliverable[][E1]{2021}{Deliv}
\keytask[][U1]{2024}{Say "hi"}
"#,
        )
        .unwrap();
        [intro, dc2].into_iter().collect()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn confluence_table() {
        let output = render(|w| confluence(w, &set(), "S"));
        let expected = "\
||Key Task||Due date||Description||People working on this||Existing / completed work||Status||
|INTRO1.1.1|2021|Task One| | |S|
|INTRO1.1.2|2022|Task, Two| | |S|
|INTRO1.2.1|2023|Task Three| | |S|
|DC21.1.1|2024|Say \"hi\"| | |S|
";
        assert_eq!(output, expected);
    }

    #[test]
    fn csv_quotes_when_needed() {
        let output = render(|w| csv(w, &set(), "S"));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "INTRO1.1.2,2022,\"Task, Two\", , ,S");
        assert_eq!(lines[4], "DC21.1.1,2024,\"Say \"\"hi\"\"\", , ,S");
    }

    #[test]
    fn json_is_keyed_by_document() {
        let mut buffer = Vec::new();
        json(&mut buffer, &set()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        let deliverable = &value["intro"][0]["deliverables"][0];
        assert_eq!(deliverable["code"], "D1");
        assert_eq!(deliverable["keytasks"][1]["name"], "Task, Two");
        assert_eq!(
            deliverable["prereqs"],
            serde_json::json!([{"kind": "deliverable", "code": "D0"}])
        );
        assert_eq!(value["dc2"][0]["code"], "Q1");
    }

    #[test]
    fn yaml_is_keyed_by_document() {
        let mut buffer = Vec::new();
        yaml(&mut buffer, &set()).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_slice(&buffer).unwrap();
        assert_eq!(value["intro"][0]["name"].as_str(), Some("Proj One"));
    }

    #[test]
    fn tree_outline() {
        let output = render(|w| tree(w, &set(), &Plain));
        let expected = "\
INTRO
==========

+ Proj One  [P1]
    -  Deliv One  [D1]
        + Task One  [T1]
        + Task, Two  [T2]
        requires deliverable:D0
    -  Deliv Two  [D2]
        + Task Three  [T3]


DC2
==========

+ Other  [Q1]
    -  Deliv  [E1]
        + Say \"hi\"  [U1]

";
        assert_eq!(output, expected);
    }

    #[test]
    fn empty_set_renders_header_only() {
        let output = render(|w| confluence(w, &DocumentSet::default(), "S"));
        assert_eq!(output.lines().count(), 1);
    }
}
