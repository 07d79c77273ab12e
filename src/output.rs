//! Output emission for the host pipeline.
//!
//! The Actions runner collects step outputs from the file named by
//! `GITHUB_OUTPUT`: one `name=value` line per output, heredoc form for
//! multi-line values, appended so earlier outputs survive. When the
//! variable is unset (local runs) the same lines go to stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::github::Milestone;

pub const OUTPUT_TITLE: &str = "milestone-title";
pub const OUTPUT_NUMBER: &str = "milestone-number";
pub const OUTPUT_ID: &str = "milestone-id";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    #[error("failed to append outputs to {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Render the three outputs. All three are always present; a no-match run
/// renders every value empty, which is how the Actions toolkit serializes
/// null.
pub fn render(selected: Option<&Milestone>) -> Vec<(&'static str, String)> {
    match selected {
        Some(m) => vec![
            (OUTPUT_TITLE, m.title.clone()),
            (OUTPUT_NUMBER, m.number.to_string()),
            (OUTPUT_ID, m.id.to_string()),
        ],
        None => vec![
            (OUTPUT_TITLE, String::new()),
            (OUTPUT_NUMBER, String::new()),
            (OUTPUT_ID, String::new()),
        ],
    }
}

/// One output in the runner's file format.
pub fn format_line(name: &str, value: &str) -> String {
    if value.contains('\n') {
        // Heredoc form; the delimiter must not occur in the value.
        let mut delimiter = String::from("EOF");
        while value.contains(&delimiter) {
            delimiter.push('_');
        }
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

pub fn emit(selected: Option<&Milestone>) -> Result<(), OutputError> {
    match std::env::var("GITHUB_OUTPUT") {
        Ok(path) if !path.is_empty() => emit_to_path(Path::new(&path), selected),
        _ => {
            print!("{}", rendered_block(selected));
            Ok(())
        }
    }
}

pub fn emit_to_path(path: &Path, selected: Option<&Milestone>) -> Result<(), OutputError> {
    let io_err = |source: std::io::Error| OutputError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(rendered_block(selected).as_bytes())
        .map_err(io_err)
}

fn rendered_block(selected: Option<&Milestone>) -> String {
    render(selected)
        .iter()
        .map(|(name, value)| format_line(name, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use time::macros::datetime;

    use super::*;
    use crate::github::MilestoneState;

    fn milestone(title: &str) -> Milestone {
        Milestone {
            title: title.to_string(),
            number: 12,
            id: 900_012,
            due_on: Some(datetime!(2024-03-15 08:00 UTC)),
            state: MilestoneState::Open,
        }
    }

    #[test]
    fn render_match_carries_all_three_values() {
        let m = milestone("Release Candidate 1.4");
        let rendered = render(Some(&m));
        assert_eq!(
            rendered,
            vec![
                (OUTPUT_TITLE, "Release Candidate 1.4".to_string()),
                (OUTPUT_NUMBER, "12".to_string()),
                (OUTPUT_ID, "900012".to_string()),
            ]
        );
    }

    #[test]
    fn render_no_match_is_all_empty() {
        let rendered = render(None);
        assert_eq!(rendered.len(), 3);
        assert!(rendered.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn format_line_plain_value() {
        assert_eq!(format_line("milestone-number", "12"), "milestone-number=12\n");
    }

    #[test]
    fn format_line_multiline_uses_heredoc() {
        let line = format_line("milestone-title", "a\nb");
        assert_eq!(line, "milestone-title<<EOF\na\nb\nEOF\n");
    }

    #[test]
    fn format_line_heredoc_avoids_delimiter_collision() {
        let line = format_line("milestone-title", "has\nEOF inside");
        assert!(line.starts_with("milestone-title<<EOF_\n"));
        assert!(line.ends_with("\nEOF_\n"));
    }

    #[test]
    fn emit_to_path_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs");
        fs::write(&path, "earlier=kept\n").unwrap();

        let m = milestone("Release Candidate 1.4");
        emit_to_path(&path, Some(&m)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "earlier=kept\nmilestone-title=Release Candidate 1.4\nmilestone-number=12\nmilestone-id=900012\n"
        );
    }

    #[test]
    fn emit_to_path_no_match_writes_empty_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs");

        emit_to_path(&path, None).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "milestone-title=\nmilestone-number=\nmilestone-id=\n");
    }
}
