use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const ERROR_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Not a valid directory: {}", .0.display())]
    InvalidDirectory(PathBuf),
    #[error("Start counter {start} leaves no room to number {items} items")]
    CounterOverflow { start: u64, items: usize },
    #[error("Invalid version format '{0}'. Using default 1.0")]
    InvalidVersionFormat(String),
    #[error("Skipping {rel_path}: {new_name} already exists")]
    DestinationExists { rel_path: String, new_name: String },
    #[error("Error renaming {rel_path}: {source}")]
    Filesystem {
        rel_path: String,
        #[source]
        source: io::Error,
    },
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Error undoing {}: {source}", .path.display())]
    Undo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("Please enter a value")]
    Empty,
    #[error("'{0}' already exists in the list")]
    Duplicate(String),
    #[error("'{0}' is not in the list")]
    NotFound(String),
}

pub fn summarize_errors(errors: &[String], limit: usize) -> String {
    let mut out = errors
        .iter()
        .take(limit)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    if errors.len() > limit {
        out.push_str("\n...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_errors_marks_truncation() {
        let errors: Vec<String> = (1..=7).map(|n| format!("error {n}")).collect();
        let summary = summarize_errors(&errors, ERROR_PREVIEW_LIMIT);
        assert_eq!(summary.lines().count(), 6);
        assert!(summary.starts_with("error 1\n"));
        assert!(summary.ends_with("error 5\n..."));
    }

    #[test]
    fn summarize_errors_keeps_short_lists_intact() {
        let errors = vec!["only".to_string()];
        assert_eq!(summarize_errors(&errors, ERROR_PREVIEW_LIMIT), "only");
    }

    #[test]
    fn destination_exists_message_names_both_paths() {
        let err = RenameError::DestinationExists {
            rel_path: "sub/a.txt".to_string(),
            new_name: "b.txt".to_string(),
        };
        assert_eq!(err.to_string(), "Skipping sub/a.txt: b.txt already exists");
    }
}
