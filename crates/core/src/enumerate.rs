use crate::config::RenameConfig;
use crate::error::RenameError;
use crate::filter::matches_filter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub is_dir: bool,
}

impl Item {
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map_or(self.relative_path.as_str(), |(_, name)| name)
    }

    pub fn parent_dir(&self) -> Option<&str> {
        self.relative_path.rsplit_once('/').map(|(parent, _)| parent)
    }
}

pub fn enumerate_items(root: &Path, config: &RenameConfig) -> Result<Vec<Item>, RenameError> {
    if !root.is_dir() {
        return Err(RenameError::InvalidDirectory(root.to_path_buf()));
    }

    let mut items = if config.recursive {
        collect_recursive(root, config)
    } else {
        collect_children(root, config)?
    };
    items.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    debug!(root = %root.display(), count = items.len(), "enumerated items");
    Ok(items)
}

fn collect_children(root: &Path, config: &RenameConfig) -> Result<Vec<Item>, RenameError> {
    let entries =
        fs::read_dir(root).map_err(|_| RenameError::InvalidDirectory(root.to_path_buf()))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = %root.display(), %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if let Some(item) = classify(root, &path, config) {
            out.push(item);
        }
    }
    Ok(out)
}

// Top-down walk; symlinked directories are listed but not descended into.
fn collect_recursive(root: &Path, config: &RenameConfig) -> Vec<Item> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = %root.display(), %err, "skipping unreadable entry");
                continue;
            }
        };
        if let Some(item) = classify(root, entry.path(), config) {
            out.push(item);
        }
    }
    out
}

fn classify(root: &Path, path: &Path, config: &RenameConfig) -> Option<Item> {
    let relative_path = relative_slash_path(root, path)?;
    let name = path.file_name()?.to_string_lossy();

    if path.is_dir() {
        if !config.include_folders {
            return None;
        }
        return Some(Item {
            relative_path,
            absolute_path: path.to_path_buf(),
            is_dir: true,
        });
    }

    if path.is_file() && config.include_files && matches_filter(&name, &config.file_filter) {
        return Some(Item {
            relative_path,
            absolute_path: path.to_path_buf(),
            is_dir: false,
        });
    }

    None
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
