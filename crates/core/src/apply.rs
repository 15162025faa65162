use crate::error::RenameError;
use crate::history::{RenameHistoryBatch, UndoStack};
use crate::planner::{RenamePlan, RenamePlanEntry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct ExecutionOutcome {
    pub renamed: usize,
    pub errors: Vec<String>,
    pub batch: RenameHistoryBatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    pub renamed: usize,
    pub total: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub undo_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoResult {
    pub undone: usize,
    pub total: usize,
    pub errors: Vec<String>,
    pub undo_depth: usize,
}

/// Executes `plan` under its root and pushes the successful renames onto `undo`.
pub fn apply_plan(
    plan: &RenamePlan,
    undo: &mut UndoStack,
    progress: &mut dyn FnMut(usize, usize),
) -> ApplyResult {
    let outcome = execute_plan(&plan.entries, progress);
    undo.push(outcome.batch);
    ApplyResult {
        renamed: outcome.renamed,
        total: plan.entries.len(),
        errors: outcome.errors,
        warnings: plan.warnings.clone(),
        undo_depth: undo.depth(),
    }
}

/// Renames each entry in order. Existing destinations are skipped and every
/// failure is recorded without stopping the batch.
pub fn execute_plan(
    entries: &[RenamePlanEntry],
    progress: &mut dyn FnMut(usize, usize),
) -> ExecutionOutcome {
    let total = entries.len();
    let mut outcome = ExecutionOutcome::default();

    for (index, entry) in entries.iter().enumerate() {
        match rename_entry(entry) {
            Ok((from, to)) => {
                debug!(from = %from.display(), to = %to.display(), "renamed");
                outcome.batch.record(to, from);
                outcome.renamed += 1;
            }
            Err(err) => {
                warn!(%err, "rename skipped");
                outcome.errors.push(err.to_string());
            }
        }
        progress(index + 1, total);
    }

    info!(
        renamed = outcome.renamed,
        total,
        failed = outcome.errors.len(),
        "rename batch finished"
    );
    outcome
}

fn rename_entry(entry: &RenamePlanEntry) -> Result<(PathBuf, PathBuf), RenameError> {
    let from = &entry.source;
    let to = &entry.destination;

    if is_occupied(to) {
        let new_name = entry
            .new_relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&entry.new_relative_path)
            .to_string();
        return Err(RenameError::DestinationExists {
            rel_path: entry.old_relative_path.clone(),
            new_name,
        });
    }

    fs::rename(from, to).map_err(|source| RenameError::Filesystem {
        rel_path: entry.old_relative_path.clone(),
        source,
    })?;
    Ok((from.clone(), to.clone()))
}

/// Reverses a batch in its recorded order. Missing or blocked entries are
/// reported and left where they are; nothing is pushed back.
pub fn undo_batch(
    batch: &RenameHistoryBatch,
    progress: &mut dyn FnMut(usize, usize),
) -> (usize, Vec<String>) {
    let total = batch.len();
    let mut undone = 0usize;
    let mut errors = Vec::new();

    for (index, record) in batch.records().iter().enumerate() {
        match restore_record(&record.current_path, &record.original_path) {
            Ok(()) => {
                debug!(
                    from = %record.current_path.display(),
                    to = %record.original_path.display(),
                    "restored"
                );
                undone += 1;
            }
            Err(err) => {
                warn!(%err, "undo skipped");
                errors.push(err.to_string());
            }
        }
        progress(index + 1, total);
    }

    info!(undone, total, failed = errors.len(), "undo batch finished");
    (undone, errors)
}

/// Pops the newest batch and reverses it. `None` when there is nothing to undo.
pub fn undo_last(
    undo: &mut UndoStack,
    progress: &mut dyn FnMut(usize, usize),
) -> Option<UndoResult> {
    let batch = undo.pop()?;
    let (undone, errors) = undo_batch(&batch, progress);
    Some(UndoResult {
        undone,
        total: batch.len(),
        errors,
        undo_depth: undo.depth(),
    })
}

fn restore_record(current: &Path, original: &Path) -> Result<(), RenameError> {
    if !is_occupied(current) {
        return Err(RenameError::NotFound(current.to_path_buf()));
    }
    if is_occupied(original) {
        return Err(RenameError::DestinationExists {
            rel_path: current.display().to_string(),
            new_name: original.display().to_string(),
        });
    }
    fs::rename(current, original).map_err(|source| RenameError::Undo {
        path: current.to_path_buf(),
        source,
    })
}

// Looks at the entry itself, so a dangling symlink still counts as taken.
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
