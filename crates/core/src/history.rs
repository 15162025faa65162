use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRecord {
    pub current_path: PathBuf,
    pub original_path: PathBuf,
}

/// Successful renames of one batch, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameHistoryBatch {
    records: Vec<RenameRecord>,
}

impl RenameHistoryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, current_path: PathBuf, original_path: PathBuf) {
        self.records.push(RenameRecord {
            current_path,
            original_path,
        });
    }

    pub fn records(&self) -> &[RenameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// In-memory LIFO of executed batches. Nothing is written to disk, so undo
/// history ends with the owning session.
#[derive(Debug, Default)]
pub struct UndoStack {
    batches: Vec<RenameHistoryBatch>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty batches are dropped; returns whether the batch was stored.
    pub fn push(&mut self, batch: RenameHistoryBatch) -> bool {
        if batch.is_empty() {
            return false;
        }
        self.batches.push(batch);
        true
    }

    pub fn pop(&mut self) -> Option<RenameHistoryBatch> {
        self.batches.pop()
    }

    /// Puts back a batch whose undo was cancelled after popping it.
    pub fn restore(&mut self, batch: RenameHistoryBatch) {
        self.push(batch);
    }

    pub fn peek(&self) -> Option<&RenameHistoryBatch> {
        self.batches.last()
    }

    pub fn depth(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
