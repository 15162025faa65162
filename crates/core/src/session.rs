use crate::apply::{apply_plan, undo_batch, undo_last, ApplyResult, UndoResult};
use crate::config::RenameConfig;
use crate::custom_list::CustomList;
use crate::enumerate::enumerate_items;
use crate::error::RenameError;
use crate::history::{RenameHistoryBatch, UndoStack};
use crate::planner::{plan_items, PlanInputs, RenamePlan};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::info;

/// Owns the state that outlives a single preview or rename: both word lists,
/// the undo history and the random source.
pub struct RenameSession<R: Rng = StdRng> {
    list1: CustomList,
    list2: CustomList,
    undo: UndoStack,
    rng: R,
}

impl RenameSession<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RenameSession<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RenameSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            list1: CustomList::new(),
            list2: CustomList::new(),
            undo: UndoStack::new(),
            rng,
        }
    }

    /// Starts the session with preloaded word lists, e.g. from a preset.
    pub fn with_lists(mut self, list1: CustomList, list2: CustomList) -> Self {
        self.list1 = list1;
        self.list2 = list2;
        self
    }

    pub fn list1(&self) -> &CustomList {
        &self.list1
    }

    pub fn list2(&self) -> &CustomList {
        &self.list2
    }

    pub fn list1_mut(&mut self) -> &mut CustomList {
        &mut self.list1
    }

    pub fn list2_mut(&mut self) -> &mut CustomList {
        &mut self.list2
    }

    pub fn preview(
        &mut self,
        root: &Path,
        config: &RenameConfig,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<RenamePlan, RenameError> {
        let items = enumerate_items(root, config)?;
        let mut inputs = PlanInputs {
            list1: &self.list1,
            list2: &self.list2,
            now: Local::now(),
            rng: &mut self.rng,
        };
        plan_items(
            root,
            &items,
            config,
            config.start_counter,
            &mut inputs,
            progress,
        )
    }

    /// Plans afresh and executes; names are re-rendered, so random placeholders
    /// can differ from an earlier preview.
    pub fn rename(
        &mut self,
        root: &Path,
        config: &RenameConfig,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<ApplyResult, RenameError> {
        let plan = self.preview(root, config, &mut |_, _| {})?;
        let result = apply_plan(&plan, &mut self.undo, progress);
        info!(
            renamed = result.renamed,
            total = result.total,
            undo_depth = result.undo_depth,
            "rename finished"
        );
        Ok(result)
    }

    pub fn pop_undo(&mut self) -> Option<RenameHistoryBatch> {
        self.undo.pop()
    }

    pub fn restore_undo(&mut self, batch: RenameHistoryBatch) {
        self.undo.restore(batch);
    }

    /// Reverses a batch already taken off the stack with [`Self::pop_undo`].
    pub fn undo(
        &mut self,
        batch: RenameHistoryBatch,
        progress: &mut dyn FnMut(usize, usize),
    ) -> UndoResult {
        let (undone, errors) = undo_batch(&batch, progress);
        UndoResult {
            undone,
            total: batch.len(),
            errors,
            undo_depth: self.undo.depth(),
        }
    }

    pub fn undo_last(&mut self, progress: &mut dyn FnMut(usize, usize)) -> Option<UndoResult> {
        undo_last(&mut self.undo, progress)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom_list::ListKind;
    use std::fs;
    use tempfile::tempdir;

    fn config(pattern: &str) -> RenameConfig {
        RenameConfig {
            pattern: pattern.to_string(),
            ..RenameConfig::default()
        }
    }

    #[test]
    fn session_lists_override_config_lists() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.txt"), b"a").expect("write");

        let mut session = RenameSession::seeded(1);
        session.list1_mut().add("Session").expect("add");
        let mut cfg = config("{list1}");
        cfg.custom_list1 = vec!["FromConfig".to_string()];

        let plan = session
            .preview(temp.path(), &cfg, &mut |_, _| {})
            .expect("preview");
        assert_eq!(plan.entries[0].new_relative_path, "Session.txt");
    }

    #[test]
    fn preloaded_lists_feed_the_plan() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.txt"), b"a").expect("write");

        let mut session = RenameSession::seeded(1).with_lists(
            CustomList::from_items(["Alpha"]),
            CustomList::from_items(["pre"]),
        );
        assert_eq!(session.list1().items(), ["Alpha"]);
        session.list2_mut().clear();

        let plan = session
            .preview(temp.path(), &config("{list1}-{prefix}"), &mut |_, _| {})
            .expect("preview");
        assert_eq!(plan.entries[0].new_relative_path, "Alpha-file.txt");
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn huge_start_counter_is_reported_not_panicking() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.txt"), b"a").expect("write a");
        fs::write(temp.path().join("b.txt"), b"b").expect("write b");

        let mut session = RenameSession::seeded(1);
        let cfg = RenameConfig {
            start_counter: u64::MAX,
            ..config("n{counter}")
        };
        let err = session
            .rename(temp.path(), &cfg, &mut |_, _| {})
            .expect_err("must fail");
        assert!(matches!(err, RenameError::CounterOverflow { items: 2, .. }));
        assert!(temp.path().join("a.txt").exists());
        assert_eq!(session.undo_depth(), 0);
    }

    #[test]
    fn preview_does_not_touch_disk() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.txt"), b"a").expect("write");

        let mut session = RenameSession::seeded(1);
        let plan = session
            .preview(temp.path(), &config("renamed_{counter}"), &mut |_, _| {})
            .expect("preview");
        assert_eq!(plan.entries[0].new_relative_path, "renamed_001.txt");
        assert!(temp.path().join("a.txt").exists());
        assert_eq!(session.undo_depth(), 0);
    }

    #[test]
    fn invalid_root_aborts_before_any_work() {
        let temp = tempdir().expect("tempdir");
        let mut session = RenameSession::seeded(1);
        let err = session
            .rename(&temp.path().join("missing"), &config("x"), &mut |_, _| {})
            .expect_err("must fail");
        assert!(matches!(err, RenameError::InvalidDirectory(_)));
        assert_eq!(session.undo_depth(), 0);
    }

    #[test]
    fn rename_undo_cycle_with_cancelled_confirmation() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.txt"), b"a").expect("write a");
        fs::write(temp.path().join("b.txt"), b"b").expect("write b");

        let mut session = RenameSession::seeded(5);
        session.list2_mut().load_examples(ListKind::Prefixes);
        let cfg = RenameConfig {
            include_folders: false,
            ..config("{prefix}_{counter}")
        };

        let result = session
            .rename(temp.path(), &cfg, &mut |_, _| {})
            .expect("rename");
        assert_eq!(result.renamed, 2);
        assert_eq!(result.total, 2);
        assert_eq!(session.undo_depth(), 1);
        assert!(!temp.path().join("a.txt").exists());

        let batch = session.pop_undo().expect("batch");
        session.restore_undo(batch);
        assert_eq!(session.undo_depth(), 1);

        let batch = session.pop_undo().expect("batch");
        let undone = session.undo(batch, &mut |_, _| {});
        assert_eq!(undone.undone, 2);
        assert_eq!(undone.undo_depth, 0);
        assert!(temp.path().join("a.txt").exists());
        assert!(temp.path().join("b.txt").exists());
        assert!(session.undo_last(&mut |_, _| {}).is_none());
    }

    #[test]
    fn each_rename_pushes_its_own_batch() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.txt"), b"a").expect("write a");

        let mut session = RenameSession::seeded(2);
        session
            .rename(temp.path(), &config("first"), &mut |_, _| {})
            .expect("first rename");
        session
            .rename(temp.path(), &config("second"), &mut |_, _| {})
            .expect("second rename");
        assert_eq!(session.undo_depth(), 2);
        assert!(temp.path().join("second.txt").exists());

        let latest = session.undo_last(&mut |_, _| {}).expect("latest batch");
        assert_eq!(latest.undone, 1);
        assert!(temp.path().join("first.txt").exists());

        session.undo_last(&mut |_, _| {}).expect("older batch");
        assert!(temp.path().join("a.txt").exists());
    }
}
