use crate::config::RenameConfig;
use crate::custom_list::CustomList;
use crate::enumerate::{enumerate_items, Item};
use crate::error::RenameError;
use crate::template::{
    parse_template, render_name, split_extension, uses_token, TemplateContext, Token,
};
use crate::version::VersionGenerator;
use chrono::{DateTime, Local};
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MISSING_LIST1: &str = "Pattern uses {list1} but no items are defined; using \"Item\"";
const MISSING_LIST2: &str = "Pattern uses {prefix} but no prefixes are defined; using \"file\"";

/// The relative paths are display text; `source` and `destination` are the
/// on-disk paths, which keep names that are not valid UTF-8 intact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenamePlanEntry {
    pub old_relative_path: String,
    pub new_relative_path: String,
    #[serde(skip)]
    pub source: PathBuf,
    #[serde(skip)]
    pub destination: PathBuf,
    pub version: f64,
    pub counter: u64,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenamePlan {
    pub root: PathBuf,
    pub pattern: String,
    pub entries: Vec<RenamePlanEntry>,
    pub warnings: Vec<String>,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything besides the configuration that a batch needs to render names.
pub struct PlanInputs<'a, R: Rng + ?Sized> {
    pub list1: &'a CustomList,
    pub list2: &'a CustomList,
    pub now: DateTime<Local>,
    pub rng: &'a mut R,
}

/// Enumerates `root` and plans it with the word lists carried by `config`.
pub fn generate_plan<R: Rng + ?Sized>(
    root: &Path,
    config: &RenameConfig,
    rng: &mut R,
) -> Result<RenamePlan, RenameError> {
    let list1 = CustomList::from_items(&config.custom_list1);
    let list2 = CustomList::from_items(&config.custom_list2);
    let items = enumerate_items(root, config)?;
    let mut inputs = PlanInputs {
        list1: &list1,
        list2: &list2,
        now: Local::now(),
        rng,
    };
    plan_items(
        root,
        &items,
        config,
        config.start_counter,
        &mut inputs,
        &mut |_, _| {},
    )
}

/// Assigns one counter per item starting at `start_counter`, in item order,
/// and renders each base name next to its unchanged parent directory.
/// Collisions are left for execution time. Fails before rendering anything
/// when the counters for `items` would not fit in a `u64`.
pub fn plan_items<R: Rng + ?Sized>(
    root: &Path,
    items: &[Item],
    config: &RenameConfig,
    start_counter: u64,
    inputs: &mut PlanInputs<'_, R>,
    progress: &mut dyn FnMut(usize, usize),
) -> Result<RenamePlan, RenameError> {
    let total = items.len();
    let overflow = || RenameError::CounterOverflow {
        start: start_counter,
        items: total,
    };
    if total > 0 {
        let last_offset = u64::try_from(total - 1).map_err(|_| overflow())?;
        start_counter.checked_add(last_offset).ok_or_else(overflow)?;
    }

    let parts = parse_template(&config.pattern);
    let mut warnings = Vec::new();

    if uses_token(&parts, Token::List1) && inputs.list1.is_empty() {
        warnings.push(MISSING_LIST1.to_string());
    }
    if uses_token(&parts, Token::Prefix) && inputs.list2.is_empty() {
        warnings.push(MISSING_LIST2.to_string());
    }

    let (versions, version_error) = VersionGenerator::from_config(config);
    if let Some(err) = version_error {
        warn!(%err, "falling back to default version");
        warnings.push(err.to_string());
    }

    let mut entries = Vec::with_capacity(total);
    for (index, item) in items.iter().enumerate() {
        let counter = start_counter + index as u64;
        let version = versions.version_for(counter, inputs.rng);
        let (stem, ext) = split_extension(item.file_name());
        let ctx = TemplateContext {
            counter,
            version,
            now: inputs.now,
            original_stem: stem,
            original_ext: ext,
            list1: inputs.list1,
            list2: inputs.list2,
        };
        let new_name = render_name(&parts, &ctx, config.case_option, !item.is_dir, inputs.rng);
        let new_relative_path = match item.parent_dir() {
            Some(parent) => format!("{parent}/{new_name}"),
            None => new_name.clone(),
        };

        debug!(
            counter,
            from = %item.relative_path,
            to = %new_relative_path,
            "planned rename"
        );
        entries.push(RenamePlanEntry {
            old_relative_path: item.relative_path.clone(),
            destination: item.absolute_path.with_file_name(&new_name),
            new_relative_path,
            source: item.absolute_path.clone(),
            version,
            counter,
            is_dir: item.is_dir,
        });
        progress(index + 1, total);
    }

    Ok(RenamePlan {
        root: root.to_path_buf(),
        pattern: config.pattern.clone(),
        entries,
        warnings,
    })
}
