mod apply;
mod case;
mod config;
mod custom_list;
mod enumerate;
mod error;
mod filter;
mod history;
mod planner;
mod sanitize;
mod session;
mod template;
mod version;

pub use apply::{
    apply_plan, execute_plan, undo_batch, undo_last, ApplyResult, ExecutionOutcome, UndoResult,
};
pub use case::apply_case;
pub use config::{load_config, CaseOption, RenameConfig, VersionStrategy, DEFAULT_PATTERN};
pub use custom_list::{CustomList, ListKind};
pub use enumerate::{enumerate_items, Item};
pub use error::{summarize_errors, ListError, RenameError, ERROR_PREVIEW_LIMIT};
pub use filter::matches_filter;
pub use history::{RenameHistoryBatch, RenameRecord, UndoStack};
pub use planner::{generate_plan, plan_items, PlanInputs, RenamePlan, RenamePlanEntry};
pub use session::RenameSession;
pub use template::{
    parse_template, render_name, render_template, split_extension, validate_template,
    TemplateContext, TemplateError, TemplatePart, Token, PLACEHOLDERS,
};
pub use version::{format_version, version_for, VersionGenerator, DEFAULT_VERSION};
