use anyhow::{Context, Result};
use batch_renamer_core::{
    load_config, summarize_errors, validate_template, ApplyResult, CaseOption, CustomList,
    ListKind, RenameConfig, RenamePlan, RenameSession, UndoResult, VersionStrategy,
    ERROR_PREVIEW_LIMIT, PLACEHOLDERS,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "batch-renamer-cli")]
#[command(about = "Rename files and folders in bulk from a name pattern")]
struct Cli {
    /// Log planning and renaming details to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the rename plan without touching the disk
    Preview(PreviewArgs),
    /// Rename everything the plan lists
    Rename(RenameArgs),
    /// Interactive loop that keeps undo history between commands
    Session(SessionArgs),
    /// List the pattern placeholders
    Placeholders,
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show(ConfigShowArgs),
}

#[derive(Debug, Args)]
struct ConfigShowArgs {
    #[command(flatten)]
    options: OptionArgs,
}

#[derive(Debug, Args)]
struct PreviewArgs {
    directory: PathBuf,
    #[command(flatten)]
    options: OptionArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct RenameArgs {
    directory: PathBuf,
    #[command(flatten)]
    options: OptionArgs,
    /// Skip the confirmation prompt
    #[arg(long, default_value_t = false)]
    yes: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct SessionArgs {
    directory: PathBuf,
    #[command(flatten)]
    options: OptionArgs,
}

#[derive(Debug, Args)]
struct OptionArgs {
    /// TOML preset; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    pattern: Option<String>,
    #[arg(long)]
    start_counter: Option<u64>,
    #[arg(long)]
    version_start: Option<String>,
    #[arg(long)]
    version_increment: Option<f64>,
    #[arg(long, value_enum)]
    strategy: Option<VersionStrategy>,
    #[arg(long, value_enum)]
    case: Option<CaseOption>,
    /// Comma-separated file patterns such as "*.jpg, *.png"
    #[arg(long)]
    filter: Option<String>,
    #[arg(long, default_value_t = false)]
    recursive: bool,
    #[arg(long, default_value_t = false)]
    no_files: bool,
    #[arg(long, default_value_t = false)]
    no_folders: bool,
    /// Word for {list1}; repeat for more
    #[arg(long = "list1")]
    list1: Vec<String>,
    /// Word for {prefix}; repeat for more
    #[arg(long = "list2")]
    list2: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl OptionArgs {
    fn resolve(&self) -> Result<RenameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RenameConfig::default(),
        };

        if let Some(pattern) = &self.pattern {
            config.pattern = pattern.clone();
        }
        if let Some(start) = self.start_counter {
            config.start_counter = start;
        }
        if let Some(start) = &self.version_start {
            config.version_start = start.clone();
        }
        if let Some(increment) = self.version_increment {
            config.version_increment = increment;
        }
        if let Some(strategy) = self.strategy {
            config.version_strategy = strategy;
        }
        if let Some(case) = self.case {
            config.case_option = case;
        }
        if let Some(filter) = &self.filter {
            config.file_filter = filter.clone();
        }
        config.recursive |= self.recursive;
        if self.no_files {
            config.include_files = false;
        }
        if self.no_folders {
            config.include_folders = false;
        }
        config.custom_list1.extend(self.list1.iter().cloned());
        config.custom_list2.extend(self.list2.iter().cloned());

        config.validate()?;
        if let Err(err) = validate_template(&config.pattern) {
            warn!(pattern = %config.pattern, "{err}");
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Preview(args) => cmd_preview(args),
        Commands::Rename(args) => cmd_rename(args),
        Commands::Session(args) => cmd_session(args),
        Commands::Placeholders => {
            print_placeholders();
            Ok(())
        }
        Commands::Config(config) => match config.action {
            ConfigAction::Show(args) => cmd_config_show(args),
        },
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn session_for(config: &RenameConfig) -> RenameSession {
    RenameSession::new().with_lists(
        CustomList::from_items(&config.custom_list1),
        CustomList::from_items(&config.custom_list2),
    )
}

fn cmd_preview(args: PreviewArgs) -> Result<()> {
    let config = args.options.resolve()?;
    let mut session = session_for(&config);
    let plan = session.preview(&args.directory, &config, &mut |_, _| {})?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Table => print_plan(&plan),
    }
    Ok(())
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let config = args.options.resolve()?;
    let mut session = session_for(&config);

    let plan = session.preview(&args.directory, &config, &mut |_, _| {})?;
    if plan.is_empty() {
        eprintln!("No files or folders found to rename");
        return Ok(());
    }
    if !args.yes && !confirm(&format!("Rename {} items?", plan.len()))? {
        eprintln!("Cancelled");
        return Ok(());
    }

    let result = session.rename(&args.directory, &config, &mut print_progress)?;
    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_apply_result(&result),
    }
    Ok(())
}

fn cmd_session(args: SessionArgs) -> Result<()> {
    let mut config = args.options.resolve()?;
    let mut session = session_for(&config);
    let stdin = io::stdin();

    println!("Session on {} (type 'help' for commands)", args.directory.display());
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, rest)) = words.split_first() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_session_help(),
            "status" => print_status(&session, &config),
            "pattern" => {
                if rest.is_empty() {
                    println!("{}", config.pattern);
                } else {
                    config.pattern = rest.join(" ");
                    if let Err(err) = validate_template(&config.pattern) {
                        println!("warning: {err}");
                    }
                }
            }
            "preview" => match session.preview(&args.directory, &config, &mut |_, _| {}) {
                Ok(plan) => print_plan(&plan),
                Err(err) => println!("Error: {err}"),
            },
            "rename" => {
                if !confirm("Rename all listed items?")? {
                    continue;
                }
                match session.rename(&args.directory, &config, &mut print_progress) {
                    Ok(result) => print_apply_result(&result),
                    Err(err) => println!("Error: {err}"),
                }
            }
            "undo" => session_undo(&mut session)?,
            "list1" | "list2" => session_list(&mut session, command, rest),
            other => println!("Unknown command: {other}"),
        }
    }
    Ok(())
}

fn session_undo(session: &mut RenameSession) -> Result<()> {
    let Some(batch) = session.pop_undo() else {
        println!("No actions to undo");
        return Ok(());
    };
    if !confirm(&format!("Undo {} rename operations?", batch.len()))? {
        session.restore_undo(batch);
        return Ok(());
    }
    let result = session.undo(batch, &mut print_progress);
    print_undo_result(&result);
    Ok(())
}

fn session_list(session: &mut RenameSession, which: &str, args: &[&str]) {
    let (list, kind) = if which == "list1" {
        (session.list1_mut(), ListKind::Words)
    } else {
        (session.list2_mut(), ListKind::Prefixes)
    };
    let value = args.get(1..).map(|v| v.join(" ")).unwrap_or_default();

    let outcome = match args.first().copied() {
        Some("add") => list.add(&value).map(|_| ()),
        Some("remove") => list.remove(&value).map(|_| ()),
        Some("clear") => {
            list.clear();
            Ok(())
        }
        Some("examples") => {
            let added = list.load_examples(kind);
            println!("Added {added} example items");
            Ok(())
        }
        Some("show") | None => Ok(()),
        Some(other) => {
            println!("Unknown {which} action: {other}");
            return;
        }
    };

    match outcome {
        Ok(()) => println!("{which}: [{}]", list.items().join(", ")),
        Err(err) => println!("{err}"),
    }
}

fn cmd_config_show(args: ConfigShowArgs) -> Result<()> {
    let config = args.options.resolve()?;
    if let Some(path) = &args.options.config {
        println!("# preset: {}", path.display());
    }
    println!("{}", config.to_toml()?);
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_progress(done: usize, total: usize) {
    eprint!("\r[{done}/{total}]");
    if done == total {
        eprintln!();
    }
}

fn print_plan(plan: &RenamePlan) {
    for warning in &plan.warnings {
        eprintln!("warning: {warning}");
    }
    if plan.is_empty() {
        println!("No files or folders found to rename");
        return;
    }
    println!("old -> new");
    for entry in &plan.entries {
        println!("{} -> {}", entry.old_relative_path, entry.new_relative_path);
    }
    println!("\nPreviewing {} items under {}", plan.len(), plan.root.display());
}

fn print_apply_result(result: &ApplyResult) {
    if !result.errors.is_empty() {
        eprintln!("Errors:\n{}", summarize_errors(&result.errors, ERROR_PREVIEW_LIMIT));
    }
    println!(
        "Renamed {} of {} items (Undo available: {} batches)",
        result.renamed, result.total, result.undo_depth
    );
}

fn print_undo_result(result: &UndoResult) {
    if !result.errors.is_empty() {
        eprintln!(
            "Undo errors:\n{}",
            summarize_errors(&result.errors, ERROR_PREVIEW_LIMIT)
        );
    }
    println!(
        "Undone {} of {} items (Undo available: {} batches)",
        result.undone, result.total, result.undo_depth
    );
}

fn print_status(session: &RenameSession, config: &RenameConfig) {
    println!("pattern:  {}", config.pattern);
    println!("strategy: {}", config.version_strategy);
    println!("list1:    {} items", session.list1().len());
    println!("list2:    {} items", session.list2().len());
    println!("undo:     {} batches", session.undo_depth());
}

fn print_placeholders() {
    println!("Pattern placeholders:");
    for (token, description) in PLACEHOLDERS {
        println!("  {token:<12} {description}");
    }
    println!("\nFiles keep their extension unless the pattern produces one.");
}

fn print_session_help() {
    println!("preview | rename | undo | status | pattern [NEW] | quit");
    println!("list1|list2 add WORD | remove WORD | clear | examples | show");
}
