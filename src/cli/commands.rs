//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::NumberingBehavior;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, RenumberArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{BehaviorConfig, BehaviorOptions};
use crate::infrastructure::outline::{load_outline, to_tree_string, write_outline};
use crate::infrastructure::MemoryWorkspace;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Renumber(args)) => cmd_renumber(cli.config.as_deref(), args),
        Some(Commands::Check) => cmd_check(cli.config.as_deref()),
        Some(Commands::Config { command }) => cmd_config(cli.config.as_deref(), command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `treenum --help`".to_string(),
        )),
    }
}

/// Project name used when none is given: the outline file stem.
fn project_name(args: &RenumberArgs) -> String {
    args.project.clone().unwrap_or_else(|| {
        args.outline
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Outline".to_string())
    })
}

/// Command line flags override configured options.
fn apply_flags(mut options: BehaviorOptions, args: &RenumberArgs) -> BehaviorOptions {
    if let Some(view) = &args.view {
        options.view = view.clone();
    }
    if let Some(column) = &args.column {
        options.column = column.clone();
    }
    if let Some(style) = &args.style {
        options.numbering_style = style.clone();
    }
    if let Some(levels) = &args.label_levels {
        options.label_levels = levels.clone();
    }
    if let Some(levels) = &args.ignore_levels {
        options.ignore_levels = levels.clone();
    }
    options
}

#[instrument(skip(args), fields(outline = %args.outline.display()))]
fn cmd_renumber(config: Option<&Path>, args: &RenumberArgs) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let project = project_name(args);
    let options = apply_flags(settings.options_for(&project), args);
    let behavior_config = BehaviorConfig::parse(&options)?;
    debug!("options: {:?}", behavior_config);

    let mut workspace = MemoryWorkspace::new();
    let trees = workspace.add_project(&project, &[]);
    let tree = trees.get(behavior_config.view.tree_kind()).clone();
    load_outline(&args.outline, &tree, &behavior_config.column)?;

    let column = behavior_config.column.clone();
    let root_title = format!("{} ({})", project, behavior_config.view);
    let mut behavior = NumberingBehavior::attach(&workspace, behavior_config)?;
    let report = behavior.renumber()?;

    output::header(behavior.title());
    output::info(&to_tree_string(&tree, &column, &root_title));
    output::detail(&report);

    if args.write {
        write_outline(&args.outline, &tree, &column)?;
        output::success(&format!("wrote {}", args.outline.display()));
    }
    Ok(())
}

#[instrument]
fn cmd_check(config: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let all = settings.behavior_options();
    if all.is_empty() {
        output::warning("no behaviors configured");
        return Ok(());
    }

    let mut failed = 0;
    for options in &all {
        match BehaviorConfig::parse(options) {
            Ok(parsed) => output::success(&parsed.title()),
            Err(e) => {
                failed += 1;
                output::error(&format!("behavior for '{}'", options.project));
                output::failure(&e);
            }
        }
    }

    if failed > 0 {
        return Err(ApplicationError::Config {
            message: format!("{} of {} behaviors invalid", failed, all.len()),
        }
        .into());
    }
    Ok(())
}

#[instrument]
fn cmd_config(config: Option<&Path>, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(config)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
