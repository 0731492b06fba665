use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// project-template - Create projects from installed templates.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the installed templates.
    #[arg(long = "templates-dir", value_name = "DIR", global = true)]
    pub templates_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a project in the current directory from a template.
    Build(BuildArgs),

    /// List installed templates.
    #[command(visible_alias = "ls")]
    List,
}

/// Arguments for the build command.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs {
    /// Name of the installed template.
    #[arg(value_name = "TEMPLATE")]
    pub template_name: String,

    /// Leave existing files that may not be overridden untouched instead of failing.
    #[arg(long = "skip-conflicts")]
    pub skip_conflicts: bool,

    /// Arguments declared by the template, given after `--`.
    #[arg(last = true, value_name = "TEMPLATE_ARGS")]
    pub template_args: Vec<String>,
}

/// Parse command line arguments, printing the help when no command is given.
pub fn get_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if matches!(
            e.kind(),
            ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ) {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Warn,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
