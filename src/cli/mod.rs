pub mod args;
pub mod runner;

pub use args::{get_cli, get_log_level_from_verbose, BuildArgs, Cli, Commands};
pub use runner::{build, list, run, BuildRequest};
