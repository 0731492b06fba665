//! Template-specific command-line arguments
//!
//! - `schema`: validation of the `arg_config` declarations
//! - `parser`: `clap`-based parsing of the tokens given after `--`

pub mod parser;
pub mod schema;

pub use schema::{ArgumentKind, ArgumentSchema, Nargs, ParamSpec, ValueType};
