/// Declarative template arguments and their parsing.
pub mod arguments;

/// Handles argument parsing.
pub mod cli;

/// Template configuration loading and validation.
pub mod config;

/// Constants used throughout the application.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Expression evaluation for embedded template code.
pub mod renderer;

/// The evaluation scope shared by every expression of a build.
pub mod scope;

/// Location and listing of installed templates.
pub mod store;

/// Core template processing orchestration.
pub mod template;
