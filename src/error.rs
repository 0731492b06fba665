use crate::constants::exit_codes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk the template files. Original error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Invalid glob pattern '{pattern}'. Original error: {source}")]
    InvalidGlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to parse config file '{path}'. Original error: {message}")]
    ConfigParseError { path: String, message: String },

    /// A config field has the wrong shape or type.
    #[error("Invalid value for \"{field}\".\nPath: {config_path}\nJSON path: {json_path}")]
    ConfigValidationError { field: String, config_path: String, json_path: String },

    #[error("The value for \"{field}\" cannot be empty.")]
    DelimiterConfigError { field: String },

    #[error("Failed to evaluate the config value at {json_path}.\n{source}")]
    ConfigEvaluationError { json_path: String, source: Box<Error> },

    #[error(
        "Missing closing tag for expression.\nText row: {row}\nText column: {column}\nLine: {line}\nOpening tag: {start}\nClosing tag: {end}"
    )]
    UnterminatedExpression {
        row: usize,
        column: usize,
        line: String,
        start: String,
        end: String,
    },

    #[error("Failed to evaluate expression `{expression}` (text row {row}). Original error: {source}")]
    ExpressionEvaluationError {
        row: usize,
        expression: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to evaluate template file '{path}'.\n{source}")]
    TemplateFileError { path: String, source: Box<Error> },

    #[error("Invalid argument declaration at {json_path}: {message}")]
    ArgumentSchemaError { json_path: String, message: String },

    /// Rendered, user-facing message of the argument parser.
    #[error("{0}")]
    ArgumentParsingError(String),

    #[error("File already exists.\nPath: {path}")]
    DestinationConflict { path: String },

    #[error("Cannot override directory with file.\nPath: {path}")]
    CannotOverrideDirectory { path: String },

    #[error("Template \"{name}\" not found.\nTemplates installation path: {templates_dir}")]
    TemplateNotFound { name: String, templates_dir: String },

    #[error("No templates are installed.\nTemplates installation path: {path}")]
    TemplatesDirectoryMissing { path: String },

    #[error(
        "Failed to load the config of template \"{template}\".\nPath: {template_path}\n\nThe failure was caused by the following error:\n{source}"
    )]
    ConfigLoadError { template: String, template_path: String, source: Box<Error> },

    #[error("Could not determine the application data directory.")]
    DataDirectoryUnavailable,
}

/// Convenience type alias for Results with this crate's error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(exit_codes::FAILURE);
}
