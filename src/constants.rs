//! Constants used throughout the application

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "project-template";

/// Directory holding the installed templates, relative to the application directory.
pub const TEMPLATES_DIR_NAME: &str = "templates";

/// Configuration document expected at the root of every template.
pub const CONFIG_FILENAME: &str = "config.json";

/// Sub-directory of a template holding the files to materialize.
pub const FILES_DIR_NAME: &str = "files";

/// Default opening tag of an embedded expression
pub const DEFAULT_CODE_START: &str = "<<<";

/// Default closing tag of an embedded expression
pub const DEFAULT_CODE_END: &str = ">>>";

/// Placeholders used by `list`
pub mod description {
    pub const MISSING: &str = "[No description]";
    pub const INVALID: &str = "[Invalid description]";
}

/// Top-level keys of `config.json`
pub mod config_keys {
    pub const DESCRIPTION: &str = "description";
    pub const CAN_OVERRIDE: &str = "can_override";
    pub const CAN_EXECUTE: &str = "can_execute";
    pub const CODE_START: &str = "python_code_start";
    pub const CODE_END: &str = "python_code_end";
    pub const SCOPE: &str = "scope";
    pub const ARG_CONFIG: &str = "arg_config";
}

/// Keys of a single `arg_config` entry
pub mod arg_keys {
    pub const DEFAULT: &str = "default";
    pub const TYPE: &str = "type";
    pub const NARGS: &str = "nargs";
    pub const HELP: &str = "help";
    pub const REQUIRED: &str = "required";
}

/// Names of the built-in scope bindings
pub mod builtins {
    pub const MATH: &str = "math";
    pub const UUID: &str = "uuid";
    pub const CWD_DIR_NAME: &str = "cwd_dir_name";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
