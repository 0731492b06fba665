//! Template configuration
//!
//! This module contains the configuration system components:
//! - `walker`: path-tracking navigation over JSON documents
//! - `types`: delimiters and the precomputed file classification
//! - `evaluate`: evaluation of expressions embedded in the document
//! - `loader`: loading and validation of `config.json`

pub mod evaluate;
pub mod loader;
pub mod types;
pub mod walker;

// Re-export commonly used types for convenience
pub use loader::TemplateConfig;
pub use types::{Delimiters, FileClassification};
pub use walker::{JsonPath, JsonWalker};
