//! Template store for locating and listing installed templates.
//!
//! Every template is a directory under the store holding a `config.json`
//! and a `files/` tree.

use crate::constants::{
    config_keys, description, APP_DIR_NAME, CONFIG_FILENAME, TEMPLATES_DIR_NAME,
};
use crate::error::{Error, Result};
use crate::ioutils::{dir_name, read_jsonc};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Name and description of an installed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub name: String,
    pub description: String,
}

/// Result of listing the store: the readable templates plus one message per
/// template whose configuration could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateListing {
    pub templates: Vec<TemplateSummary>,
    pub errors: Vec<String>,
}

/// Locates the installed templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    /// Root directory for the template store.
    store_dir: PathBuf,
}

impl TemplateStore {
    /// Creates a new TemplateStore using the default data directory.
    ///
    /// The store is located at:
    /// - Linux: `~/.local/share/project-template/templates`
    /// - macOS: `~/Library/Application Support/project-template/templates`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\project-template\templates`
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or(Error::DataDirectoryUnavailable)?;
        let store_dir = data_dir.join(APP_DIR_NAME).join(TEMPLATES_DIR_NAME);
        debug!("Using template store at: {}", store_dir.display());
        Ok(Self { store_dir })
    }

    /// Creates a TemplateStore with a custom directory.
    pub fn with_dir<P: Into<PathBuf>>(store_dir: P) -> Self {
        let store_dir = store_dir.into();
        debug!("Using template store at: {}", store_dir.display());
        Self { store_dir }
    }

    /// Fails with `TemplatesDirectoryMissing` when the store does not exist.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.store_dir.is_dir() {
            return Ok(());
        }
        Err(Error::TemplatesDirectoryMissing { path: self.store_dir.display().to_string() })
    }

    /// Returns the root directory of the template called `name`.
    pub fn template_root(&self, name: &str) -> Result<PathBuf> {
        let root = self.store_dir.join(name);
        if name.is_empty() || !root.is_dir() {
            return Err(Error::TemplateNotFound {
                name: name.to_string(),
                templates_dir: self.store_dir.display().to_string(),
            });
        }
        Ok(root)
    }

    /// Lists the installed templates sorted by name.
    ///
    /// Descriptions are read without evaluating embedded expressions.
    pub fn list(&self) -> Result<TemplateListing> {
        self.ensure_exists()?;

        let mut roots = Vec::new();
        for entry in fs::read_dir(&self.store_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                roots.push(path);
            }
        }
        roots.sort();

        let mut listing = TemplateListing::default();
        for root in roots {
            let name = dir_name(&root);
            match read_description(&root.join(CONFIG_FILENAME)) {
                Ok(description) => listing.templates.push(TemplateSummary { name, description }),
                Err(e) => {
                    debug!("Failed to read the config of '{}': {e}", root.display());
                    listing.errors.push(format!("{name}: {e}"));
                }
            }
        }
        Ok(listing)
    }
}

fn read_description(config_path: &Path) -> Result<String> {
    let config = read_jsonc(config_path)?;
    Ok(match config.get(config_keys::DESCRIPTION) {
        None => description::MISSING.to_string(),
        Some(serde_json::Value::String(text)) => text.replace('\r', "").replace('\n', " "),
        Some(_) => description::INVALID.to_string(),
    })
}
