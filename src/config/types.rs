//! Basic types for template configuration

use crate::constants::{config_keys, DEFAULT_CODE_END, DEFAULT_CODE_START};
use crate::error::{Error, Result};
use crate::ioutils::to_slash_path;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Opening and closing tags of an embedded expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub start: String,
    pub end: String,
}

impl Delimiters {
    /// Both tags must be non-empty.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self> {
        let (start, end) = (start.into(), end.into());
        if start.is_empty() {
            return Err(Error::DelimiterConfigError { field: config_keys::CODE_START.into() });
        }
        if end.is_empty() {
            return Err(Error::DelimiterConfigError { field: config_keys::CODE_END.into() });
        }
        Ok(Self { start, end })
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self { start: DEFAULT_CODE_START.to_string(), end: DEFAULT_CODE_END.to_string() }
    }
}

/// Template files and the subsets selected by the `can_override` and
/// `can_execute` globs, all relative to the template's `files/` directory.
///
/// Computed once when the configuration is built and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileClassification {
    files: Vec<PathBuf>,
    can_override: BTreeSet<PathBuf>,
    can_execute: BTreeSet<PathBuf>,
}

impl FileClassification {
    /// Walks `files_root` and matches every file against both pattern lists.
    ///
    /// A missing `files_root` is treated as an empty tree.
    pub fn compute<P: AsRef<Path>>(
        files_root: P,
        can_override: &[String],
        can_execute: &[String],
    ) -> Result<Self> {
        let files_root = files_root.as_ref();
        let override_set = build_glob_set(can_override)?;
        let execute_set = build_glob_set(can_execute)?;
        let files = walk_files(files_root)?;

        let matching = |set: &GlobSet| -> BTreeSet<PathBuf> {
            files.iter().filter(|file| set.is_match(to_slash_path(file))).cloned().collect()
        };
        let classification = Self {
            can_override: matching(&override_set),
            can_execute: matching(&execute_set),
            files,
        };
        debug!(
            "Classified {} template files: {} can override, {} can execute",
            classification.files.len(),
            classification.can_override.len(),
            classification.can_execute.len()
        );
        Ok(classification)
    }

    /// Every template file, in walk order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn can_override(&self) -> &BTreeSet<PathBuf> {
        &self.can_override
    }

    pub fn can_execute(&self) -> &BTreeSet<PathBuf> {
        &self.can_execute
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        debug!("Adding pattern: {pattern} to globset");
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| Error::InvalidGlobPattern { pattern: pattern.clone(), source })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|source| Error::InvalidGlobPattern { pattern: patterns.join(", "), source })
}

/// Relative paths of all files below `root`, sorted by name within each directory.
fn walk_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        debug!("Template files directory '{}' does not exist", root.display());
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).map_err(std::io::Error::other)?;
        files.push(relative.to_path_buf());
    }
    Ok(files)
}
