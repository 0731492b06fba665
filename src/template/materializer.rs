use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::operation::TemplateOperation;
use super::processor::TemplateProcessor;

/// Files touched by a finished build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub written: Vec<PathBuf>,
    pub copied: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Executes [`TemplateOperation`]s against the filesystem.
#[derive(Debug, Default)]
pub struct Materializer;

impl Materializer {
    pub fn new() -> Self {
        Self
    }

    /// Processes and executes every file in order, stopping at the first error.
    ///
    /// # Arguments
    /// * `processor` - Decides the operation of each file
    /// * `files` - Paths relative to the template's `files/` directory
    pub fn materialize<P: AsRef<Path>>(
        &self,
        processor: &TemplateProcessor<'_>,
        files: &[P],
    ) -> Result<BuildSummary> {
        let mut summary = BuildSummary::default();
        for file in files {
            let operation = processor.process(file)?;
            self.execute(&operation)?;
            info!("{}", operation.get_message());

            let target = operation.target_path().clone();
            match operation {
                TemplateOperation::Copy { .. } => summary.copied.push(target),
                TemplateOperation::Write { .. } => summary.written.push(target),
                TemplateOperation::Skip { .. } => summary.skipped.push(target),
            }
        }
        Ok(summary)
    }

    /// Handles a single file operation.
    pub fn execute(&self, operation: &TemplateOperation) -> Result<()> {
        debug!("Handling file operation: {}", operation.error_context());
        match operation {
            TemplateOperation::Copy { source, target, .. } => {
                self.prepare_target(target)?;
                fs::copy(source, target)?;
                Ok(())
            }
            TemplateOperation::Write { target, content, .. } => {
                self.prepare_target(target)?;
                fs::write(target, content).map_err(Error::from)
            }
            TemplateOperation::Skip { .. } => Ok(()),
        }
    }

    /// Creates the parent directories and removes a file already at `target`.
    fn prepare_target(&self, target: &Path) -> Result<()> {
        if target.is_dir() {
            return Err(Error::CannotOverrideDirectory { path: target.display().to_string() });
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        if target.symlink_metadata().is_ok() {
            fs::remove_file(target)?;
        }
        Ok(())
    }
}
