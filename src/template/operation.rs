use std::path::PathBuf;

/// What to do with one template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOperation {
    /// Byte copy of a file that is not evaluated.
    Copy { source: PathBuf, target: PathBuf, target_exists: bool },
    /// Write of an evaluated file.
    Write { source: PathBuf, target: PathBuf, content: String, target_exists: bool },
    /// A conflicting destination left untouched.
    Skip { target: PathBuf },
}

impl TemplateOperation {
    /// Returns the destination path of this operation.
    pub fn target_path(&self) -> &PathBuf {
        match self {
            TemplateOperation::Copy { target, .. }
            | TemplateOperation::Write { target, .. }
            | TemplateOperation::Skip { target } => target,
        }
    }

    /// Returns a brief description of this operation for error messages.
    ///
    /// # Returns
    /// * `String` - A concise description including the operation type and paths
    pub fn error_context(&self) -> String {
        match self {
            TemplateOperation::Copy { source, target, .. } => {
                format!("copy '{}' -> '{}'", source.display(), target.display())
            }
            TemplateOperation::Write { source, target, .. } => {
                format!("write '{}' -> '{}'", source.display(), target.display())
            }
            TemplateOperation::Skip { target } => format!("skip '{}'", target.display()),
        }
    }

    /// Gets a message describing the operation and its status.
    ///
    /// # Returns
    /// * `String` - A descriptive message about the operation
    pub fn get_message(&self) -> String {
        match self {
            TemplateOperation::Copy { source, target, target_exists } => {
                if *target_exists {
                    format!(
                        "Copying '{}' to '{}' (overwriting existing file)",
                        source.display(),
                        target.display()
                    )
                } else {
                    format!("Copying '{}' to '{}'", source.display(), target.display())
                }
            }
            TemplateOperation::Write { target, target_exists, .. } => {
                if *target_exists {
                    format!("Writing to '{}' (overwriting existing file)", target.display())
                } else {
                    format!("Writing to '{}'", target.display())
                }
            }
            TemplateOperation::Skip { target } => {
                format!("Skipping '{}' (target already exists)", target.display())
            }
        }
    }
}
