use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TemplateConfig;
use crate::error::{Error, Result};
use crate::renderer::ExpressionEvaluator;
use crate::scope::Scope;

use super::line::eval_text;
use super::operation::TemplateOperation;

/// Decides, file by file, how the template is materialized into `output_root`.
pub struct TemplateProcessor<'a> {
    /// Dependencies
    config: &'a TemplateConfig,
    evaluator: &'a dyn ExpressionEvaluator,
    scope: &'a Scope,

    /// Other
    output_root: PathBuf,
    skip_conflicts: bool,
}

impl<'a> TemplateProcessor<'a> {
    pub fn new<P: AsRef<Path>>(
        config: &'a TemplateConfig,
        evaluator: &'a dyn ExpressionEvaluator,
        scope: &'a Scope,
        output_root: P,
        skip_conflicts: bool,
    ) -> Self {
        Self {
            config,
            evaluator,
            scope,
            output_root: output_root.as_ref().to_path_buf(),
            skip_conflicts,
        }
    }

    /// Evaluates every line of an executable template file.
    fn evaluate_file(&self, source: &Path) -> Result<String> {
        let wrap = |e: Error| Error::TemplateFileError {
            path: source.display().to_string(),
            source: Box::new(e),
        };
        let text = fs::read_to_string(source).map_err(|e| wrap(e.into()))?;
        eval_text(&text, self.config.delimiters(), self.evaluator, self.scope).map_err(wrap)
    }

    /// Processes a template file and determines the appropriate operation.
    ///
    /// # Arguments
    /// * `relative_path` - Path of the file relative to the template's `files/` directory
    ///
    /// # Returns
    /// * `Result<TemplateOperation>` - The operation to perform, or
    ///   `DestinationConflict` when the destination exists and may not be overridden
    pub fn process<P: AsRef<Path>>(&self, relative_path: P) -> Result<TemplateOperation> {
        let relative_path = relative_path.as_ref();
        let classification = self.config.classification();
        let source = self.config.files_path().join(relative_path);
        let target = self.output_root.join(relative_path);
        let target_exists = target.exists();

        if target_exists && !classification.can_override().contains(relative_path) {
            if self.skip_conflicts {
                warn!("Skipping '{}': the file already exists", target.display());
                return Ok(TemplateOperation::Skip { target });
            }
            return Err(Error::DestinationConflict { path: target.display().to_string() });
        }

        if classification.can_execute().contains(relative_path) {
            let content = self.evaluate_file(&source)?;
            return Ok(TemplateOperation::Write { source, target, content, target_exists });
        }
        Ok(TemplateOperation::Copy { source, target, target_exists })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MiniJinjaEvaluator;
    use crate::scope::ScopeBuilder;
    use tempfile::TempDir;

    struct Fixture {
        template: TempDir,
        output: TempDir,
        config: TemplateConfig,
    }

    /// The template structure
    /// template_root/
    ///   config.json
    ///   files/
    ///     a.txt      "Hello <<<1+1>>>!"
    ///     logo.bin   raw bytes
    ///     out.txt    "generated"
    ///     README.md  "readme"
    fn fixture(config: &str) -> Fixture {
        let template = TempDir::new().unwrap();
        let files = template.path().join("files");
        fs::create_dir_all(&files).unwrap();
        fs::write(files.join("a.txt"), "Hello <<<1+1>>>!").unwrap();
        fs::write(files.join("logo.bin"), [0xffu8, 0x00, 0xfe]).unwrap();
        fs::write(files.join("out.txt"), "generated").unwrap();
        fs::write(files.join("README.md"), "readme").unwrap();
        fs::write(template.path().join("config.json"), config).unwrap();

        let config = TemplateConfig::from_json_path(
            template.path().join("config.json"),
            "demo",
            &MiniJinjaEvaluator::new(),
        )
        .unwrap();
        Fixture { template, output: TempDir::new().unwrap(), config }
    }

    fn process(fixture: &Fixture, file: &str, skip_conflicts: bool) -> Result<TemplateOperation> {
        let evaluator = MiniJinjaEvaluator::new();
        let scope = ScopeBuilder::with_builtins("demo").build();
        let processor = TemplateProcessor::new(
            &fixture.config,
            &evaluator,
            &scope,
            fixture.output.path(),
            skip_conflicts,
        );
        processor.process(file)
    }

    #[test]
    fn executable_files_are_evaluated() {
        let fixture = fixture(r#"{ "can_execute": ["*.txt"] }"#);
        match process(&fixture, "a.txt", false).unwrap() {
            TemplateOperation::Write { source, target, content, target_exists } => {
                assert_eq!(source, fixture.template.path().join("files").join("a.txt"));
                assert_eq!(target, fixture.output.path().join("a.txt"));
                assert_eq!(content, "Hello 2!");
                assert!(!target_exists);
            }
            other => panic!("Expected Write operation, got {other:?}"),
        }
    }

    #[test]
    fn other_files_are_copied() {
        let fixture = fixture(r#"{ "can_execute": ["*.txt"] }"#);
        match process(&fixture, "logo.bin", false).unwrap() {
            TemplateOperation::Copy { target, target_exists, .. } => {
                assert_eq!(target, fixture.output.path().join("logo.bin"));
                assert!(!target_exists);
            }
            other => panic!("Expected Copy operation, got {other:?}"),
        }
    }

    #[test]
    fn existing_destination_is_a_conflict() {
        let fixture = fixture("{}");
        fs::write(fixture.output.path().join("out.txt"), "user data").unwrap();

        match process(&fixture, "out.txt", false) {
            Err(Error::DestinationConflict { path }) => assert!(path.ends_with("out.txt")),
            other => panic!("Expected DestinationConflict, got {other:?}"),
        }
    }

    #[test]
    fn conflicts_can_be_skipped() {
        let fixture = fixture("{}");
        let target = fixture.output.path().join("out.txt");
        fs::write(&target, "user data").unwrap();

        assert_eq!(
            process(&fixture, "out.txt", true).unwrap(),
            TemplateOperation::Skip { target }
        );
    }

    #[test]
    fn overridable_destinations_are_rewritten() {
        let fixture = fixture(r#"{ "can_override": ["*.md"], "can_execute": ["*.md"] }"#);
        fs::write(fixture.output.path().join("README.md"), "old").unwrap();

        match process(&fixture, "README.md", false).unwrap() {
            TemplateOperation::Write { content, target_exists, .. } => {
                assert_eq!(content, "readme");
                assert!(target_exists);
            }
            other => panic!("Expected Write operation, got {other:?}"),
        }
    }

    #[test]
    fn evaluation_errors_name_the_file() {
        let fixture = fixture(r#"{ "can_execute": ["*.txt"] }"#);
        fs::write(fixture.template.path().join("files").join("out.txt"), "x\n<<<oops").unwrap();

        match process(&fixture, "out.txt", false) {
            Err(Error::TemplateFileError { path, source }) => {
                assert!(path.ends_with("out.txt"));
                assert!(matches!(*source, Error::UnterminatedExpression { row: 2, column: 0, .. }));
            }
            other => panic!("Expected TemplateFileError, got {other:?}"),
        }
    }
}
