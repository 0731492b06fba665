//! Configuration loading and validation

use super::evaluate::eval_json;
use super::types::{Delimiters, FileClassification};
use super::walker::{JsonPath, JsonWalker};
use crate::arguments::ArgumentSchema;
use crate::constants::{config_keys, FILES_DIR_NAME};
use crate::error::{Error, Result};
use crate::ioutils::read_jsonc;
use crate::renderer::ExpressionEvaluator;
use crate::scope::ScopeBuilder;
use log::debug;
use std::path::{Path, PathBuf};

/// A template's validated `config.json`.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    description: Option<String>,
    files_path: PathBuf,
    can_override_patterns: Vec<String>,
    can_execute_patterns: Vec<String>,
    delimiters: Delimiters,
    scope: serde_json::Map<String, serde_json::Value>,
    arguments: ArgumentSchema,
    classification: FileClassification,
}

/// Field extraction with errors that point at the offending value.
struct FieldReader<'c> {
    config_path: &'c str,
}

impl FieldReader<'_> {
    fn invalid(&self, field: &str, walker: &JsonWalker<'_>) -> Error {
        Error::ConfigValidationError {
            field: field.to_string(),
            config_path: self.config_path.to_string(),
            json_path: walker.path().to_string(),
        }
    }

    fn optional_string(&self, field: &str, walker: &JsonWalker<'_>) -> Result<Option<String>> {
        match walker.data() {
            None => Ok(None),
            Some(serde_json::Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(self.invalid(field, walker)),
        }
    }

    fn string_list(&self, field: &str, walker: &JsonWalker<'_>) -> Result<Vec<String>> {
        if !walker.exists() {
            return Ok(Vec::new());
        }
        let elements = walker.elements().ok_or_else(|| self.invalid(field, walker))?;
        elements
            .iter()
            .map(|element| match element.data() {
                Some(serde_json::Value::String(text)) => Ok(text.clone()),
                _ => Err(self.invalid(field, element)),
            })
            .collect()
    }

    fn object(
        &self,
        field: &str,
        walker: &JsonWalker<'_>,
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        match walker.data() {
            None => Ok(serde_json::Map::new()),
            Some(serde_json::Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(self.invalid(field, walker)),
        }
    }
}

/// Evaluates every top-level entry except the delimiter fields, which are
/// read verbatim.
fn eval_document(
    raw: &serde_json::Map<String, serde_json::Value>,
    delimiters: &Delimiters,
    evaluator: &dyn ExpressionEvaluator,
    cwd_dir_name: &str,
) -> Result<serde_json::Value> {
    let scope = ScopeBuilder::with_builtins(cwd_dir_name).build();
    let root = JsonPath::root();
    raw.iter()
        .map(|(key, value)| -> Result<(String, serde_json::Value)> {
            let evaluated = if key == config_keys::CODE_START || key == config_keys::CODE_END {
                value.clone()
            } else {
                eval_json(value, &root.key(key), delimiters, evaluator, &scope)?
            };
            Ok((key.clone(), evaluated))
        })
        .collect::<Result<serde_json::Map<_, _>>>()
        .map(serde_json::Value::Object)
}

impl TemplateConfig {
    /// Loads, evaluates and validates the configuration at `path`.
    ///
    /// String values of the document may embed expressions written with the
    /// document's own delimiters; they are evaluated against the built-in
    /// bindings before the remaining fields are validated.
    ///
    /// # Arguments
    /// * `path` - Path of the template's `config.json`
    /// * `cwd_dir_name` - Base name of the working directory, bound as `cwd_dir_name`
    /// * `evaluator` - Engine used for the embedded expressions
    pub fn from_json_path<P: AsRef<Path>>(
        path: P,
        cwd_dir_name: &str,
        evaluator: &dyn ExpressionEvaluator,
    ) -> Result<Self> {
        let path = path.as_ref();
        let config_path = path.display().to_string();
        debug!("Loading template config from '{config_path}'");

        let raw = read_jsonc(path)?;
        let reader = FieldReader { config_path: &config_path };
        let raw_root = JsonWalker::new(&raw);
        let Some(raw_map) = raw.as_object() else {
            return Err(reader.invalid("config", &raw_root));
        };

        let start =
            reader.optional_string(config_keys::CODE_START, &raw_root.get(config_keys::CODE_START))?;
        let end =
            reader.optional_string(config_keys::CODE_END, &raw_root.get(config_keys::CODE_END))?;
        let defaults = Delimiters::default();
        let delimiters =
            Delimiters::new(start.unwrap_or(defaults.start), end.unwrap_or(defaults.end))?;

        let evaluated = eval_document(raw_map, &delimiters, evaluator, cwd_dir_name)?;
        let root = JsonWalker::new(&evaluated);

        let description =
            reader.optional_string(config_keys::DESCRIPTION, &root.get(config_keys::DESCRIPTION))?;
        let can_override_patterns =
            reader.string_list(config_keys::CAN_OVERRIDE, &root.get(config_keys::CAN_OVERRIDE))?;
        let can_execute_patterns =
            reader.string_list(config_keys::CAN_EXECUTE, &root.get(config_keys::CAN_EXECUTE))?;

        let scope = reader.object(config_keys::SCOPE, &root.get(config_keys::SCOPE))?;
        let arguments =
            ArgumentSchema::from_json(&root.get(config_keys::ARG_CONFIG), &config_path)?;

        let files_path = path.parent().unwrap_or_else(|| Path::new("")).join(FILES_DIR_NAME);
        let classification = FileClassification::compute(
            &files_path,
            &can_override_patterns,
            &can_execute_patterns,
        )?;

        Ok(Self {
            description,
            files_path,
            can_override_patterns,
            can_execute_patterns,
            delimiters,
            scope,
            arguments,
            classification,
        })
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The template's `files/` directory.
    pub fn files_path(&self) -> &Path {
        &self.files_path
    }

    pub fn can_override_patterns(&self) -> &[String] {
        &self.can_override_patterns
    }

    pub fn can_execute_patterns(&self) -> &[String] {
        &self.can_execute_patterns
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// The static `scope` bindings, after evaluation.
    pub fn scope(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.scope
    }

    pub fn arguments(&self) -> &ArgumentSchema {
        &self.arguments
    }

    pub fn classification(&self) -> &FileClassification {
        &self.classification
    }
}
