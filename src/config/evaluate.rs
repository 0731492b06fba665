//! Evaluation of expressions embedded in the configuration document itself.

use super::types::Delimiters;
use super::walker::JsonPath;
use crate::error::{Error, Result};
use crate::renderer::ExpressionEvaluator;
use crate::scope::Scope;
use crate::template::line::eval_text;
use minijinja::{ErrorKind, Value};

/// Returns the expression source when `text` is exactly one delimited span.
fn single_span<'t>(text: &'t str, delimiters: &Delimiters) -> Option<&'t str> {
    let inner = text.strip_prefix(delimiters.start.as_str())?;
    let expression = inner.strip_suffix(delimiters.end.as_str())?;
    (!expression.contains(delimiters.end.as_str())).then_some(expression)
}

fn to_json(value: &Value) -> std::result::Result<serde_json::Value, minijinja::Error> {
    serde_json::to_value(value).map_err(|e| {
        minijinja::Error::new(
            ErrorKind::BadSerialization,
            format!("the result cannot be stored in the config: {e}"),
        )
    })
}

fn eval_string(
    text: &str,
    delimiters: &Delimiters,
    evaluator: &dyn ExpressionEvaluator,
    scope: &Scope,
) -> Result<serde_json::Value> {
    if let Some(expression) = single_span(text, delimiters) {
        return evaluator
            .evaluate(expression, scope)
            .and_then(|value| to_json(&value))
            .map_err(|source| Error::ExpressionEvaluationError {
                row: 1,
                expression: expression.to_string(),
                source,
            });
    }
    eval_text(text, delimiters, evaluator, scope).map(serde_json::Value::String)
}

/// Evaluates every string of `value`, descending into arrays and object values.
///
/// Object keys are left untouched. A string that is exactly one expression
/// span is replaced by the typed result of the expression.
///
/// # Arguments
/// * `value` - The raw configuration value
/// * `path` - Location of `value`, reported when evaluation fails
/// * `delimiters` - Tags marking the expressions
/// * `evaluator` - Engine used for the expressions
/// * `scope` - Bindings visible to the expressions
pub fn eval_json(
    value: &serde_json::Value,
    path: &JsonPath,
    delimiters: &Delimiters,
    evaluator: &dyn ExpressionEvaluator,
    scope: &Scope,
) -> Result<serde_json::Value> {
    match value {
        serde_json::Value::String(text) => eval_string(text, delimiters, evaluator, scope)
            .map_err(|source| Error::ConfigEvaluationError {
                json_path: path.to_string(),
                source: Box::new(source),
            }),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| eval_json(item, &path.index(index), delimiters, evaluator, scope))
            .collect::<Result<Vec<_>>>()
            .map(serde_json::Value::Array),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, item)| {
                eval_json(item, &path.key(key), delimiters, evaluator, scope)
                    .map(|evaluated| (key.clone(), evaluated))
            })
            .collect::<Result<serde_json::Map<_, _>>>()
            .map(serde_json::Value::Object),
        other => Ok(other.clone()),
    }
}
