//! Scanning of text for delimited expressions.

use crate::config::Delimiters;
use crate::error::{Error, Result};
use crate::renderer::ExpressionEvaluator;
use crate::scope::Scope;

#[derive(Clone, Copy)]
enum ScanState {
    Literal,
    /// Inside an expression whose opening tag starts at `tag_column`.
    Expression { tag_column: usize },
}

/// Replaces every delimited span of `line` with the evaluated expression.
///
/// There is no nesting: an opening tag inside an expression is part of the
/// expression source.
///
/// # Arguments
/// * `line` - The text to scan, including its line terminator if any
/// * `row` - 1-indexed row of the line, used for error reporting
/// * `delimiters` - Opening and closing tags
/// * `evaluator` - Engine used for the expression spans
/// * `scope` - Bindings visible to the expressions
///
/// # Returns
/// * `Result<String>` - The line with all spans substituted
pub fn eval_line(
    line: &str,
    row: usize,
    delimiters: &Delimiters,
    evaluator: &dyn ExpressionEvaluator,
    scope: &Scope,
) -> Result<String> {
    let mut output = String::with_capacity(line.len());
    let mut state = ScanState::Literal;
    let mut cursor = 0;

    loop {
        let remaining = &line[cursor..];
        match state {
            ScanState::Literal => {
                let Some(split) = remaining.find(delimiters.start.as_str()) else {
                    output.push_str(remaining);
                    break;
                };
                output.push_str(&remaining[..split]);
                state = ScanState::Expression { tag_column: cursor + split };
                cursor += split + delimiters.start.len();
            }
            ScanState::Expression { tag_column } => {
                let Some(split) = remaining.find(delimiters.end.as_str()) else {
                    return Err(Error::UnterminatedExpression {
                        row,
                        column: tag_column,
                        line: line.trim_end_matches(['\r', '\n']).to_string(),
                        start: delimiters.start.clone(),
                        end: delimiters.end.clone(),
                    });
                };
                let expression = &remaining[..split];
                let value = evaluator.evaluate(expression, scope).map_err(|source| {
                    Error::ExpressionEvaluationError {
                        row,
                        expression: expression.to_string(),
                        source,
                    }
                })?;
                output.push_str(&value.to_string());
                state = ScanState::Literal;
                cursor += split + delimiters.end.len();
            }
        }
    }
    Ok(output)
}

/// Runs [`eval_line`] over every line of `text`, keeping line terminators.
pub fn eval_text(
    text: &str,
    delimiters: &Delimiters,
    evaluator: &dyn ExpressionEvaluator,
    scope: &Scope,
) -> Result<String> {
    text.split_inclusive('\n')
        .enumerate()
        .map(|(index, line)| eval_line(line, index + 1, delimiters, evaluator, scope))
        .collect()
}
