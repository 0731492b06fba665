use crate::scope::Scope;
use minijinja::Value;

/// Trait for expression evaluation engines.
pub trait ExpressionEvaluator {
    /// Evaluates a single expression against the scope.
    ///
    /// # Arguments
    /// * `expression` - Source text found between the delimiters
    /// * `scope` - Bindings visible to the expression
    ///
    /// # Returns
    /// * `Result<Value, minijinja::Error>` - The resulting value, or the cause of the failure
    fn evaluate(&self, expression: &str, scope: &Scope) -> Result<Value, minijinja::Error>;
}
