use crate::{renderer::interface::ExpressionEvaluator, scope::Scope};
use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior, Value};

/// MiniJinja-based expression evaluator.
///
/// Expressions use the MiniJinja expression syntax: arithmetic, comparisons,
/// literals, filters, attribute access and method calls. Referencing a name
/// that is not bound in the scope is an error.
pub struct MiniJinjaEvaluator {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaEvaluator {
    /// Creates a new MiniJinjaEvaluator with strict undefined handling.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }
}

impl Default for MiniJinjaEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEvaluator for MiniJinjaEvaluator {
    fn evaluate(&self, expression: &str, scope: &Scope) -> Result<Value, Error> {
        let compiled = self.env.compile_expression(expression)?;
        let value = compiled.eval(scope.as_context())?;
        if value.is_undefined() {
            return Err(Error::new(
                ErrorKind::UndefinedError,
                format!("`{}` is not defined", expression.trim()),
            ));
        }
        log::trace!("Evaluated `{expression}` to {value:?}");
        Ok(value)
    }
}
