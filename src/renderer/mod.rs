//! Expression evaluation for embedded template code
//!
//! The module is structured as:
//! - `interface`: the `ExpressionEvaluator` trait the rest of the crate depends on
//! - `minijinja`: MiniJinja-based implementation of the evaluator

pub mod interface;
pub mod minijinja;

pub use interface::ExpressionEvaluator;
pub use minijinja::MiniJinjaEvaluator;

/// Convenience function to create the default expression evaluator
pub fn new_evaluator() -> impl ExpressionEvaluator {
    MiniJinjaEvaluator::new()
}
