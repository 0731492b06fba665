//! Evaluation scope for embedded expressions
//!
//! Bindings are layered from lowest to highest precedence:
//! built-ins, the config's static `scope`, then the template arguments.

pub mod builtins;

use indexmap::IndexMap;
use minijinja::Value;

use crate::constants::builtins::{CWD_DIR_NAME, MATH, UUID};
use builtins::{MathNamespace, UuidNamespace};

/// Frozen name → value environment shared by every expression of a build.
#[derive(Debug, Clone)]
pub struct Scope {
    bindings: IndexMap<String, Value>,
    context: Value,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// The bindings as a single map value, ready to be used as an evaluation context.
    pub fn as_context(&self) -> &Value {
        &self.context
    }
}

/// Collects bindings until [`ScopeBuilder::build`] freezes them into a [`Scope`].
#[derive(Debug, Default)]
pub struct ScopeBuilder {
    bindings: IndexMap<String, Value>,
}

impl ScopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the builder with the bindings every template can use.
    ///
    /// # Arguments
    /// * `cwd_dir_name` - Base name of the directory the build runs in
    pub fn with_builtins(cwd_dir_name: &str) -> Self {
        let mut builder = Self::new();
        builder.insert(MATH, Value::from_object(MathNamespace));
        builder.insert(UUID, Value::from_object(UuidNamespace));
        builder.insert(CWD_DIR_NAME, Value::from(cwd_dir_name));
        builder
    }

    /// Adds a binding, shadowing any previous binding with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.bindings.insert(name.into(), value);
        self
    }

    pub fn extend<I>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.bindings.extend(bindings);
        self
    }

    /// Adds JSON bindings such as the config's static `scope`.
    pub fn extend_json(self, bindings: &serde_json::Map<String, serde_json::Value>) -> Self {
        self.extend(
            bindings
                .iter()
                .map(|(name, value)| (name.clone(), Value::from_serialize(value))),
        )
    }

    pub fn build(self) -> Scope {
        let context = Value::from_iter(
            self.bindings.iter().map(|(name, value)| (name.clone(), value.clone())),
        );
        Scope { bindings: self.bindings, context }
    }
}
