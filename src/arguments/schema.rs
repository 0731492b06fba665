//! Declarative argument schema read from `arg_config`.

use crate::config::walker::JsonWalker;
use crate::constants::{arg_keys, config_keys};
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Primitive type of an argument value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueType {
    #[default]
    Str,
    Int,
    Float,
    Bool,
}

impl ValueType {
    /// Names accepted by the `type` field.
    pub const ALLOWED: &'static [&'static str] = &["str", "int", "float", "bool"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "str" => Some(ValueType::Str),
            "int" => Some(ValueType::Int),
            "float" => Some(ValueType::Float),
            "bool" => Some(ValueType::Bool),
            _ => None,
        }
    }
}

/// Number of values an argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    /// An exact number of values, bound as a list
    Exact(usize),
    /// `?`: zero or one value, bound as a single value
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Nargs {
    /// Markers accepted by the `nargs` field besides positive integers.
    pub const MARKERS: &'static [&'static str] = &["?", "*", "+"];

    /// Whether the parsed values are bound as a list.
    pub fn is_list(&self) -> bool {
        !matches!(self, Nargs::Optional)
    }
}

/// How an argument appears on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentKind {
    /// `--name`
    Long(String),
    /// `-n`
    Short(char),
    Positional,
}

/// One declared argument.
///
/// Every field besides the name is optional; `None` leaves the choice to the
/// argument parser.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// The key as written in `arg_config`, e.g. `--count`
    pub name: String,
    /// The scope binding the value is stored under, e.g. `count`
    pub binding: String,
    pub kind: ArgumentKind,
    pub default: Option<serde_json::Value>,
    pub value_type: Option<ValueType>,
    pub nargs: Option<Nargs>,
    pub help: Option<String>,
    pub required: Option<bool>,
}

impl ParamSpec {
    /// Positionals are required unless their arity allows zero values.
    pub fn is_required(&self) -> bool {
        match self.kind {
            ArgumentKind::Positional => {
                !matches!(self.nargs, Some(Nargs::Optional) | Some(Nargs::ZeroOrMore))
            }
            _ => self.required.unwrap_or(false),
        }
    }

    fn has_fixed_single_value(&self) -> bool {
        matches!(self.nargs, None | Some(Nargs::Exact(1)))
    }
}

/// Ordered list of declared arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentSchema {
    params: Vec<ParamSpec>,
}

fn schema_error(walker: &JsonWalker<'_>, message: impl Into<String>) -> Error {
    Error::ArgumentSchemaError { json_path: walker.path().to_string(), message: message.into() }
}

/// Splits an argument key into its kind and scope binding.
fn parse_name(name: &str) -> Option<(ArgumentKind, String)> {
    if let Some(long) = name.strip_prefix("--") {
        if long.is_empty() || long.starts_with('-') {
            return None;
        }
        return Some((ArgumentKind::Long(long.to_string()), long.replace('-', "_")));
    }
    if let Some(short) = name.strip_prefix('-') {
        let mut chars = short.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' => Some((ArgumentKind::Short(c), c.to_string())),
            _ => None,
        };
    }
    if name.is_empty() {
        return None;
    }
    Some((ArgumentKind::Positional, name.to_string()))
}

fn parse_type(walker: &JsonWalker<'_>) -> Result<Option<ValueType>> {
    let Some(data) = walker.data() else {
        return Ok(None);
    };
    data.as_str().and_then(ValueType::from_name).map(Some).ok_or_else(|| {
        schema_error(
            walker,
            format!("\"type\" must be one of: {}", ValueType::ALLOWED.join(", ")),
        )
    })
}

fn parse_nargs(walker: &JsonWalker<'_>) -> Result<Option<Nargs>> {
    let Some(data) = walker.data() else {
        return Ok(None);
    };
    let nargs = match (data.as_u64(), data.as_str()) {
        (Some(count), _) if count > 0 => usize::try_from(count).ok().map(Nargs::Exact),
        (_, Some("?")) => Some(Nargs::Optional),
        (_, Some("*")) => Some(Nargs::ZeroOrMore),
        (_, Some("+")) => Some(Nargs::OneOrMore),
        _ => None,
    };
    nargs.map(Some).ok_or_else(|| {
        schema_error(
            walker,
            format!(
                "\"nargs\" must be a positive integer or one of: {}",
                Nargs::MARKERS.join(", ")
            ),
        )
    })
}

fn parse_help(walker: &JsonWalker<'_>) -> Result<Option<String>> {
    match walker.data() {
        None => Ok(None),
        Some(serde_json::Value::String(help)) => Ok(Some(help.clone())),
        Some(_) => Err(schema_error(walker, "\"help\" must be a string")),
    }
}

fn parse_required(walker: &JsonWalker<'_>) -> Result<Option<bool>> {
    match walker.data() {
        None => Ok(None),
        Some(serde_json::Value::Bool(required)) => Ok(Some(*required)),
        Some(_) => Err(schema_error(walker, "\"required\" must be a boolean")),
    }
}

impl ArgumentSchema {
    /// Validates the `arg_config` section of a configuration.
    ///
    /// # Arguments
    /// * `walker` - Walker positioned at `arg_config`; a missing section yields an empty schema
    /// * `config_path` - Path of the configuration document, for error messages
    pub fn from_json(walker: &JsonWalker<'_>, config_path: &str) -> Result<Self> {
        if !walker.exists() {
            return Ok(Self::default());
        }
        let entries = walker.entries().ok_or_else(|| Error::ConfigValidationError {
            field: config_keys::ARG_CONFIG.to_string(),
            config_path: config_path.to_string(),
            json_path: walker.path().to_string(),
        })?;

        let mut params = Vec::with_capacity(entries.len());
        let mut bindings = HashSet::new();
        for (name, spec) in entries {
            if spec.entries().is_none() {
                return Err(schema_error(&spec, "argument declaration must be an object"));
            }
            let (kind, binding) = parse_name(name).ok_or_else(|| {
                schema_error(
                    &spec,
                    format!("\"{name}\" is not a valid argument name; use `--name`, `-n` or `name`"),
                )
            })?;
            if matches!(&kind, ArgumentKind::Long(long) if long == "help")
                || kind == ArgumentKind::Short('h')
            {
                return Err(schema_error(&spec, format!("\"{name}\" is reserved for help")));
            }
            if !bindings.insert(binding.clone()) {
                return Err(schema_error(
                    &spec,
                    format!("\"{name}\" binds \"{binding}\" which is already declared"),
                ));
            }

            let required = parse_required(&spec.get(arg_keys::REQUIRED))?;
            if kind == ArgumentKind::Positional && required.is_some() {
                return Err(schema_error(
                    &spec.get(arg_keys::REQUIRED),
                    "\"required\" cannot be set on a positional argument",
                ));
            }
            params.push(ParamSpec {
                name: name.to_string(),
                binding,
                kind,
                default: spec.get(arg_keys::DEFAULT).data().cloned(),
                value_type: parse_type(&spec.get(arg_keys::TYPE))?,
                nargs: parse_nargs(&spec.get(arg_keys::NARGS))?,
                help: parse_help(&spec.get(arg_keys::HELP))?,
                required,
            });
        }

        // Only the last positional may take a variable number of values.
        let positionals: Vec<&ParamSpec> =
            params.iter().filter(|p| p.kind == ArgumentKind::Positional).collect();
        if let Some((_, leading)) = positionals.split_last() {
            if let Some(param) = leading.iter().find(|p| !p.has_fixed_single_value()) {
                return Err(Error::ArgumentSchemaError {
                    json_path: walker.path().key(&param.name).key(arg_keys::NARGS).to_string(),
                    message: "only the last positional argument may declare \"nargs\"".into(),
                });
            }
        }

        Ok(Self { params })
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
