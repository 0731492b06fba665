//! Parsing of template arguments with `clap`.

use super::schema::{ArgumentKind, ArgumentSchema, Nargs, ParamSpec, ValueType};
use crate::error::{Error, Result};
use clap::builder::ValueRange;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use minijinja::Value;
use std::any::Any;
use std::ffi::OsString;

impl Nargs {
    fn value_range(&self) -> ValueRange {
        match *self {
            Nargs::Exact(count) => ValueRange::new(count),
            Nargs::Optional => ValueRange::new(0..=1),
            Nargs::ZeroOrMore => ValueRange::new(0..),
            Nargs::OneOrMore => ValueRange::new(1..),
        }
    }
}

impl ParamSpec {
    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.binding.clone()).action(ArgAction::Set);
        arg = match &self.kind {
            ArgumentKind::Long(long) => arg.long(long.clone()),
            ArgumentKind::Short(short) => arg.short(*short),
            ArgumentKind::Positional => arg,
        };
        arg = match self.value_type.unwrap_or_default() {
            ValueType::Str => arg.value_parser(value_parser!(String)),
            ValueType::Int => arg.value_parser(value_parser!(i64)),
            ValueType::Float => arg.value_parser(value_parser!(f64)),
            ValueType::Bool => arg.value_parser(value_parser!(bool)),
        };
        // Tokens like `-3` are values, never short flags.
        arg = arg.allow_negative_numbers(true);
        if let Some(nargs) = self.nargs {
            arg = arg.num_args(nargs.value_range());
        }
        if let Some(help) = &self.help {
            arg = arg.help(help.clone());
        }
        arg.required(self.is_required())
    }

    /// The value bound when the argument is absent.
    ///
    /// String defaults are converted to the declared type. A positional taking
    /// `*` values without a default is bound to an empty list.
    fn default_value(&self) -> Result<Value> {
        match &self.default {
            Some(serde_json::Value::String(text)) => self.convert_default(text),
            Some(default) => Ok(Value::from_serialize(default)),
            None if self.kind == ArgumentKind::Positional
                && self.nargs == Some(Nargs::ZeroOrMore) =>
            {
                Ok(Value::from(Vec::<Value>::new()))
            }
            None => Ok(Value::from(())),
        }
    }

    fn convert_default(&self, text: &str) -> Result<Value> {
        let converted = match self.value_type.unwrap_or_default() {
            ValueType::Str => Some(Value::from(text)),
            ValueType::Int => text.trim().parse::<i64>().ok().map(Value::from),
            ValueType::Float => text.trim().parse::<f64>().ok().map(Value::from),
            ValueType::Bool => text.parse::<bool>().ok().map(Value::from),
        };
        converted.ok_or_else(|| {
            Error::ArgumentParsingError(format!(
                "error: invalid default '{text}' for argument '{}'",
                self.name
            ))
        })
    }

    /// Reads this argument's value out of the parsed matches.
    fn extract(&self, matches: &ArgMatches) -> Result<Value> {
        if matches.value_source(&self.binding).is_none() {
            return self.default_value();
        }
        let values = match self.value_type.unwrap_or_default() {
            ValueType::Str => collect_values::<String>(matches, &self.binding)?,
            ValueType::Int => collect_values::<i64>(matches, &self.binding)?,
            ValueType::Float => collect_values::<f64>(matches, &self.binding)?,
            ValueType::Bool => collect_values::<bool>(matches, &self.binding)?,
        };
        Ok(match self.nargs {
            Some(nargs) if nargs.is_list() => Value::from(values),
            _ => values.into_iter().next().unwrap_or(Value::from(())),
        })
    }
}

fn collect_values<T>(matches: &ArgMatches, id: &str) -> Result<Vec<Value>>
where
    T: Any + Clone + Send + Sync + Into<Value> + 'static,
{
    let values = matches
        .try_get_many::<T>(id)
        .map_err(|e| Error::ArgumentParsingError(e.to_string()))?;
    Ok(values.map(|values| values.cloned().map(Into::into).collect()).unwrap_or_default())
}

impl ArgumentSchema {
    /// Builds the parser for the template's own arguments.
    pub fn command(&self, template_name: &str) -> Command {
        self.params().iter().fold(
            Command::new(template_name.to_string()).no_binary_name(true),
            |command, param| command.arg(param.to_arg()),
        )
    }

    /// Parses the tokens that followed `--` on the command line.
    ///
    /// # Returns
    /// * `Result<Vec<(String, Value)>>` - One binding per declared argument,
    ///   holding the parsed value or the declared default
    pub fn parse<I, T>(&self, template_name: &str, tokens: I) -> Result<Vec<(String, Value)>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command(template_name)
            .try_get_matches_from(tokens)
            .map_err(|e| Error::ArgumentParsingError(e.render().to_string()))?;

        self.params()
            .iter()
            .map(|param| Ok((param.binding.clone(), param.extract(&matches)?)))
            .collect()
    }
}
