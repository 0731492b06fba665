//! Namespaces exposed to every template expression.

use std::fmt;
use std::sync::Arc;

use minijinja::value::{from_args, Object, ObjectRepr, Value};
use minijinja::{Error, ErrorKind, State};
use uuid::Uuid;

/// `math`: floating point constants and functions.
#[derive(Debug)]
pub struct MathNamespace;

fn unary(args: &[Value], op: fn(f64) -> f64) -> Result<Value, Error> {
    let (x,): (f64,) = from_args(args)?;
    Ok(Value::from(op(x)))
}

fn binary(args: &[Value], op: fn(f64, f64) -> f64) -> Result<Value, Error> {
    let (x, y): (f64, f64) = from_args(args)?;
    Ok(Value::from(op(x, y)))
}

fn rounding(args: &[Value], op: fn(f64) -> f64) -> Result<Value, Error> {
    let (x,): (f64,) = from_args(args)?;
    let rounded = op(x);
    // i64::MAX as f64 rounds up to 2^63, hence the half-open range.
    if !(i64::MIN as f64..i64::MAX as f64).contains(&rounded) {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot convert {x} to a 64-bit integer"),
        ));
    }
    Ok(Value::from(rounded as i64))
}

impl Object for MathNamespace {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let constant = match key.as_str()? {
            "pi" => std::f64::consts::PI,
            "e" => std::f64::consts::E,
            "tau" => std::f64::consts::TAU,
            "inf" => f64::INFINITY,
            "nan" => f64::NAN,
            _ => return None,
        };
        Some(Value::from(constant))
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "sqrt" => unary(args, f64::sqrt),
            "exp" => unary(args, f64::exp),
            "log2" => unary(args, f64::log2),
            "log10" => unary(args, f64::log10),
            "fabs" => unary(args, f64::abs),
            "sin" => unary(args, f64::sin),
            "cos" => unary(args, f64::cos),
            "tan" => unary(args, f64::tan),
            "asin" => unary(args, f64::asin),
            "acos" => unary(args, f64::acos),
            "atan" => unary(args, f64::atan),
            "degrees" => unary(args, f64::to_degrees),
            "radians" => unary(args, f64::to_radians),
            "pow" => binary(args, f64::powf),
            "atan2" => binary(args, f64::atan2),
            "hypot" => binary(args, f64::hypot),
            "floor" => rounding(args, f64::floor),
            "ceil" => rounding(args, f64::ceil),
            "trunc" => rounding(args, f64::trunc),
            "log" => {
                let (x, base): (f64, Option<f64>) = from_args(args)?;
                let value = match base {
                    Some(base) => x.ln() / base.ln(),
                    None => x.ln(),
                };
                Ok(Value::from(value))
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("math has no function named '{method}'"),
            )),
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<namespace 'math'>")
    }
}

/// `uuid`: random identifier generator.
#[derive(Debug)]
pub struct UuidNamespace;

impl Object for UuidNamespace {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "uuid4" => {
                if !args.is_empty() {
                    return Err(Error::new(
                        ErrorKind::TooManyArguments,
                        "uuid4() takes no arguments",
                    ));
                }
                Ok(Value::from(Uuid::new_v4().to_string()))
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("uuid has no function named '{method}'"),
            )),
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<namespace 'uuid'>")
    }
}
