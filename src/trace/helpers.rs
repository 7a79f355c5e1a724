use crate::error::TraceError;

use super::value::{Value, ValueType};

/// Returns true if `value` is a graph-level function object.
///
/// Type objects and primitives are callable in the traced source language but
/// are deliberately not reported as callable here.
pub fn is_callable(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

/// Apply the constructor of `target` to `value`.
///
/// Fails with whatever the underlying conversion reports: a value error for
/// unparseable input, a type error when the target cannot be constructed from
/// the value's category at all.
pub fn type_convert(target: ValueType, value: &Value) -> Result<Value, TraceError> {
    match (target, value) {
        (ValueType::Int, Value::Int(v)) => Ok(Value::Int(*v)),
        (ValueType::Int, Value::Bool(v)) => Ok(Value::Int(i64::from(*v))),
        (ValueType::Int, Value::Float(v)) => Ok(Value::Int(*v as i64)),
        (ValueType::Int, Value::Str(s)) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            TraceError::Value(format!("invalid literal for int: '{}'", s))
        }),
        (ValueType::Float, Value::Float(v)) => Ok(Value::Float(*v)),
        (ValueType::Float, Value::Bool(v)) => Ok(Value::Float(f64::from(u8::from(*v)))),
        (ValueType::Float, Value::Int(v)) => Ok(Value::Float(*v as f64)),
        (ValueType::Float, Value::Str(s)) => {
            s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
                TraceError::Value(format!("invalid literal for float: '{}'", s))
            })
        }
        (ValueType::Bool, v) => Ok(Value::Bool(truthy(v))),
        (ValueType::Str, v) => Ok(Value::Str(v.to_string())),
        (ValueType::IntList, Value::IntList(items)) => Ok(Value::IntList(items.clone())),
        (target, value) => Err(TraceError::Type(format!(
            "cannot convert value of type {} to {}",
            value.value_type().name(),
            target.name()
        ))),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::None => false,
        Value::Bool(v) => *v,
        Value::Int(v) => *v != 0,
        Value::Float(v) => *v != 0.0,
        Value::Str(s) => !s.is_empty(),
        Value::IntList(items) => !items.is_empty(),
        Value::Function(_) | Value::Type(_) => true,
    }
}

fn concat_message(info: &str, parts: &[Value]) -> String {
    let mut message = info.to_string();
    for part in parts {
        message.push_str(&part.to_string());
    }
    message
}

/// Fail graph construction with a value error.
///
/// Each part is stringified and appended to `info` to build the message.
pub fn raise_value_error<T>(info: &str, parts: &[Value]) -> Result<T, TraceError> {
    Err(TraceError::Value(concat_message(info, parts)))
}

/// Fail graph construction with a type error.
pub fn raise_type_error<T>(info: &str, parts: &[Value]) -> Result<T, TraceError> {
    Err(TraceError::Type(concat_message(info, parts)))
}

/// Check that `arg_value` is an instance of one of `valid_types`.
///
/// Returns the value unchanged on success so the call can sit inline in a
/// larger expression. A bool only passes when `ValueType::Bool` is explicitly
/// listed, even though bools otherwise count as ints; this stops booleans
/// slipping through checks that meant to accept integers. The failure message
/// is prefixed with the operator name when `context` is supplied.
pub fn check_value_type(
    arg_name: &str,
    arg_value: Value,
    valid_types: &[ValueType],
    context: Option<&str>,
) -> Result<Value, TraceError> {
    let bool_rejected =
        matches!(arg_value, Value::Bool(_)) && !valid_types.contains(&ValueType::Bool);
    let no_match = !valid_types.iter().any(|ty| arg_value.is_instance(*ty));
    if bool_rejected || no_match {
        return Err(type_mismatch_error(arg_name, &arg_value, valid_types, context));
    }
    Ok(arg_value)
}

fn type_mismatch_error(
    arg_name: &str,
    arg_value: &Value,
    valid_types: &[ValueType],
    context: Option<&str>,
) -> TraceError {
    let type_names: Vec<&str> = valid_types.iter().map(|ty| ty.name()).collect();
    let expected = if type_names.len() > 1 {
        format!("one of [{}]", type_names.join(", "))
    } else {
        type_names.first().copied().unwrap_or("nothing").to_string()
    };
    let prefix = match context {
        Some(op) => format!("For '{}', the", op),
        None => "The".to_string(),
    };
    TraceError::Type(format!(
        "{} type of `{}` should be {}, but got '{}' with type {}.",
        prefix,
        arg_name,
        expected,
        arg_value,
        arg_value.value_type().name()
    ))
}
