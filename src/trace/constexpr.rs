use crate::error::TraceError;

use super::helpers::{
    check_value_type, is_callable, raise_type_error, raise_value_error, type_convert,
};
use super::value::Value;

/// When a function runs relative to graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalPhase {
    /// Evaluated eagerly while the tracer builds the graph; never lowered
    /// into the compiled graph.
    Constexpr,
    /// Lowered into the compiled graph and executed on the device.
    Traced,
}

pub type HelperFn = fn(&[Value]) -> Result<Value, TraceError>;

/// A named helper the tracer dispatches eagerly at graph-construction time.
///
/// The tracer consults [`ConstexprFn::phase`] when it encounters a call: a
/// `Constexpr` entry is evaluated on the spot with the already-known argument
/// values instead of being emitted as a graph node.
#[derive(Clone, Copy)]
pub struct ConstexprFn {
    name: &'static str,
    func: HelperFn,
}

impl ConstexprFn {
    pub const fn new(name: &'static str, func: HelperFn) -> Self {
        Self { name, func }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn phase(&self) -> EvalPhase {
        EvalPhase::Constexpr
    }

    pub fn eval(&self, args: &[Value]) -> Result<Value, TraceError> {
        (self.func)(args)
    }
}

/// Trace-time helpers available to the graph compiler, looked up by name.
pub const HELPERS: &[ConstexprFn] = &[
    ConstexprFn::new("is_callable", eval_is_callable),
    ConstexprFn::new("type_convert", eval_type_convert),
    ConstexprFn::new("raise_value_error", eval_raise_value_error),
    ConstexprFn::new("raise_type_error", eval_raise_type_error),
    ConstexprFn::new("check_value_type", eval_check_value_type),
];

/// Look up a trace-time helper by name.
pub fn helper(name: &str) -> Option<&'static ConstexprFn> {
    HELPERS.iter().find(|h| h.name == name)
}

fn expect_arity(name: &str, args: &[Value], count: usize) -> Result<(), TraceError> {
    if args.len() != count {
        return Err(TraceError::Value(format!(
            "{} expects {} argument(s), got {}",
            name,
            count,
            args.len()
        )));
    }
    Ok(())
}

fn eval_is_callable(args: &[Value]) -> Result<Value, TraceError> {
    expect_arity("is_callable", args, 1)?;
    Ok(Value::Bool(is_callable(&args[0])))
}

fn eval_type_convert(args: &[Value]) -> Result<Value, TraceError> {
    expect_arity("type_convert", args, 2)?;
    let target = match &args[0] {
        Value::Type(ty) => *ty,
        other => {
            return Err(TraceError::Type(format!(
                "type_convert expects a type as first argument, got {}",
                other.value_type().name()
            )))
        }
    };
    type_convert(target, &args[1])
}

fn split_info(name: &str, args: &[Value]) -> Result<(String, Vec<Value>), TraceError> {
    match args.first() {
        Some(Value::Str(info)) => Ok((info.clone(), args[1..].to_vec())),
        _ => Err(TraceError::Value(format!(
            "{} expects a message as first argument",
            name
        ))),
    }
}

fn eval_raise_value_error(args: &[Value]) -> Result<Value, TraceError> {
    let (info, parts) = split_info("raise_value_error", args)?;
    raise_value_error(&info, &parts)
}

fn eval_raise_type_error(args: &[Value]) -> Result<Value, TraceError> {
    let (info, parts) = split_info("raise_type_error", args)?;
    raise_type_error(&info, &parts)
}

fn eval_check_value_type(args: &[Value]) -> Result<Value, TraceError> {
    if args.len() < 3 {
        return Err(TraceError::Value(format!(
            "check_value_type expects at least 3 arguments, got {}",
            args.len()
        )));
    }
    let arg_name = match &args[0] {
        Value::Str(name) => name.clone(),
        other => {
            return Err(TraceError::Type(format!(
                "check_value_type expects an argument name, got {}",
                other.value_type().name()
            )))
        }
    };
    let mut rest = &args[2..];
    let context = match rest.last() {
        Some(Value::Str(op)) => {
            let op = op.clone();
            rest = &rest[..rest.len() - 1];
            Some(op)
        }
        _ => None,
    };
    let mut valid_types = Vec::with_capacity(rest.len());
    for entry in rest {
        match entry {
            Value::Type(ty) => valid_types.push(*ty),
            other => {
                return Err(TraceError::Type(format!(
                    "check_value_type expects types, got {}",
                    other.value_type().name()
                )))
            }
        }
    }
    check_value_type(&arg_name, args[1].clone(), &valid_types, context.as_deref())
}
