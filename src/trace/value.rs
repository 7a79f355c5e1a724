use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a graph-level function object.
///
/// This is what the tracer hands around when user code mentions a traced
/// function or closure; it is distinct from other values that the source
/// language would happily call (type objects, primitives bound to names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncRef {
    pub name: String,
}

impl FuncRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A value observed by the tracer while it walks user code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    IntList(Vec<i64>),
    Function(FuncRef),
    Type(ValueType),
}

/// Category of a [`Value`], used by trace-time type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    None,
    Bool,
    Int,
    Float,
    Str,
    IntList,
    Function,
    Type,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::None => "none",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Str => "str",
            ValueType::IntList => "list of int",
            ValueType::Function => "function",
            ValueType::Type => "type",
        }
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::None => ValueType::None,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::IntList(_) => ValueType::IntList,
            Value::Function(_) => ValueType::Function,
            Value::Type(_) => ValueType::Type,
        }
    }

    /// Whether this value is a member of `ty`.
    ///
    /// Bools count as ints here, mirroring how the tracer widens them in
    /// arithmetic contexts; `check_value_type` layers its explicit bool
    /// exclusion on top of this.
    pub fn is_instance(&self, ty: ValueType) -> bool {
        if matches!(self, Value::Bool(_)) && ty == ValueType::Int {
            return true;
        }
        self.value_type() == ty
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::IntList(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Function(func) => write!(f, "<function {}>", func.name),
            Value::Type(ty) => write!(f, "<type {}>", ty.name()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::IntList(value)
    }
}
