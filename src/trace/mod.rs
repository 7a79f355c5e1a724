mod constexpr;
mod helpers;
mod value;

pub use constexpr::{helper, ConstexprFn, EvalPhase, HelperFn, HELPERS};
pub use helpers::{
    check_value_type, is_callable, raise_type_error, raise_value_error, type_convert,
};
pub use value::{FuncRef, Value, ValueType};
