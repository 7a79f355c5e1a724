mod dtype;
mod error;
pub mod logging;
mod opinfo;
mod trace;

pub use dtype::{DType, DataLayout, Format};
pub use error::TraceError;
pub use opinfo::{
    all_names, is_registered, lookup, register, register_builtins, select_layout, softmax_op_info,
    AttrDef, AttrType, FusionType, IoDef, OpInfo, OpInfoBuilder, OpRegistry, ParamType,
};
pub use trace::{
    check_value_type, helper, is_callable, raise_type_error, raise_value_error, type_convert,
    ConstexprFn, EvalPhase, FuncRef, HelperFn, Value, ValueType, HELPERS,
};
