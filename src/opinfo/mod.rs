mod info;
mod registry;
mod softmax;

pub use info::{AttrDef, AttrType, FusionType, IoDef, OpInfo, OpInfoBuilder, ParamType};
pub use registry::{
    all_names, is_registered, lookup, register, register_builtins, select_layout, OpRegistry,
};
pub use softmax::softmax_op_info;
