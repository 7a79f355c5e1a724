#[path = "registry/op_info.rs"]
mod op_info;
#[path = "registry/registry_table.rs"]
mod registry_table;

#[path = "trace/trace_helpers.rs"]
mod trace_helpers;
#[path = "trace/constexpr_table.rs"]
mod constexpr_table;
