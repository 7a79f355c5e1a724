use anyhow::Result;

use crate::dtype::DataLayout;

use super::info::{AttrType, FusionType, OpInfo, ParamType};

/// Registration record for the accelerated Softmax kernel.
///
/// The `softmax_v2` binary accepts f16 and f32 tensors in the default,
/// blocked and fractal-NZ layouts; input and output layout are identical in
/// every signature. The optional `axis` attribute defaults to reducing over
/// all axes.
pub fn softmax_op_info() -> Result<OpInfo> {
    OpInfo::builder("Softmax")
        .fusion_type(FusionType::Opaque)
        .async_flag(false)
        .binfile_name("softmax.so")
        .compute_cost(10)
        .kernel_name("softmax_v2")
        .partial_flag(true)
        .attr("axis", ParamType::Optional, AttrType::ListInt, Some("all"))
        .input(0, "x", ParamType::Required)
        .output(0, "y", ParamType::Required)
        .dtype_format(DataLayout::F16_DEFAULT, DataLayout::F16_DEFAULT)
        .dtype_format(DataLayout::F16_5HD, DataLayout::F16_5HD)
        .dtype_format(DataLayout::F16_FRACNZ, DataLayout::F16_FRACNZ)
        .dtype_format(DataLayout::F32_DEFAULT, DataLayout::F32_DEFAULT)
        .dtype_format(DataLayout::F32_FRACNZ, DataLayout::F32_FRACNZ)
        .build()
}
