use anyhow::Result;
use opforge::{
    softmax_op_info, AttrType, DType, DataLayout, Format, FusionType, OpInfo, ParamType,
};

#[test]
fn softmax_record_fields() -> Result<()> {
    let info = softmax_op_info()?;
    assert_eq!(info.op_name, "Softmax");
    assert_eq!(info.kernel_name, "softmax_v2");
    assert_eq!(info.binfile_name, "softmax.so");
    assert_eq!(info.fusion_type, FusionType::Opaque);
    assert!(!info.async_flag);
    assert_eq!(info.compute_cost, 10);
    assert!(info.partial_flag);
    assert_eq!(info.inputs.len(), 1);
    assert_eq!(info.inputs[0].name, "x");
    assert_eq!(info.inputs[0].param_type, ParamType::Required);
    assert_eq!(info.outputs.len(), 1);
    assert_eq!(info.outputs[0].name, "y");
    assert_eq!(info.dtype_formats.len(), 5);
    Ok(())
}

#[test]
fn softmax_axis_attr() -> Result<()> {
    let info = softmax_op_info()?;
    let axis = info.attr("axis").expect("axis attr declared");
    assert_eq!(axis.param_type, ParamType::Optional);
    assert_eq!(axis.value_type, AttrType::ListInt);
    assert_eq!(axis.default_value.as_deref(), Some("all"));
    assert!(info.attr("keepdims").is_none());
    Ok(())
}

#[test]
fn softmax_layout_pairs_are_symmetric() -> Result<()> {
    let info = softmax_op_info()?;
    for (input, output) in &info.dtype_formats {
        assert_eq!(input, output, "softmax never changes layout");
    }
    Ok(())
}

#[test]
fn softmax_layout_support() -> Result<()> {
    let info = softmax_op_info()?;
    assert_eq!(
        info.supported_output(DataLayout::F16_5HD),
        Some(DataLayout::F16_5HD)
    );
    assert!(info.supports(DataLayout::F32_FRACNZ));
    // f32 blocked layout is not in the signature list
    assert!(!info.supports(DataLayout::F32_5HD));
    assert!(!info.supports(DataLayout::new(DType::BF16, Format::Default)));
    Ok(())
}

#[test]
fn builder_rejects_missing_kernel_name() {
    let err = OpInfo::builder("LogSoftmax")
        .binfile_name("log_softmax.so")
        .input(0, "x", ParamType::Required)
        .output(0, "y", ParamType::Required)
        .dtype_format(DataLayout::F32_DEFAULT, DataLayout::F32_DEFAULT)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("missing kernel name"));
}

#[test]
fn builder_rejects_empty_signature_list() {
    let err = OpInfo::builder("LogSoftmax")
        .kernel_name("log_softmax")
        .binfile_name("log_softmax.so")
        .input(0, "x", ParamType::Required)
        .output(0, "y", ParamType::Required)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("no dtype/format pairs"));
}

#[test]
fn builder_rejects_duplicate_attr() {
    let err = OpInfo::builder("LogSoftmax")
        .kernel_name("log_softmax")
        .binfile_name("log_softmax.so")
        .attr("axis", ParamType::Optional, AttrType::ListInt, Some("all"))
        .attr("axis", ParamType::Required, AttrType::Int, None)
        .input(0, "x", ParamType::Required)
        .output(0, "y", ParamType::Required)
        .dtype_format(DataLayout::F32_DEFAULT, DataLayout::F32_DEFAULT)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("duplicate attribute axis"));
}

#[test]
fn builder_rejects_misnumbered_inputs() {
    let err = OpInfo::builder("Concat")
        .kernel_name("concat")
        .binfile_name("concat.so")
        .input(0, "x0", ParamType::Required)
        .input(2, "x1", ParamType::Required)
        .output(0, "y", ParamType::Required)
        .dtype_format(DataLayout::F32_DEFAULT, DataLayout::F32_DEFAULT)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("expected 1"));
}

#[test]
fn op_info_json_uses_toolchain_spellings() -> Result<()> {
    let info = softmax_op_info()?;
    let json: serde_json::Value = serde_json::from_str(&info.to_json()?)?;
    assert_eq!(json["op_name"], "Softmax");
    assert_eq!(json["fusion_type"], "OPAQUE");
    assert_eq!(json["attrs"][0]["value_type"], "listInt");
    assert_eq!(json["attrs"][0]["param_type"], "optional");
    assert_eq!(json["inputs"][0]["param_type"], "required");
    assert_eq!(json["inputs"][0]["shape"], "all");
    assert_eq!(json["dtype_formats"][0][0]["dtype"], "float16");
    assert_eq!(json["dtype_formats"][0][0]["format"], "DefaultFormat");
    assert_eq!(json["dtype_formats"][1][0]["format"], "NC1HWC0");
    assert_eq!(json["dtype_formats"][2][0]["format"], "FRACTAL_NZ");
    Ok(())
}

#[test]
fn op_info_json_round_trip() -> Result<()> {
    let info = softmax_op_info()?;
    let restored = OpInfo::from_json(&info.to_json()?)?;
    assert_eq!(restored, info);
    Ok(())
}

#[test]
fn dtype_identifiers() -> Result<()> {
    assert_eq!(DType::from_ident("float16")?, DType::F16);
    assert_eq!(DType::F32.as_str(), "float32");
    assert!(DType::F16.is_float());
    assert!(!DType::I32.is_float());
    assert_eq!(DType::F16.bit_width(), 16);
    assert!(DType::from_ident("float8").is_err());
    Ok(())
}

#[test]
fn data_layout_display() {
    assert_eq!(DataLayout::F16_5HD.to_string(), "float16/NC1HWC0");
    assert_eq!(DataLayout::F32_DEFAULT.to_string(), "float32/DefaultFormat");
}
