use anyhow::Result;
use opforge::{
    register, register_builtins, select_layout, softmax_op_info, DataLayout, OpInfo, OpRegistry,
    ParamType,
};

fn dummy_op(name: &str) -> Result<OpInfo> {
    OpInfo::builder(name)
        .kernel_name(name.to_ascii_lowercase())
        .binfile_name(format!("{}.so", name.to_ascii_lowercase()))
        .input(0, "x", ParamType::Required)
        .output(0, "y", ParamType::Required)
        .dtype_format(DataLayout::F32_DEFAULT, DataLayout::F32_DEFAULT)
        .build()
}

#[test]
fn register_and_lookup() -> Result<()> {
    let registry = OpRegistry::new();
    registry.register(softmax_op_info()?)?;
    let info = registry.lookup("Softmax").expect("registered");
    assert_eq!(info.kernel_name, "softmax_v2");
    assert!(registry.is_registered("Softmax"));
    assert!(!registry.is_registered("LogSoftmax"));
    Ok(())
}

#[test]
fn duplicate_registration_is_rejected() -> Result<()> {
    let registry = OpRegistry::new();
    registry.register(softmax_op_info()?)?;
    let err = registry.register(softmax_op_info()?).unwrap_err();
    assert!(err.to_string().contains("already registered"));
    // first record stays in place
    assert_eq!(registry.lookup("Softmax").expect("kept").compute_cost, 10);
    Ok(())
}

#[test]
fn layout_selection() -> Result<()> {
    let registry = OpRegistry::new();
    registry.register(softmax_op_info()?)?;
    assert_eq!(
        registry.select_layout("Softmax", DataLayout::F16_FRACNZ),
        Some(DataLayout::F16_FRACNZ)
    );
    assert_eq!(registry.select_layout("Softmax", DataLayout::F32_5HD), None);
    assert_eq!(
        registry.select_layout("LogSoftmax", DataLayout::F32_DEFAULT),
        None
    );
    Ok(())
}

#[test]
fn all_names_sorted() -> Result<()> {
    let registry = OpRegistry::new();
    registry.register(dummy_op("Tanh")?)?;
    registry.register(dummy_op("Gelu")?)?;
    registry.register(dummy_op("Sigmoid")?)?;
    assert_eq!(registry.all_names(), vec!["Gelu", "Sigmoid", "Tanh"]);
    Ok(())
}

#[test]
fn builtin_registration_is_idempotent() -> Result<()> {
    register_builtins()?;
    register_builtins()?;
    assert_eq!(
        select_layout("Softmax", DataLayout::F16_DEFAULT),
        Some(DataLayout::F16_DEFAULT)
    );
    Ok(())
}

#[test]
fn global_registration() -> Result<()> {
    register(dummy_op("RegistryTableProbe")?)?;
    let info = opforge::lookup("RegistryTableProbe").expect("registered");
    assert_eq!(info.binfile_name, "registrytableprobe.so");
    assert!(register(dummy_op("RegistryTableProbe")?).is_err());
    Ok(())
}
