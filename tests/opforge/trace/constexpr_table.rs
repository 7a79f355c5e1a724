use opforge::{helper, EvalPhase, FuncRef, Value, ValueType, HELPERS};

#[test]
fn helpers_are_constexpr_phase() {
    assert_eq!(HELPERS.len(), 5);
    for entry in HELPERS {
        assert_eq!(entry.phase(), EvalPhase::Constexpr);
    }
    assert!(helper("is_callable").is_some());
    assert!(helper("unknown_helper").is_none());
}

#[test]
fn dispatch_is_callable() {
    let entry = helper("is_callable").unwrap();
    assert_eq!(
        entry.eval(&[Value::Function(FuncRef::new("relu"))]),
        Ok(Value::Bool(true))
    );
    assert_eq!(entry.eval(&[Value::Int(1)]), Ok(Value::Bool(false)));
    assert!(entry.eval(&[]).is_err());
}

#[test]
fn dispatch_type_convert() {
    let entry = helper("type_convert").unwrap();
    assert_eq!(
        entry.eval(&[Value::Type(ValueType::Int), Value::from("42")]),
        Ok(Value::Int(42))
    );
    let err = entry
        .eval(&[Value::Int(1), Value::from("42")])
        .unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn dispatch_raise_errors() {
    let entry = helper("raise_value_error").unwrap();
    let err = entry
        .eval(&[Value::from("bad shape: "), Value::Int(3), Value::from("x"), Value::Int(4)])
        .unwrap_err();
    assert!(err.is_value_error());
    assert_eq!(err.message(), "bad shape: 3x4");

    let entry = helper("raise_type_error").unwrap();
    let err = entry.eval(&[Value::from("wrong type")]).unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(err.message(), "wrong type");
}

#[test]
fn dispatch_check_value_type() {
    let entry = helper("check_value_type").unwrap();
    assert_eq!(
        entry.eval(&[
            Value::from("axis"),
            Value::Int(1),
            Value::Type(ValueType::Int),
        ]),
        Ok(Value::Int(1))
    );
    // trailing string argument is the operator context
    let err = entry
        .eval(&[
            Value::from("axis"),
            Value::Bool(true),
            Value::Type(ValueType::Int),
            Value::from("Softmax"),
        ])
        .unwrap_err();
    assert!(err.is_type_error());
    assert!(err.message().starts_with("For 'Softmax'"));
}
