use paramgrid_core::{
    build, AxisRegistry, BuildMode, CoreError, MatrixError, RegistryError, Scope, ScopeContext,
};

#[test]
fn registry_errors_convert_into_core_error() {
    let mut registry = AxisRegistry::new();
    registry
        .register_literal("dataset", Scope::Session, ["alfa"])
        .unwrap();
    let registry_error = registry
        .register_literal("dataset", Scope::Session, ["beta"])
        .unwrap_err();

    let core: CoreError = registry_error.into();
    assert!(matches!(core, CoreError::Registry(_)));
    assert!(core.to_string().contains("already registered"));
}

#[test]
fn matrix_errors_convert_into_core_error() {
    let mut registry = AxisRegistry::new();
    registry
        .register_literal("dataset", Scope::Session, Vec::<&str>::new())
        .unwrap();

    let mut context = ScopeContext::new();
    let matrix_error = build(
        &["dataset"],
        &registry,
        &mut context,
        BuildMode::CrossProduct,
    )
    .unwrap_err();

    let core: CoreError = matrix_error.into();
    assert!(matches!(core, CoreError::Matrix(_)));
    assert!(core.to_string().contains("empty value sequence"));
}

#[test]
fn error_messages_name_the_offending_axis() {
    let unknown = RegistryError::UnknownAxis {
        name: "missing".to_string(),
    };
    assert_eq!(unknown.to_string(), "axis 'missing' is not registered");

    let empty = MatrixError::EmptyAxis {
        name: "dataset".to_string(),
        diagnostic: paramgrid_core::MatrixDiagnostic::new(
            paramgrid_core::BuildModeKind::CrossProduct,
        ),
    };
    assert_eq!(
        empty.to_string(),
        "axis 'dataset' resolved to an empty value sequence"
    );
}
