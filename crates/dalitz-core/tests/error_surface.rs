use dalitz_core::{Catalogue, DalitzError, ErrorInfo, Wave};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("index", "3")
        .with_context("num_resonances", "2")
}

#[test]
fn model_error_surface() {
    let err = DalitzError::Model(sample_info("unknown-resonance", "index out of range"));
    assert_eq!(err.code(), "unknown-resonance");
    assert_eq!(err.info().context["index"], "3");
    assert_eq!(err.info().context["num_resonances"], "2");
}

#[test]
fn repeated_context_key_keeps_the_last_value() {
    let info = ErrorInfo::new("unsupported-transition", "no closed form")
        .with_context("parent_spin", "0")
        .with_context("parent_spin", "1");
    assert_eq!(info.context.len(), 1);
    assert_eq!(info.context["parent_spin"], "1");
}

#[test]
fn engine_errors_carry_their_context_keys() {
    let err = Wave::try_from(3).unwrap_err();
    assert_eq!(err.info().context["value"], "3");

    let err = Catalogue::builtin().resonance("pi").unwrap_err();
    assert_eq!(err.code(), "unknown-resonance-name");
    assert_eq!(err.info().context["name"], "pi");
    assert!(err.info().hint.as_deref().is_some_and(|hint| hint.contains("tables")));
}

#[test]
fn normalization_error_surface() {
    let err = DalitzError::Normalization(sample_info("matrix-shape", "not square"));
    assert_eq!(err.info().code, "matrix-shape");
}

#[test]
fn display_lists_context_and_hint() {
    let err = DalitzError::Catalogue(
        ErrorInfo::new("unknown-particle", "missing")
            .with_context("name", "x")
            .with_hint("check spelling"),
    );
    assert_eq!(
        err.to_string(),
        "catalogue error: missing (code: unknown-particle) | context: [name=x] | hint: check spelling"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = DalitzError::Kinematics(ErrorInfo::new("unsupported-wave", "L = 3"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Kinematics");
    assert_eq!(json["detail"]["code"], "unsupported-wave");
}

#[test]
fn waves_above_two_are_rejected() {
    assert_eq!(Wave::try_from(2).expect("D wave"), Wave::D);
    let err = Wave::try_from(3).unwrap_err();
    assert_eq!(err.code(), "unsupported-wave");
    let parsed: Result<Wave, _> = serde_json::from_str("4");
    assert!(parsed.is_err());
}
