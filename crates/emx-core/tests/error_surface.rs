use emx_core::errors::{EmxError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("entry", "(0, 1)")
        .with_context("reason", "example")
}

#[test]
fn matrix_error_surface() {
    let err = EmxError::Matrix(sample_info("M001", "matrix is not symmetric"));
    assert_eq!(err.info().code, "M001");
    assert!(err.info().context.contains_key("entry"));
}

#[test]
fn polynomial_error_surface() {
    let err = EmxError::Polynomial(sample_info("P001", "leading coefficient is zero"));
    assert_eq!(err.info().code, "P001");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn moments_error_surface() {
    let err = EmxError::Moments(sample_info("MO001", "no particles"));
    assert_eq!(err.info().code, "MO001");
}

#[test]
fn config_error_surface() {
    let err = EmxError::Config(sample_info("C001", "negative tolerance"));
    assert_eq!(err.info().code, "C001");
}

#[test]
fn serde_error_surface() {
    let err = EmxError::Serde(sample_info("S001", "schema mismatch"));
    assert_eq!(err.info().code, "S001");
}

#[test]
fn display_includes_context_and_hint() {
    let err = EmxError::Polynomial(
        ErrorInfo::new("zero-leading-coefficient", "cubic term vanishes")
            .with_context("a", "0")
            .with_hint("divide out the quadratic instead"),
    );
    let text = err.to_string();
    assert!(text.starts_with("polynomial error: cubic term vanishes"));
    assert!(text.contains("a=0"));
    assert!(text.contains("hint: divide out the quadratic instead"));
}

#[test]
fn errors_round_trip_json() {
    let err = EmxError::Matrix(sample_info("M002", "non-finite entry"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Matrix\""));
    let decoded: EmxError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
