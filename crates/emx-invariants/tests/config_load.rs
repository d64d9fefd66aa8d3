use std::fs;

use emx_cubic::{CubicMethod, DEFAULT_DISCRIMINANT_TOL};
use emx_invariants::EmittanceOpts;

#[test]
fn empty_yaml_mapping_yields_defaults() {
    let opts = EmittanceOpts::from_yaml_str("{}").expect("defaults");
    assert_eq!(opts, EmittanceOpts::default());
    assert_eq!(opts.method, CubicMethod::Trigonometric);
    assert_eq!(opts.discriminant_tol, DEFAULT_DISCRIMINANT_TOL);
    assert_eq!(opts.negative_root_tol, 1e-10);
}

#[test]
fn partial_json_overrides_selected_fields() {
    let opts = EmittanceOpts::from_json_str(r#"{"method": "algebraic", "negative_root_tol": 1e-6}"#)
        .expect("json");
    assert_eq!(opts.method, CubicMethod::Algebraic);
    assert_eq!(opts.negative_root_tol, 1e-6);
    assert_eq!(opts.symmetry_tol, EmittanceOpts::default().symmetry_tol);
}

#[test]
fn load_dispatches_on_extension() {
    let dir = tempfile::tempdir().expect("tempdir");

    let yaml = dir.path().join("opts.yml");
    fs::write(&yaml, "method: algebraic\ndiscriminant_tol: 1.0e-9\n").expect("write yaml");
    let opts = EmittanceOpts::load(&yaml).expect("yaml");
    assert_eq!(opts.method, CubicMethod::Algebraic);
    assert_eq!(opts.discriminant_tol, 1e-9);

    let json = dir.path().join("opts.json");
    fs::write(&json, r#"{"symmetry_tol": 1e-8}"#).expect("write json");
    assert_eq!(EmittanceOpts::load(&json).expect("json").symmetry_tol, 1e-8);

    let toml = dir.path().join("opts.toml");
    fs::write(&toml, "method = 'algebraic'").expect("write toml");
    let err = EmittanceOpts::load(&toml).expect_err("toml");
    assert_eq!(err.info().code, "unknown-format");
    assert_eq!(err.info().context.get("extension").map(String::as_str), Some("toml"));
}

#[test]
fn invalid_tolerances_are_rejected() {
    let err = EmittanceOpts::from_yaml_str("discriminant_tol: -1.0").expect_err("negative");
    assert_eq!(err.info().code, "invalid-tolerance");
    assert!(err.info().context.contains_key("discriminant_tol"));

    let err = EmittanceOpts::from_json_str(r#"{"method": "bisection"}"#).expect_err("method");
    assert_eq!(err.info().code, "json_deserialize");
}
