//! Conformance cases for the JSON engine: validation verdicts, fixed-mode
//! determinism, and agreement between the generator and the validator.

use tagdoc::mock::{generate, validate, GenerateOptions};
use tagdoc::{Enum, ErrorKind, Param, Type};

fn param(name: &str, ty: Type) -> Param {
    Param {
        name: name.to_string(),
        ty,
        summary: name.to_string(),
        ..Default::default()
    }
}

fn sex_enum_param() -> Param {
    Param {
        enums: vec![
            Enum {
                value: "male".to_string(),
                summary: "m".to_string(),
                ..Default::default()
            },
            Enum {
                value: "female".to_string(),
                summary: "f".to_string(),
                ..Default::default()
            },
        ],
        ..param("sex", Type::String)
    }
}

fn user_schema() -> Param {
    let mut ids = param("ids", Type::Number);
    ids.array = true;
    Param {
        items: vec![
            param("age", Type::Number),
            param("active", Type::Bool),
            sex_enum_param(),
            ids,
            Param {
                items: vec![param("bio", Type::String)],
                ..param("profile", Type::Object)
            },
        ],
        ..param("user", Type::Object)
    }
}

#[test]
fn validate_number_schema_verdicts() {
    let schema = param("age", Type::Number);

    assert!(validate(Some(&schema), b"42").is_ok());

    let err = validate(Some(&schema), b"\"42\"").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidFormat);

    let err = validate(Some(&schema), br#"{"weight": 1}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.field, "weight");
}

#[test]
fn validate_nested_document() {
    let schema = user_schema();
    let payload = br#"{
        "age": 30,
        "active": true,
        "sex": "female",
        "ids": [1, 2, 3],
        "profile": {"bio": "hello"}
    }"#;
    assert!(validate(Some(&schema), payload).is_ok());

    let err = validate(Some(&schema), br#"{"profile": {"bio": 5}}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidFormat);
    assert_eq!(err.field, "profile.bio");

    let err = validate(Some(&schema), br#"{"sex": "unknown"}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidValue);
    assert_eq!(err.field, "sex");
}

#[test]
fn generate_fixed_values_are_pinned() {
    let options = GenerateOptions::fixed();

    assert_eq!(generate(Some(&param("n", Type::Number)), &options), "1024");
    assert_eq!(
        generate(Some(&param("s", Type::String)), &options),
        "\"1024\""
    );
    assert_eq!(
        generate(Some(&sex_enum_param()), &options),
        "\"male\""
    );

    let mut ids = param("ids", Type::Number);
    ids.array = true;
    let out = generate(Some(&ids), &options);
    assert_eq!(out.matches("1024").count(), 5);
}

#[test]
fn generate_fixed_is_deterministic_across_calls() {
    let schema = user_schema();
    let options = GenerateOptions::fixed();
    let first = generate(Some(&schema), &options);
    for _ in 0..4 {
        assert_eq!(generate(Some(&schema), &options), first);
    }
}

#[test]
fn generated_samples_validate_against_their_schema() {
    let schema = user_schema();

    let fixed = generate(Some(&schema), &GenerateOptions::fixed());
    assert!(validate(Some(&schema), fixed.as_bytes()).is_ok(), "{fixed}");

    // Random mode keeps the same shape, only the scalar values move.
    for _ in 0..8 {
        let sample = generate(Some(&schema), &GenerateOptions::default());
        assert!(validate(Some(&schema), sample.as_bytes()).is_ok(), "{sample}");
    }
}

#[test]
fn missing_and_none_schemas() {
    assert_eq!(generate(None, &GenerateOptions::fixed()), "null");
    assert!(validate(None, b"null").is_ok());
    assert!(validate(None, b"0").is_err());

    let empty = param("none", Type::None);
    assert_eq!(generate(Some(&empty), &GenerateOptions::fixed()), "");
    assert!(validate(Some(&empty), b"").is_ok());
}
