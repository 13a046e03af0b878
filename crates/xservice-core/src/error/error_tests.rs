#![allow(non_snake_case)]

use super::*;

#[test]
fn GenError___missing_field___names_builder_and_field() {
    let err = GenError::missing("Interface", "name of prototype");

    let display = err.to_string();

    assert_eq!(display, "Interface: name of prototype is missing");
}

#[test]
fn GenError___conflicting_package_name___mentions_both_values() {
    let err = GenError::ConflictingPackageName {
        setting: "go_package settings, must be the same",
        first: "pkgA".into(),
        second: "pkgB".into(),
    };

    let display = err.to_string();

    assert!(display.contains("\"pkgA\""));
    assert!(display.contains("\"pkgB\""));
}

#[test]
fn GenError___format___embeds_unformatted_source() {
    let err = GenError::Format {
        reason: "unbalanced braces".into(),
        source_text: "func broken() {".into(),
    };

    let display = err.to_string();

    assert!(display.contains("unbalanced braces"));
    assert!(display.contains("func broken() {"));
}

#[test]
fn GenError___within___prefixes_builder_name() {
    let err = GenError::UnknownMessage(".example.Missing".into()).within("Function");

    let display = err.to_string();

    assert_eq!(display, "Function: could not find message for .example.Missing");
}

#[test]
fn GenError___nested_within___root_returns_innermost() {
    let err = GenError::EmptyComment.within("Method").within("File");

    let root = err.root();

    assert!(matches!(root, GenError::EmptyComment));
}

#[test]
fn GenError___wrapped_error___keeps_inner_code() {
    let err = GenError::MissingPackage.within("File");

    let code = err.error_code();

    assert_eq!(code, 3);
}

#[test]
fn GenError___wrapped_format_error___is_classified_as_format() {
    let err = GenError::Format {
        reason: "x".into(),
        source_text: String::new(),
    }
    .within("Function");

    assert!(err.is_format());
    assert!(!err.is_construction());
    assert!(!err.is_resolution());
}

#[test]
fn GenError___all_variants___have_unique_codes() {
    let errors = vec![
        GenError::InvalidIdentifier {
            ident: "func".into(),
            reason: "keyword".into(),
        },
        GenError::missing("Block", "function"),
        GenError::MissingPackage,
        GenError::InvalidFileName("".into()),
        GenError::ConflictingPackageName {
            setting: "package names",
            first: "a".into(),
            second: "b".into(),
        },
        GenError::UnknownMessage("".into()),
        GenError::UnknownFile("".into()),
        GenError::EmptyComment,
        GenError::InvalidOperator {
            op: "=".into(),
            scope: "if",
        },
        GenError::Format {
            reason: "".into(),
            source_text: "".into(),
        },
        GenError::InternalInvariantViolation("".into()),
        GenError::Encode("".into()),
        GenError::Config("".into()),
    ];

    let codes: Vec<u32> = errors.iter().map(|e| e.error_code()).collect();
    let unique: std::collections::HashSet<u32> = codes.iter().copied().collect();

    assert_eq!(
        codes.len(),
        unique.len(),
        "All error codes should be unique"
    );
}
