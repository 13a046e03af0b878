#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn Identifier___plain_name___returned_unchanged() {
    let ident = Identifier::new("reqContent").unwrap();

    assert_eq!(ident.as_str(), "reqContent");
}

#[test]
fn Identifier___empty___fails() {
    let result = Identifier::new("");

    assert!(matches!(result, Err(GenError::InvalidIdentifier { .. })));
}

#[test_case("func")]
#[test_case("type")]
#[test_case("range")]
#[test_case("fallthrough")]
fn Identifier___keyword___fails(keyword: &str) {
    let result = Identifier::new(keyword);

    match result {
        Err(GenError::InvalidIdentifier { ident, reason }) => {
            assert_eq!(ident, keyword);
            assert!(reason.contains("key word"));
        }
        other => panic!("expected keyword rejection, got {other:?}"),
    }
}

#[test_case("1abc")]
#[test_case("a-b")]
#[test_case("a.b")]
#[test_case("a b")]
fn Identifier___illegal_syntax___fails(raw: &str) {
    assert!(Identifier::new(raw).is_err());
}

#[test]
fn Identifier___exported___capitalizes_first_letter() {
    let ident = Identifier::exported("hello").unwrap();

    assert_eq!(ident.as_str(), "Hello");
    assert!(ident.is_exported());
}

#[test]
fn Identifier___unexported___lowercases_first_letter() {
    let ident = Identifier::unexported("HelloWorld").unwrap();

    assert_eq!(ident.as_str(), "helloWorld");
    assert!(!ident.is_exported());
}

#[test]
fn Identifier___unexported_keyword___fails_after_transform() {
    let result = Identifier::unexported("Func");

    assert!(result.is_err());
}

#[test]
fn validate_selector___dotted_path___accepted() {
    assert!(validate_selector("req.Header.Get", "Block", "function").is_ok());
    assert!(validate_selector("len", "Block", "function").is_ok());
}

#[test]
fn validate_selector___empty___names_builder_and_field() {
    let err = validate_selector("", "Block", "function").unwrap_err();

    assert_eq!(err.to_string(), "Block: function is missing");
}

#[test]
fn validate_selector___keyword_segment___fails() {
    let result = validate_selector("s.func", "Block", "function");

    assert!(matches!(result, Err(GenError::InvalidIdentifier { .. })));
}

#[test]
fn validate_operand___expression___accepted() {
    assert!(validate_operand("len(errorFunc)", "Block", "left side").is_ok());
    assert!(validate_operand("\"application/json\"", "Block", "left side").is_ok());
}

#[test]
fn validate_operand___keyword___fails() {
    assert!(validate_operand("return", "Block", "left side").is_err());
}

#[test]
fn validate_parameters___missing_name___fails_with_missing_field() {
    let params = vec![Parameter::new("", TypeReference::string())];

    let err = validate_parameters(&params).unwrap_err();

    assert!(matches!(err, GenError::MissingField { .. }));
    assert!(err.to_string().contains("name of parameter"));
}

#[test]
fn validate_parameters___keyword_name___fails() {
    let params = vec![Parameter::new("type", TypeReference::string())];

    assert!(validate_parameters(&params).is_err());
}

#[test]
fn param_list___two_params___joined() {
    let params = vec![
        Parameter::new("s", TypeReference::string()),
        Parameter::new("sep", TypeReference::string()),
    ];

    assert_eq!(param_list(&params), "s string, sep string");
}
