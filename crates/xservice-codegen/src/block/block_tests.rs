#![allow(non_snake_case)]

use super::*;
use crate::format::format_fragment;
use test_case::test_case;
use xservice_core::Primitive;

fn http() -> Import {
    Import::new("net/http")
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn Block___call___renders_invocation() {
    let mut block = Block::new();

    block.call("s.writeError", &["ctx", "resp", "err"]).unwrap();

    assert_eq!(block.lines(), ["s.writeError(ctx, resp, err)"]);
}

#[test]
fn Block___define_and_assign_call___operators_differ() {
    let mut block = Block::new();

    block.define_call(&["ctx"], "req.Context", &[]).unwrap();
    block
        .assign_call(&["ctx", "err"], "transport.CallRequestReceived", &["ctx", "s.hooks"])
        .unwrap();

    assert_eq!(
        block.lines(),
        [
            "ctx := req.Context()",
            "ctx, err = transport.CallRequestReceived(ctx, s.hooks)"
        ]
    );
}

#[test]
fn Block___declare_and_new___record_imports() {
    let client = TypeReference::imported(&http(), "Client").unwrap().pointer();
    let mut block = Block::new();

    block.declare_var("err", &TypeReference::error()).unwrap();
    block.new_instance("c", &client).unwrap();

    assert_eq!(block.lines(), ["var err error", "c := new(*http.Client)"]);
    assert!(block.imports().contains(&http()));
}

#[test]
fn Block___define_operation___binary_expression() {
    let mut block = Block::new();

    block
        .define_operation("prefix", "URLBase", Operator::Add, "HelloWorldPathPrefix")
        .unwrap();

    assert_eq!(block.lines(), ["prefix := URLBase + HelloWorldPathPrefix"]);
}

#[test]
fn Block___define_operation_with_assign___invalid_operator() {
    let mut block = Block::new();

    let err = block
        .define_operation("x", "a", Operator::Assign, "b")
        .unwrap_err();

    assert!(matches!(err.root(), GenError::InvalidOperator { .. }));
    assert!(block.is_empty());
}

#[test]
fn Block___type_assert___comma_ok_form() {
    let client = TypeReference::imported(&http(), "Client").unwrap().pointer();
    let mut block = Block::new();

    block.type_assert(&["httpClient", "ok"], "client", &client).unwrap();

    assert_eq!(block.lines(), ["httpClient, ok := client.(*http.Client)"]);
}

#[test]
fn Block___struct_field_assign___selector_assignment() {
    let mut block = Block::new();

    block
        .struct_field_assign("server", "logErrorFunc", "errorFunc[0]")
        .unwrap();

    assert_eq!(block.lines(), ["server.logErrorFunc = errorFunc[0]"]);
}

#[test]
fn Block___range_and_defer___statements() {
    let mut block = Block::new();

    block.range_begin("_", "v", "values").unwrap();
    block.defer_call("transport.Closebody", &["req.Body", "s.logErrorFunc"]).unwrap();
    block.close();

    assert_eq!(
        block.lines(),
        [
            "for _, v := range values {",
            "defer transport.Closebody(req.Body, s.logErrorFunc)",
            "}"
        ]
    );
}

#[test]
fn Block___returns___three_forms() {
    let mut block = Block::new();

    block.ret();
    block.return_values(&["out", "err"]).unwrap();
    block.return_call("s.Hello", &["ctx", "in"]).unwrap();

    assert_eq!(
        block.lines(),
        ["return", "return out, err", "return s.Hello(ctx, in)"]
    );
}

#[test]
fn Block___return_without_values___missing_field() {
    let err = Block::new().return_values(&[]).unwrap_err();

    assert_eq!(err.to_string(), "Block: return values is missing");
}

// ============================================================================
// Conditionals
// ============================================================================

#[test]
fn Block___if_chain___formats_as_go() {
    let mut block = Block::new();

    block.if_begin("modifiedHeader", Operator::Equal, "xhttp.ApplicationJson").unwrap();
    block.ret();
    block.else_if("modifiedHeader", Operator::Equal, "xhttp.ApplicationProtobuf").unwrap();
    block.ret();
    block.else_branch();
    block.ret();
    block.close();

    assert_eq!(
        format_fragment(&block.source()).unwrap(),
        "if modifiedHeader == xhttp.ApplicationJson {\n\
         \treturn\n\
         } else if modifiedHeader == xhttp.ApplicationProtobuf {\n\
         \treturn\n\
         } else {\n\
         \treturn\n\
         }"
    );
}

#[test]
fn Block___if_scoped___initializer_before_condition() {
    let init = Block::call_expr(&["err"], "decodeRequest", &["ctx", "req", "reqContent"]).unwrap();
    let mut block = Block::new();

    block.if_scoped_begin(&init, "err", Operator::NotEqual, "nil").unwrap();

    assert_eq!(
        block.lines(),
        ["if err := decodeRequest(ctx, req, reqContent); err != nil {"]
    );
}

#[test_case(Operator::Add ; "arithmetic")]
#[test_case(Operator::Define ; "define")]
#[test_case(Operator::Shl ; "shift")]
fn Block___if_with_non_comparison___invalid_operator(op: Operator) {
    let mut block = Block::new();

    let err = block.if_begin("a", op, "b").unwrap_err();

    assert!(err.to_string().contains("invalid in if scope"));
}

// ============================================================================
// Validation
// ============================================================================

#[test_case("", "function is missing" ; "empty callee")]
#[test_case("a..b", "selector segment" ; "empty segment")]
#[test_case("go", "invalid identifier \"go\"" ; "keyword callee")]
fn Block___call_with_bad_callee___error(callee: &str, expected: &str) {
    let err = Block::new().call(callee, &[]).unwrap_err();

    assert!(err.to_string().contains(expected), "{err}");
}

#[test]
fn Block___define_call_without_targets___missing_variable() {
    let err = Block::new().define_call(&[], "f", &[]).unwrap_err();

    assert_eq!(err.to_string(), "Block: variable is missing");
}

#[test]
fn Block___keyword_target___invalid_identifier_within_block() {
    let err = Block::new().define_call(&["type"], "f", &[]).unwrap_err();

    assert!(err.to_string().starts_with("Block: invalid identifier \"type\""));
}

#[test]
fn Block___empty_argument___missing_argument() {
    let err = Block::new().call("f", &["a", ""]).unwrap_err();

    assert_eq!(err.to_string(), "Block: argument is missing");
}

// ============================================================================
// Nested constructs
// ============================================================================

#[test]
fn Block___recover_guard___defer_after_wrapper() {
    let mut handler = Block::new();
    handler
        .define_call(&["terr"], "errors.InternalError", &["\"Internal service panic\""])
        .unwrap();
    handler.call("s.writeError", &["ctx", "resp", "terr"]).unwrap();
    let mut block = Block::new();

    block.recover_guard("deferWrapper", &handler).unwrap();

    assert_eq!(
        format_fragment(&block.source()).unwrap(),
        "deferWrapper := func() {\n\
         \tif r := recover(); r != nil {\n\
         \t\tterr := errors.InternalError(\"Internal service panic\")\n\
         \t\ts.writeError(ctx, resp, terr)\n\
         \t\tpanic(r)\n\
         \t}\n\
         }\n\
         defer deferWrapper()"
    );
}

#[test]
fn Block___struct_literal_by_reference___ampersand_after_prefix() {
    let mut literal = StructLiteral::new(TypeReference::named("client").unwrap());
    literal.field("urls", "urls").unwrap();
    let mut block = Block::new();

    block.struct_literal("return", &literal, true).unwrap();

    assert_eq!(block.lines(), ["return &client{\nurls: urls,\n}"]);
}

#[test]
fn Block___struct_literal_without_prefix___missing_statement() {
    let literal = StructLiteral::new(TypeReference::named("client").unwrap());

    let err = Block::new().struct_literal(" ", &literal, false).unwrap_err();

    assert_eq!(err.to_string(), "Block: statement is missing");
}

#[test]
fn Block___slice_literal___element_imports_recorded() {
    let mut literal = SliceLiteral::slice("codes", TypeReference::primitive(Primitive::Int)).unwrap();
    literal.push("1").unwrap();
    let mut block = Block::new();

    block.slice_literal(&literal).unwrap();

    assert_eq!(block.lines(), ["codes := []int{\n1,\n}"]);
}

#[test]
fn Block___extend___appends_lines_and_imports() {
    let mut inner = Block::new();
    inner.uses(http()).ret();
    let mut block = Block::new();
    block.call("f", &[]).unwrap();

    block.extend(&inner);

    assert_eq!(block.lines(), ["f()", "return"]);
    assert!(block.imports().contains(&http()));
}
