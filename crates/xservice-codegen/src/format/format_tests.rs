#![allow(non_snake_case)]

use super::*;

// ============================================================================
// Indentation
// ============================================================================

#[test]
fn format_source___flat_function___body_indented_with_tab() {
    let source = "func A() {\nreturn\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "func A() {\n\treturn\n}\n");
}

#[test]
fn format_source___nested_blocks___one_tab_per_level() {
    let source = "func A() {\nif ok {\nx()\n} else {\ny()\n}\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "func A() {\n\tif ok {\n\t\tx()\n\t} else {\n\t\ty()\n\t}\n}\n"
    );
}

#[test]
fn format_source___existing_indentation___replaced() {
    let source = "type A struct {\n        b   string\n  c int\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "type A struct {\n\tb string\n\tc int\n}\n");
}

#[test]
fn format_source___switch_cases___aligned_with_switch() {
    let source = "switch x {\ncase \"a\":\nf()\ndefault:\ng()\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "switch x {\ncase \"a\":\n\tf()\ndefault:\n\tg()\n}\n"
    );
}

#[test]
fn format_source___grouped_imports___parens_indent() {
    let source = "import (\n\"fmt\"\n)";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "import (\n\t\"fmt\"\n)\n");
}

#[test]
fn format_source___braces_inside_string___ignored() {
    let source = "func A() {\nx := \"{{\"\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "func A() {\n\tx := \"{{\"\n}\n");
}

#[test]
fn format_source___braces_inside_comment___ignored() {
    let source = "// a { b\nfunc A() {\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "// a { b\nfunc A() {\n}\n");
}

#[test]
fn format_source___raw_string_lines___kept_verbatim() {
    let source = "var a = `\n   keep {\n`";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "var a = `\n   keep {\n`\n");
}

// ============================================================================
// Alignment
// ============================================================================

#[test]
fn format_source___struct_fields___type_column_aligned() {
    let source = "type C struct {\nclient transport.HTTPClient\nurls [1]string\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "type C struct {\n\tclient transport.HTTPClient\n\turls   [1]string\n}\n"
    );
}

#[test]
fn format_source___embedded_field___not_padded_and_ends_run() {
    let source = "type S struct {\nHelloWorld\nhooks *hooks.ServerHooks\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "type S struct {\n\tHelloWorld\n\thooks *hooks.ServerHooks\n}\n"
    );
}

#[test]
fn format_source___blank_line_between_fields___separate_runs() {
    let source = "type S struct {\na int\n\nlonger string\nb bool\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "type S struct {\n\ta int\n\n\tlonger string\n\tb      bool\n}\n"
    );
}

#[test]
fn format_source___field_comments___run_continues() {
    let source = "type S struct {\n// A\na int\n// Longer\nlonger string\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "type S struct {\n\t// A\n\ta      int\n\t// Longer\n\tlonger string\n}\n"
    );
}

#[test]
fn format_source___tagged_fields___tag_column_aligned() {
    let source = "type M struct {\nName string `json:\"name\"`\nCount int32 `json:\"count\"`\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "type M struct {\n\tName  string `json:\"name\"`\n\tCount int32  `json:\"count\"`\n}\n"
    );
}

#[test]
fn format_source___keyed_literal___values_aligned() {
    let source = "func F() {\nreturn &S{\nHelloWorld: svc,\nhooks: hooks,\n}\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "func F() {\n\treturn &S{\n\t\tHelloWorld: svc,\n\t\thooks:      hooks,\n\t}\n}\n"
    );
}

#[test]
fn format_source___keyed_literal_in_if___aligned_one_level_deeper() {
    let source = "if ok {\nreturn &C{\nclient: httpClient,\nurls: urls,\n}\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(
        formatted,
        "if ok {\n\treturn &C{\n\t\tclient: httpClient,\n\t\turls:   urls,\n\t}\n}\n"
    );
}

#[test]
fn format_source___single_field___left_alone() {
    let source = "type S struct {\nhooks   *hooks.ServerHooks\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "type S struct {\n\thooks   *hooks.ServerHooks\n}\n");
}

#[test]
fn format_source___labels_and_short_declarations___not_treated_as_keys() {
    let source = "func F() {\na := 1\nbb := 2\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "func F() {\n\ta := 1\n\tbb := 2\n}\n");
}

#[test]
fn format_source___aligned_input___unchanged() {
    let source = "type C struct {\n\tclient transport.HTTPClient\n\turls   [1]string\n}\n";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, source);
}

// ============================================================================
// Blank lines
// ============================================================================

#[test]
fn format_source___blank_line_runs___collapsed() {
    let source = "const a = 1\n\n\n\nconst b = 2";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "const a = 1\n\nconst b = 2\n");
}

#[test]
fn format_source___blank_after_open_and_before_close___removed() {
    let source = "func A() {\n\nx()\n\n}";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "func A() {\n\tx()\n}\n");
}

#[test]
fn format_source___leading_and_trailing_blanks___removed() {
    let source = "\n\npackage a\n\n\n";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "package a\n");
}

#[test]
fn format_source___trailing_whitespace___trimmed() {
    let source = "package a   \t";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, "package a\n");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn format_source___unbalanced_brace___format_error_with_source() {
    let source = "func A() {\nx()";

    let err = format_source(source).unwrap_err();

    match err {
        GenError::Format { reason, source_text } => {
            assert!(reason.contains("never closed"));
            assert_eq!(source_text, source);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn format_source___mismatched_closer___format_error() {
    let err = format_source("f(a]").unwrap_err();

    assert!(err.is_format());
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn format_source___stray_closer___format_error() {
    let err = format_source("}\n").unwrap_err();

    assert!(err.to_string().contains("unexpected '}'"));
}

#[test]
fn format_source___unterminated_string___format_error() {
    let err = format_source("x := \"abc").unwrap_err();

    assert!(err.is_format());
}

#[test]
fn format_source___else_after_function_brace___format_error() {
    let source = "func F() {\n} else {\nfmt.Println(\"x\")\n}";

    let err = format_source(source).unwrap_err();

    match err {
        GenError::Format { reason, source_text } => {
            assert!(reason.contains("else without a preceding if at line 2"));
            assert_eq!(source_text, source);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn format_source___else_after_else___format_error() {
    let source = "if a {\n} else {\n} else {\n}";

    let err = format_source(source).unwrap_err();

    assert!(err.to_string().contains("line 3"));
}

#[test]
fn format_source___else_if_chain___accepted() {
    let source = "if a {\nx()\n} else if b {\ny()\n} else {\nz()\n}";

    let formatted = format_source(source).unwrap();

    assert!(formatted.contains("} else if b {\n\ty()\n} else {"));
}

#[test]
fn format_source___else_on_its_own_line___format_error() {
    let err = format_source("if a {\n}\nelse {\n}").unwrap_err();

    assert!(err.is_format());
}

#[test]
fn format_source___case_outside_switch___format_error() {
    let source = "func F() {\ncase \"a\":\nf()\n}";

    let err = format_source(source).unwrap_err();

    assert!(err.to_string().contains("case outside of a switch at line 2"));
}

#[test]
fn format_source___default_inside_if___format_error() {
    let err = format_source("if a {\ndefault:\n}").unwrap_err();

    assert!(err.to_string().contains("default outside of a switch"));
}

#[test]
fn format_source___type_switch_cases___accepted() {
    let source = "switch v := x.(type) {\ncase int:\nf(v)\ndefault:\n}";

    assert!(format_source(source).is_ok());
}

#[test]
fn format_source___case_in_string___ignored() {
    let source = "func F() {\nx := `\ncase a:`\n}";

    assert!(format_source(source).is_ok());
}

#[test]
fn format_fragment___declaration___trimmed_without_newline() {
    let formatted = format_fragment("\nfunc A() {\nreturn\n}\n\n").unwrap();

    assert_eq!(formatted, "func A() {\n\treturn\n}");
}

#[test]
fn format_source___formatted_input___unchanged() {
    let source = "package a\n\nfunc A() {\n\tif ok {\n\t\tx()\n\t}\n}\n";

    let formatted = format_source(source).unwrap();

    assert_eq!(formatted, source);
}
