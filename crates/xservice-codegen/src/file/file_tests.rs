#![allow(non_snake_case)]

use super::*;
use crate::Method;
use crate::block::Block;
use crate::ops::Operator;
use xservice_core::{Parameter, TypeReference};

fn transport() -> Import {
    Import::new("github.com/donutloop/xservice/framework/transport")
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn GoFile___empty_package___missing_package() {
    let err = GoFile::new("", "a.proto").unwrap_err();

    assert!(matches!(err, GenError::MissingPackage));
}

#[test]
fn GoFile___empty_file_name___invalid_file_name() {
    let err = GoFile::new("main", "").unwrap_err();

    assert!(matches!(err, GenError::InvalidFileName(_)));
}

#[test]
fn GoFile___directory_file_name___invalid_file_name() {
    let err = GoFile::new("main", "api/").unwrap_err();

    assert_eq!(err.error_code(), 4);
}

#[test]
fn GoFile___keyword_package___invalid_identifier() {
    let err = GoFile::new("func", "a.proto").unwrap_err();

    assert!(err.is_construction());
}

#[test]
fn GoFile___file_name___directory_kept_and_go_suffix() {
    let file = GoFile::new("helloworld", "api/HelloWorld.proto").unwrap();

    assert_eq!(file.file_name(), "api/hello_world.proto.go");
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn GoFile___const_and_func___formatted_file() {
    let mut body = Block::new();
    body.call("fmt.Println", &["dummy"]).unwrap();
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_const(Const::new("dummy", TypeReference::string(), "\"value\"").unwrap())
        .add_func(Function::new("main", vec![], vec![]).unwrap().with_body(body));

    let rendered = String::from_utf8(file.render_and_format().unwrap()).unwrap();

    assert_eq!(
        rendered,
        "package main\n\
         \n\
         import (\n\
         \t\"fmt\"\n\
         )\n\
         \n\
         const dummy string = \"value\"\n\
         \n\
         func main() {\n\
         \tfmt.Println(dummy)\n\
         }\n"
    );
}

#[test]
fn GoFile___sections___fixed_order() {
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_func(Function::new("run", vec![], vec![]).unwrap())
        .add_type(Structure::new("alone").unwrap())
        .add_grouped_type(Structure::new("grouped").unwrap())
        .add_interface(Interface::new("Svc").unwrap())
        .add_var(Var::new("v", None, "1").unwrap())
        .add_const(Const::new("c", TypeReference::string(), "\"c\"").unwrap())
        .add_prototype(Prototype::new("Handler", vec![], vec![]).unwrap());

    let rendered = String::from_utf8(file.render_and_format().unwrap()).unwrap();

    let order = [
        "package main",
        "const c",
        "var v",
        "type Svc interface",
        "type Handler func",
        "type (",
        "type alone struct",
        "func run",
    ];
    let positions: Vec<usize> = order.iter().map(|s| rendered.find(s).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{rendered}");
}

#[test]
fn GoFile___grouped_types___indented_inside_group() {
    let mut file = GoFile::new("main", "main.proto").unwrap();
    let mut a = Structure::new("a").unwrap();
    a.add_field("name", TypeReference::string()).unwrap();
    file.add_grouped_type(a);

    let rendered = String::from_utf8(file.render_and_format().unwrap()).unwrap();

    assert!(rendered.contains("type (\n\ta struct {\n\t\tname string\n\t}\n)\n"));
}

#[test]
fn GoFile___type_with_methods___methods_follow_type() {
    let receiver = TypeReference::named("server").unwrap().pointer();
    let mut s = Structure::new("server").unwrap();
    s.add_method(Method::new("s", receiver, "Close", vec![], vec![]).unwrap());
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add(Declaration::Structure(s))
        .add(Declaration::Function(Function::new("after", vec![], vec![]).unwrap()));

    let rendered = String::from_utf8(file.render_and_format().unwrap()).unwrap();

    let ty = rendered.find("type server struct").unwrap();
    let method = rendered.find("func (s *server) Close()").unwrap();
    let func = rendered.find("func after()").unwrap();
    assert!(ty < method && method < func);
}

#[test]
fn GoFile___unused_declared_import___dropped() {
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_import(transport()).add_import(Import::new("strings"));
    file.add_func(Function::new("noop", vec![], vec![]).unwrap());

    let rendered = String::from_utf8(file.render_and_format().unwrap()).unwrap();

    assert!(!rendered.contains("import"));
}

#[test]
fn GoFile___std_and_framework_imports___grouped_std_first() {
    let client = TypeReference::imported(&transport(), "HTTPClient").unwrap();
    let params = vec![
        Parameter::new("addr", TypeReference::string()),
        Parameter::new("client", client),
    ];
    let mut body = Block::new();
    body.define_call(&["base"], "strings.TrimSpace", &["addr"])
        .unwrap();
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_func(Function::new("build", params, vec![]).unwrap().with_body(body));

    let rendered = String::from_utf8(file.render_and_format().unwrap()).unwrap();

    assert!(rendered.contains(
        "import (\n\t\"strings\"\n\n\t\"github.com/donutloop/xservice/framework/transport\"\n)"
    ));
}

#[test]
fn GoFile___header_comment___before_package() {
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.header_comment(Comment::from_text("Code generated by protoc-gen-xservice v0.1.0, DO NOT EDIT."));

    let rendered = String::from_utf8(file.render_and_format().unwrap()).unwrap();

    assert_eq!(
        rendered,
        "// Code generated by protoc-gen-xservice v0.1.0, DO NOT EDIT.\n\npackage main\n"
    );
}

#[test]
fn GoFile___unbalanced_body___format_error_with_unformatted_source() {
    let mut body = Block::new();
    body.if_begin("a", Operator::Equal, "b").unwrap();
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_func(Function::new("broken", vec![], vec![]).unwrap().with_body(body));

    let err = file.render_and_format().unwrap_err();

    assert!(err.is_format());
    assert!(err.to_string().contains("if a == b {"));
}

#[test]
fn GoFile___else_without_if___format_error() {
    let mut body = Block::new();
    body.else_branch().call("fmt.Println", &["\"x\""]).unwrap();
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_func(Function::new("F", vec![], vec![]).unwrap().with_body(body));

    let err = file.render_and_format().unwrap_err();

    assert!(err.is_format());
    assert!(err.to_string().contains("else without a preceding if"));
}

#[test]
fn GoFile___struct_fields___aligned_in_output() {
    let mut client = Structure::new("helloWorldJSONClient").unwrap();
    client
        .add_field("client", TypeReference::imported(&transport(), "HTTPClient").unwrap())
        .unwrap()
        .add_field("urls", TypeReference::string().array(1))
        .unwrap();
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_type(client);

    let rendered = String::from_utf8(file.render_and_format().unwrap()).unwrap();

    assert!(rendered.contains("\tclient transport.HTTPClient\n\turls   [1]string\n"));
}

#[test]
fn GoFile___render___keeps_declared_imports() {
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_import(Import::new("strings"));

    let rendered = file.render().unwrap();

    assert!(rendered.contains("\"strings\""));
}

#[test]
fn GoFile___render_twice___identical_bytes() {
    let mut file = GoFile::new("main", "main.proto").unwrap();
    file.add_const(Const::new("a", TypeReference::string(), "\"a\"").unwrap());

    assert_eq!(file.render_and_format().unwrap(), file.render_and_format().unwrap());
}
