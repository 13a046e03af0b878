//! Naming convention utilities for code generation.
//!
//! Schema names arrive in protobuf style (`snake_case`, dotted packages,
//! slash separated file paths) and leave as Go identifiers and file names.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `hello_world` | [`camel_case`] | `HelloWorld` |
//! | `HelloWorld` | [`snake_case`] | `hello_world` |
//! | `a/b/file.proto` | [`base_name`] | `file` |
//! | `hello` | [`exported`] | `Hello` |
//! | `Hello` | [`unexported`] | `hello` |

/// Convert a schema name to an exported CamelCase Go name.
///
/// A leading underscore becomes `X`, an underscore followed by a lowercase
/// letter is dropped, digits are kept, and every word starts upper case.
/// Output feeds routing tables, so the mapping never changes.
///
/// ```
/// use xservice_core::naming::camel_case;
///
/// assert_eq!(camel_case("hello_world"), "HelloWorld");
/// assert_eq!(camel_case("_my_field"), "XMyField");
/// assert_eq!(camel_case("v2_api"), "V2Api");
/// assert_eq!(camel_case("HelloWorld"), "HelloWorld");
/// ```
pub fn camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return String::new();
    }

    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 1);
    let mut i = 0;
    if bytes[0] == b'_' {
        out.push(b'X');
        i += 1;
    }

    while i < bytes.len() {
        let c = bytes[i];
        if c == b'_' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_lowercase() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            out.push(c);
            i += 1;
            continue;
        }
        out.push(c.to_ascii_uppercase());
        while i + 1 < bytes.len() && bytes[i + 1].is_ascii_lowercase() {
            i += 1;
            out.push(bytes[i]);
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Insert `_` before every interior upper case letter, then lower case all.
///
/// ```
/// use xservice_core::naming::snake_case;
///
/// assert_eq!(snake_case("HelloWorld"), "hello_world");
/// assert_eq!(snake_case("helloworld.proto"), "helloworld.proto");
/// ```
pub fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Last path element with its final `.suffix` removed.
///
/// ```
/// use xservice_core::naming::base_name;
///
/// assert_eq!(base_name("api/hello/helloworld.proto"), "helloworld");
/// assert_eq!(base_name("example.helloworld"), "example");
/// assert_eq!(base_name("plain"), "plain");
/// ```
pub fn base_name(name: &str) -> &str {
    let last = match name.rfind('/') {
        Some(i) => &name[i + 1..],
        None => name,
    };
    match last.rfind('.') {
        Some(i) => &last[..i],
        None => last,
    }
}

/// Upper case the first character.
pub fn exported(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower case the first character.
pub fn unexported(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Strip every character that cannot appear in a Go identifier.
///
/// Dots, dashes and slashes vanish, so `google.protobuf` becomes
/// `googleprotobuf`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Output file name for a schema file: the directory is kept and the file
/// name is snake cased with `.go` appended.
///
/// ```
/// use xservice_core::naming::go_file_name;
///
/// assert_eq!(go_file_name("api_hello_world/helloworld.proto"), "api_hello_world/helloworld.proto.go");
/// assert_eq!(go_file_name("Service.proto"), "service.proto.go");
/// ```
pub fn go_file_name(file_name: &str) -> String {
    match file_name.rfind('/') {
        Some(i) => format!(
            "{}/{}.go",
            &file_name[..i],
            snake_case(&file_name[i + 1..])
        ),
        None => format!("{}.go", snake_case(file_name)),
    }
}

/// Join values with `, ` as they appear in argument lists.
pub fn value_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
