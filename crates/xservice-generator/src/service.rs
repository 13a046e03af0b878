//! One service of a schema file, resolved into the names and types its
//! generated declarations use

use xservice_codegen::Comment;
use xservice_core::naming::{camel_case, unexported};
use xservice_core::{GenError, GenResult, TypeReference, wire};
use xservice_descriptor::{GenerationContext, prepare_comment};

/// Turn a comment lookup into its prepared lines, treating a missing
/// comment as none at all
pub(crate) fn comment_lines(lookup: GenResult<&str>) -> GenResult<Option<Vec<String>>> {
    match lookup.and_then(prepare_comment) {
        Ok(lines) => Ok(Some(lines)),
        Err(GenError::EmptyComment) => Ok(None),
        Err(err) => Err(err),
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MethodModel {
    /// Exported Go name, also the last path segment of the route
    pub name: String,
    pub input: TypeReference,
    pub output: TypeReference,
    pub comment: Option<Vec<String>>,
}

impl MethodModel {
    pub fn dispatcher(&self) -> String {
        format!("serve{}", self.name)
    }

    pub fn content_handler(&self) -> String {
        format!("serve{}Content", self.name)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ServiceModel {
    /// Exported Go name of the service interface
    pub name: String,
    /// Schema package, empty when the file declares none
    pub schema_package: String,
    /// Position of the service within its file
    pub index: usize,
    /// `package.Service`, the second path segment of every route
    pub full_name: String,
    pub protocol_prefix: String,
    pub path_prefix: String,
    pub comment: Option<Vec<String>>,
    pub methods: Vec<MethodModel>,
}

impl ServiceModel {
    pub fn resolve(
        ctx: &GenerationContext,
        file_index: usize,
        service_index: usize,
        protocol_prefix: &str,
    ) -> GenResult<Self> {
        let file = ctx.file(file_index)?;
        let service = file.service.get(service_index).ok_or_else(|| {
            GenError::InternalInvariantViolation(format!(
                "file {} has no service at index {service_index}",
                file.name()
            ))
        })?;
        let registry = ctx.registry();

        let name = camel_case(service.name());
        let schema_package = file.package().to_string();
        let full_name = wire::full_service_name(&schema_package, &name);

        let mut methods = Vec::with_capacity(service.method.len());
        for (method_index, method) in service.method.iter().enumerate() {
            methods.push(MethodModel {
                name: camel_case(method.name()),
                input: ctx.type_reference(method.input_type())?,
                output: ctx.type_reference(method.output_type())?,
                comment: comment_lines(registry.method_comment(
                    file_index,
                    service_index,
                    method_index,
                ))?,
            });
        }

        Ok(Self {
            path_prefix: wire::path_prefix(protocol_prefix, &full_name),
            protocol_prefix: protocol_prefix.to_string(),
            full_name,
            comment: comment_lines(registry.service_comment(file_index, service_index))?,
            name,
            schema_package,
            index: service_index,
            methods,
        })
    }

    /// `<Service>PathPrefix`
    pub fn path_prefix_const(&self) -> String {
        format!("{}PathPrefix", self.name)
    }

    /// `<service>Server`
    pub fn server_struct(&self) -> String {
        format!("{}Server", unexported(&self.name))
    }

    pub fn method_path(&self, method: &MethodModel) -> String {
        wire::method_path(&self.protocol_prefix, &self.full_name, &method.name)
    }

    pub fn interface_comment(&self) -> Comment {
        let mut comment = Comment::new();
        for line in self.comment.iter().flatten() {
            comment.line(line.as_str());
        }
        comment
    }
}

/// A Go interpreted string literal
pub(crate) fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn comment_lines___empty_comment___none() {
        assert_eq!(comment_lines(Err(GenError::EmptyComment)).unwrap(), None);
    }

    #[test]
    fn comment_lines___blank_text___none() {
        assert_eq!(comment_lines(Ok("  \n")).unwrap(), None);
    }

    #[test]
    fn comment_lines___other_error___propagated() {
        let err = comment_lines(Err(GenError::UnknownMessage(".x.Y".into()))).unwrap_err();

        assert!(matches!(err, GenError::UnknownMessage(_)));
    }

    #[test]
    fn comment_lines___documented___prepared_lines() {
        let lines = comment_lines(Ok(" Says hello.\n Twice.\n")).unwrap();

        assert_eq!(lines, Some(vec!["Says hello.".to_string(), "Twice.".to_string()]));
    }

    fn hello_world() -> ServiceModel {
        ServiceModel {
            name: "HelloWorld".to_string(),
            schema_package: "example.helloworld".to_string(),
            index: 0,
            full_name: "example.helloworld.HelloWorld".to_string(),
            protocol_prefix: "twirp".to_string(),
            path_prefix: "/twirp/example.helloworld.HelloWorld/".to_string(),
            comment: None,
            methods: vec![MethodModel {
                name: "Hello".to_string(),
                input: TypeReference::named("HelloReq").unwrap().pointer(),
                output: TypeReference::named("HelloResp").unwrap().pointer(),
                comment: None,
            }],
        }
    }

    #[test]
    fn ServiceModel___method_path___extends_path_prefix() {
        let service = hello_world();

        let path = service.method_path(&service.methods[0]);

        assert_eq!(path, "/twirp/example.helloworld.HelloWorld/Hello");
        assert!(path.starts_with(&service.path_prefix));
        assert_eq!(
            path,
            wire::method_path(&service.protocol_prefix, &service.full_name, "Hello")
        );
    }

    #[test]
    fn quoted___escapes_quotes_and_backslashes() {
        assert_eq!(quoted("/xservice/a.B/"), "\"/xservice/a.B/\"");
        assert_eq!(quoted("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
    }
}
