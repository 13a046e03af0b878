//! Packages and types of the runtime framework generated code links against

use xservice_core::{ContentType, GenResult, Import, TypeReference};

/// The framework packages generated files may import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkPackage {
    Transport,
    XContext,
    Errors,
    Hooks,
    Server,
    XHttp,
}

impl FrameworkPackage {
    pub const ALL: [FrameworkPackage; 6] = [
        FrameworkPackage::Transport,
        FrameworkPackage::XContext,
        FrameworkPackage::Errors,
        FrameworkPackage::Hooks,
        FrameworkPackage::Server,
        FrameworkPackage::XHttp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FrameworkPackage::Transport => "transport",
            FrameworkPackage::XContext => "xcontext",
            FrameworkPackage::Errors => "errors",
            FrameworkPackage::Hooks => "hooks",
            FrameworkPackage::Server => "server",
            FrameworkPackage::XHttp => "xhttp",
        }
    }
}

/// Framework functions that encode and decode one content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBinding {
    pub decoder: &'static str,
    pub encoder: &'static str,
    /// `transport` function the client sends requests through
    pub request: &'static str,
}

pub fn content_binding(content_type: ContentType) -> ContentBinding {
    match content_type {
        ContentType::Json => ContentBinding {
            decoder: "transport.DecodeJSONRequest",
            encoder: "transport.EncodeJSONResponse",
            request: "transport.DoJSONRequest",
        },
        ContentType::Protobuf => ContentBinding {
            decoder: "transport.DecodePROTORequest",
            encoder: "transport.EncodePROTOResponse",
            request: "transport.DoProtobufferRequest",
        },
    }
}

/// Framework rooted at a configurable import path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    root: String,
}

impl Framework {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn import(&self, package: FrameworkPackage) -> Import {
        Import::new(format!("{}/{}", self.root, package.name()))
    }

    /// Every framework package, in declaration order
    pub fn imports(&self) -> Vec<Import> {
        FrameworkPackage::ALL
            .into_iter()
            .map(|package| self.import(package))
            .collect()
    }

    pub fn type_ref(&self, package: FrameworkPackage, name: &str) -> GenResult<TypeReference> {
        TypeReference::imported(&self.import(package), name)
    }
}

/// `context.Context`
pub fn context_type() -> GenResult<TypeReference> {
    TypeReference::imported(&Import::new("context"), "Context")
}

/// `http.ResponseWriter`
pub fn response_writer() -> GenResult<TypeReference> {
    TypeReference::imported(&Import::new("net/http"), "ResponseWriter")
}

/// `*http.Request`
pub fn request_pointer() -> GenResult<TypeReference> {
    Ok(TypeReference::imported(&Import::new("net/http"), "Request")?.pointer())
}

/// `*http.Client`
pub fn http_client_pointer() -> GenResult<TypeReference> {
    Ok(TypeReference::imported(&Import::new("net/http"), "Client")?.pointer())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn Framework___import___joins_root_and_package() {
        let framework = Framework::new("github.com/acme/rpc");

        let import = framework.import(FrameworkPackage::XContext);

        assert_eq!(import.path(), "github.com/acme/rpc/xcontext");
        assert_eq!(import.qualifier(), "xcontext");
    }

    #[test]
    fn Framework___type_ref___qualified_and_imports_package() {
        let framework = Framework::new("github.com/donutloop/xservice/framework");

        let ty = framework
            .type_ref(FrameworkPackage::Hooks, "ServerHooks")
            .unwrap()
            .pointer();

        assert_eq!(ty.name(), "*hooks.ServerHooks");
        assert!(
            ty.required_imports()
                .contains(&Import::new("github.com/donutloop/xservice/framework/hooks"))
        );
    }

    #[test]
    fn Framework___imports___lists_every_package_once() {
        let imports = Framework::new("x.io/fw").imports();

        assert_eq!(imports.len(), FrameworkPackage::ALL.len());
        assert_eq!(imports[0].path(), "x.io/fw/transport");
        assert_eq!(imports[5].path(), "x.io/fw/xhttp");
    }

    #[test]
    fn content_binding___protobuf___uses_proto_codec_pair() {
        let binding = content_binding(ContentType::Protobuf);

        assert_eq!(binding.decoder, "transport.DecodePROTORequest");
        assert_eq!(binding.encoder, "transport.EncodePROTOResponse");
        assert_eq!(binding.request, "transport.DoProtobufferRequest");
    }

    #[test]
    fn standard_types___render_with_package_qualifier() {
        assert_eq!(context_type().unwrap().name(), "context.Context");
        assert_eq!(response_writer().unwrap().name(), "http.ResponseWriter");
        assert_eq!(request_pointer().unwrap().name(), "*http.Request");
        assert_eq!(http_client_pointer().unwrap().name(), "*http.Client");
    }
}
