//! # xservice
//!
//! Twirp-style Go RPC stubs from protobuf service descriptors.
//!
//! For every service in a schema, xservice emits:
//! - the Go service interface
//! - HTTP clients speaking JSON and binary protobuf
//! - a server implementing `http.Handler` with routing, content-type
//!   negotiation, panic recovery and lifecycle hooks
//!
//! The `protoc-gen-xservice` binary wraps this crate as a protoc plugin.
//!
//! ## Generating from descriptors
//!
//! ```
//! use xservice::prelude::*;
//!
//! let message = |name: &str| DescriptorProto {
//!     name: Some(name.to_string()),
//!     ..Default::default()
//! };
//! let file = FileDescriptorProto {
//!     name: Some("echo.proto".to_string()),
//!     package: Some("echo".to_string()),
//!     message_type: vec![message("Ping"), message("Pong")],
//!     service: vec![ServiceDescriptorProto {
//!         name: Some("Echo".to_string()),
//!         method: vec![MethodDescriptorProto {
//!             name: Some("Call".to_string()),
//!             input_type: Some(".echo.Ping".to_string()),
//!             output_type: Some(".echo.Pong".to_string()),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let mut config = GeneratorConfig::default();
//! config.content_types = vec![ContentType::Json];
//! let generator = Generator::new(config)?;
//! let files = generator.generate(GenerationRequest {
//!     files: vec![file],
//!     files_to_generate: vec!["echo.proto".to_string()],
//!     parameter: None,
//! })?;
//!
//! assert!(files[0].content.contains("func NewEchoJSONClient("));
//! assert!(!files[0].content.contains("ProtobufferClient"));
//! # Ok::<(), GenError>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`xservice_core`] - identifiers, type references, errors and wire vocabulary
//! - [`xservice_codegen`] - Go declaration builders and the file assembler
//! - [`xservice_descriptor`] - package resolution and the message registry
//! - [`xservice_generator`] - the RPC stub generator and its configuration

// Re-export core types
pub use xservice_core::{
    ContentType, ErrorBody, ErrorCode, GenError, GenResult, Identifier, Import, LogLevel,
    Parameter, TypeReference,
};

// Re-export the generator
pub use xservice_generator::{
    GeneratedFile, GenerationRequest, Generator, GeneratorConfig, Mode, PathsMode, VERSION,
    generate,
};

// Re-export the resolver
pub use xservice_descriptor::{GenerationContext, Registry, resolve};

// Builders and descriptor types are reachable through their crates
pub use prost_types;
pub use xservice_codegen as codegen;
pub use xservice_descriptor as descriptor;

/// Prelude module for convenient imports.
///
/// Use `use xservice::prelude::*;` to import the generator entry points,
/// its configuration and the descriptor types requests are built from.
pub mod prelude {
    pub use crate::{
        ContentType, GenError, GenResult, GeneratedFile, GenerationRequest, Generator,
        GeneratorConfig, Mode, PathsMode, generate,
    };

    pub use prost_types::{
        DescriptorProto, FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto,
        ServiceDescriptorProto,
    };
}
