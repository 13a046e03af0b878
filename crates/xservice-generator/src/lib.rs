//! xservice-generator - Go RPC stubs from service descriptors
//!
//! For every service of the requested schema files this crate emits:
//! - the service interface
//! - one HTTP client per configured content type
//! - a server implementing `http.Handler` that routes, negotiates the
//!   content type, and runs the framework's lifecycle hooks
//! - the gzipped schema descriptor, exposed through the server
//!
//! # Example
//!
//! ```
//! use prost_types::{
//!     DescriptorProto, FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto,
//! };
//! use xservice_generator::{GenerationRequest, generate};
//!
//! let message = |name: &str| DescriptorProto {
//!     name: Some(name.to_string()),
//!     ..Default::default()
//! };
//! let file = FileDescriptorProto {
//!     name: Some("hello.proto".to_string()),
//!     package: Some("hello".to_string()),
//!     message_type: vec![message("Req"), message("Resp")],
//!     service: vec![ServiceDescriptorProto {
//!         name: Some("Greeter".to_string()),
//!         method: vec![MethodDescriptorProto {
//!             name: Some("Greet".to_string()),
//!             input_type: Some(".hello.Req".to_string()),
//!             output_type: Some(".hello.Resp".to_string()),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let output = generate(GenerationRequest {
//!     files: vec![file],
//!     files_to_generate: vec!["hello.proto".to_string()],
//!     parameter: Some("mode=server".to_string()),
//! })
//! .unwrap();
//!
//! assert_eq!(output[0].name, "hello.proto.go");
//! assert!(output[0].content.contains("const GreeterPathPrefix string = \"/xservice/hello.Greeter/\""));
//! ```

pub mod config;
pub mod descriptor;
pub mod framework;
pub mod generator;

mod client;
mod header;
mod interface;
mod server;
mod service;

pub use config::{GeneratorConfig, Mode, PathsMode};
pub use generator::{GeneratedFile, GenerationRequest, Generator, generate};

/// Version stamped into generated headers and version accessors
pub const VERSION: &str = "v0.1.0";
