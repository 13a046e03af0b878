//! xservice-descriptor - Resolution of schema descriptor sets
//!
//! Before any code is generated the descriptor set is resolved once:
//! - [`package`] decides the Go package of every file
//! - [`registry`] indexes message definitions and documentation comments
//! - [`resolve`] combines both into an immutable [`GenerationContext`]

pub mod package;
pub mod registry;
pub mod resolve;

pub use package::{GoPackageOption, deduce_generated_package, parse_go_package};
pub use registry::{MessageDefinition, Registry, prepare_comment};
pub use resolve::{GenerationContext, resolve};

/// Descriptor types of the schema compiler, re-exported for callers
pub use prost_types::{
    DescriptorProto, FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto,
    ServiceDescriptorProto,
};
