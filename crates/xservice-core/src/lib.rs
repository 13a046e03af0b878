//! xservice-core - Identifiers, types and the wire contract
//!
//! This crate provides the foundational pieces every other xservice crate
//! builds on:
//! - [`Identifier`] and [`Parameter`] validation
//! - [`TypeReference`] for Go types and the [`Import`]s they need
//! - [`naming`] transforms such as [`naming::camel_case`]
//! - [`GenError`] for error handling
//! - [`wire`] constants and tables of the generated HTTP protocol

pub mod error;
pub mod ident;
pub mod naming;
pub mod types;
pub mod wire;

pub use error::{GenError, GenResult};
pub use ident::{Identifier, Parameter};
pub use types::{Import, Primitive, TypeKind, TypeReference};
pub use wire::{ContentType, ErrorBody, ErrorCode};

/// Log levels accepted by the generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Parse a level name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ContentType, ErrorBody, ErrorCode, GenError, GenResult, Identifier, Import, LogLevel,
        Parameter, Primitive, TypeKind, TypeReference,
    };
}
