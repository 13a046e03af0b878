//! xservice-logging - tracing setup for the protoc plugin
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr subscriber
//! - [`ReloadHandle`] for applying the configured level once it is known
//! - `XSERVICE_LOG` directives overriding the configured level

mod layer;
mod reload;

pub use layer::{LOG_ENV, env_filter, init_logging, text_layer};
pub use reload::{ReloadHandle, level_filter};
pub use xservice_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
