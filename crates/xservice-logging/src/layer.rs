//! Subscriber setup for the plugin process
//!
//! stdout carries the plugin response, so every log line goes to stderr as
//! plain text.

use crate::reload::{ReloadHandle, level_filter};
use tracing::{Subscriber, warn};
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, reload};
use xservice_core::LogLevel;

/// Environment variable holding filter directives that override the
/// configured level, e.g. `xservice_generator=debug`
pub const LOG_ENV: &str = "XSERVICE_LOG";

/// Parse filter directives. Blank or missing directives mean no override.
pub fn env_filter(directives: Option<&str>) -> Result<Option<EnvFilter>, ParseError> {
    match directives.map(str::trim) {
        None | Some("") => Ok(None),
        Some(directives) => EnvFilter::try_new(directives).map(Some),
    }
}

/// Plain text formatting layer writing to `writer`
pub fn text_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .without_time()
}

/// Install the global subscriber at `level`.
///
/// Directives in `XSERVICE_LOG` take precedence and pin the level so later
/// [`ReloadHandle::reload_level`] calls leave it alone. Returns `false` when
/// a global subscriber was already installed.
pub fn init_logging(level: LogLevel) -> bool {
    let directives = std::env::var(LOG_ENV).ok();
    let (env, rejected) = match env_filter(directives.as_deref()) {
        Ok(env) => (env, None),
        Err(err) => (None, Some(err)),
    };
    let pinned = env.is_some();
    let initial = if pinned { LogLevel::Trace } else { level };

    let (filter, handle) = reload::Layer::new(level_filter(initial));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(env)
        .with(text_layer(std::io::stderr));
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }
    ReloadHandle::global().set_handle(handle, initial, pinned);

    if let Some(err) = rejected {
        warn!(variable = LOG_ENV, error = %err, "ignoring invalid log directives");
    }
    true
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
