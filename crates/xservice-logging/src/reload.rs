//! Changing the log level after the subscriber is installed
//!
//! The plugin only learns its configured level once the request parameter
//! is parsed, which happens after logging is set up.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;
use xservice_core::LogLevel;

type FilterHandle = reload::Handle<LevelFilter, tracing_subscriber::Registry>;

#[derive(Default)]
struct ReloadState {
    handle: Option<FilterHandle>,
    level: Option<LogLevel>,
    pinned: bool,
}

/// Handle for changing the level filter of the installed subscriber
pub struct ReloadHandle {
    state: Mutex<ReloadState>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ReloadState::default()),
        }
    }

    /// The handle used by [`crate::init_logging`]
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Store the handle of a freshly installed filter.
    ///
    /// A pinned handle ignores later reloads; `XSERVICE_LOG` pins the level.
    pub fn set_handle(&self, handle: FilterHandle, level: LogLevel, pinned: bool) {
        let mut state = self.state.lock();
        state.handle = Some(handle);
        state.level = Some(level);
        state.pinned = pinned;
    }

    /// Level currently applied, `None` before initialization
    pub fn current_level(&self) -> Option<LogLevel> {
        self.state.lock().level
    }

    pub fn is_pinned(&self) -> bool {
        self.state.lock().pinned
    }

    /// Switch the filter to `level`. Returns `Ok(false)` when the level is
    /// pinned by the environment and was left alone.
    pub fn reload_level(&self, level: LogLevel) -> Result<bool, String> {
        let mut state = self.state.lock();
        if state.pinned {
            return Ok(false);
        }
        let Some(handle) = state.handle.as_ref() else {
            return Err("Reload handle not initialized".to_string());
        };
        handle
            .reload(level_filter(level))
            .map_err(|e| format!("Failed to reload filter: {e}"))?;
        state.level = Some(level);
        Ok(true)
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a [`LogLevel`] to the tracing filter admitting it
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
