//! Generator configuration types

use serde::{Deserialize, Serialize};
use std::path::Path;
use xservice_core::wire::DEFAULT_PROTOCOL_PREFIX;
use xservice_core::{ContentType, GenError, GenResult, LogLevel};

/// Which declarations are emitted for every service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Interface, one client per content type, and the server
    #[default]
    Api,
    /// Interface and server only
    Server,
}

impl Mode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "api" => Some(Mode::Api),
            "server" => Some(Mode::Server),
            _ => None,
        }
    }

    pub fn emits_clients(self) -> bool {
        self == Mode::Api
    }
}

/// How output file names are chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathsMode {
    /// Next to the schema file: `a/b.proto` becomes `a/b.proto.go`
    #[default]
    SourceRelative,
    /// Under the `go_package` import path when the file declares one
    Import,
}

impl PathsMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "source_relative" => Some(PathsMode::SourceRelative),
            "import" => Some(PathsMode::Import),
            _ => None,
        }
    }
}

/// Generator configuration, read from the plugin parameter string or a
/// TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Declarations emitted per service
    #[serde(default)]
    pub mode: Mode,

    /// Import root of the runtime framework packages
    #[serde(default = "default_framework")]
    pub framework: String,

    /// First segment of every generated route
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Plugin log verbosity
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub paths: PathsMode,

    /// Encodings that get a client and a server handler
    #[serde(default = "default_content_types")]
    pub content_types: Vec<ContentType>,
}

fn default_framework() -> String {
    "github.com/donutloop/xservice/framework".to_string()
}

fn default_path_prefix() -> String {
    DEFAULT_PROTOCOL_PREFIX.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_content_types() -> Vec<ContentType> {
    ContentType::ALL.to_vec()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            framework: default_framework(),
            path_prefix: default_path_prefix(),
            log_level: default_log_level(),
            paths: PathsMode::default(),
            content_types: default_content_types(),
        }
    }
}

fn config_error(message: impl Into<String>) -> GenError {
    GenError::Config(message.into())
}

impl GeneratorConfig {
    /// Create a configuration with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> GenResult<Self> {
        let config: Self = toml::from_str(text).map_err(|err| config_error(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> GenResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| config_error(format!("cannot read {}: {err}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Parse a plugin parameter such as `mode=server,log_level=debug`.
    ///
    /// A `config=<file>` entry is loaded first wherever it appears; the
    /// other entries override it. Content types are joined with `+`, as in
    /// `content_types=json+protobuf`. An empty parameter yields defaults.
    pub fn from_parameter(parameter: &str) -> GenResult<Self> {
        let mut entries = Vec::new();
        for entry in parameter.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| config_error(format!("expected key=value, got {entry:?}")))?;
            entries.push((key.trim(), value.trim()));
        }

        let mut config = match entries.iter().find(|(key, _)| *key == "config") {
            Some((_, path)) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };
        for (key, value) in entries {
            config.apply(key, value)?;
        }
        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, key: &str, value: &str) -> GenResult<()> {
        let invalid = || config_error(format!("invalid value {value:?} for {key}"));
        match key {
            "config" => {}
            "mode" => self.mode = Mode::parse(value).ok_or_else(invalid)?,
            "framework" => self.framework = value.to_string(),
            "path_prefix" => self.path_prefix = value.to_string(),
            "log_level" => {
                LogLevel::parse(value).ok_or_else(invalid)?;
                self.log_level = value.to_string();
            }
            "paths" => self.paths = PathsMode::parse(value).ok_or_else(invalid)?,
            "content_types" => {
                let mut content_types = Vec::new();
                for name in value.split('+').map(str::trim) {
                    let content_type = match name {
                        "json" => ContentType::Json,
                        "protobuf" => ContentType::Protobuf,
                        _ => return Err(invalid()),
                    };
                    if !content_types.contains(&content_type) {
                        content_types.push(content_type);
                    }
                }
                self.content_types = content_types;
            }
            _ => return Err(config_error(format!("unknown generator option {key:?}"))),
        }
        Ok(())
    }

    /// Reject values no generated code could be built from
    pub fn validate(&self) -> GenResult<()> {
        if self.content_types.is_empty() {
            return Err(config_error("content_types must name at least one encoding"));
        }
        if self.framework.trim().is_empty() {
            return Err(config_error("framework import root is empty"));
        }
        if self.framework.starts_with('/') || self.framework.ends_with('/') {
            return Err(config_error(format!(
                "framework import root {:?} must not start or end with '/'",
                self.framework
            )));
        }
        let prefix_legal = !self.path_prefix.is_empty()
            && self
                .path_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !prefix_legal {
            return Err(config_error(format!(
                "path_prefix {:?} must be a single URL path segment",
                self.path_prefix
            )));
        }
        if LogLevel::parse(&self.log_level).is_none() {
            return Err(config_error(format!("unknown log level {:?}", self.log_level)));
        }
        Ok(())
    }

    /// The configured log level, `warn` when it does not parse
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Warn)
    }

    /// Content types in emission order, JSON before protobuf
    pub fn ordered_content_types(&self) -> Vec<ContentType> {
        ContentType::ALL
            .into_iter()
            .filter(|ct| self.content_types.contains(ct))
            .collect()
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
