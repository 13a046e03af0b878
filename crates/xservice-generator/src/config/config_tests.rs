#![allow(non_snake_case)]

use super::*;
use std::io::Write;

#[test]
fn GeneratorConfig___default___has_expected_values() {
    let config = GeneratorConfig::default();

    assert_eq!(config.mode, Mode::Api);
    assert_eq!(config.framework, "github.com/donutloop/xservice/framework");
    assert_eq!(config.path_prefix, "xservice");
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.paths, PathsMode::SourceRelative);
    assert_eq!(
        config.content_types,
        vec![ContentType::Json, ContentType::Protobuf]
    );
}

#[test]
fn GeneratorConfig___from_empty_parameter___returns_defaults() {
    let config = GeneratorConfig::from_parameter("").unwrap();

    assert_eq!(config, GeneratorConfig::new());
}

#[test]
fn GeneratorConfig___from_parameter___overrides_listed_keys() {
    let config = GeneratorConfig::from_parameter("mode=server, log_level=debug").unwrap();

    assert_eq!(config.mode, Mode::Server);
    assert_eq!(config.log_level(), LogLevel::Debug);
    assert_eq!(config.path_prefix, "xservice");
}

#[test]
fn GeneratorConfig___from_parameter_with_unknown_key___config_error() {
    let err = GeneratorConfig::from_parameter("flavour=vanilla").unwrap_err();

    assert!(matches!(err, GenError::Config(_)));
    assert!(err.to_string().contains("flavour"));
}

#[test]
fn GeneratorConfig___from_parameter_without_equals___config_error() {
    let err = GeneratorConfig::from_parameter("server").unwrap_err();

    assert!(err.to_string().contains("expected key=value"));
}

#[test]
fn GeneratorConfig___content_types_with_duplicates___deduplicated() {
    let config = GeneratorConfig::from_parameter("content_types=protobuf+json+protobuf").unwrap();

    assert_eq!(
        config.content_types,
        vec![ContentType::Protobuf, ContentType::Json]
    );
    assert_eq!(
        config.ordered_content_types(),
        vec![ContentType::Json, ContentType::Protobuf]
    );
}

#[test]
fn GeneratorConfig___from_toml___missing_keys_take_defaults() {
    let config = GeneratorConfig::from_toml("mode = \"server\"\ncontent_types = [\"json\"]").unwrap();

    assert_eq!(config.mode, Mode::Server);
    assert_eq!(config.content_types, vec![ContentType::Json]);
    assert_eq!(config.framework, "github.com/donutloop/xservice/framework");
}

#[test]
fn GeneratorConfig___from_toml_with_unknown_field___config_error() {
    let err = GeneratorConfig::from_toml("colour = \"red\"").unwrap_err();

    assert!(matches!(err, GenError::Config(_)));
}

#[test]
fn GeneratorConfig___from_toml_with_empty_content_types___rejected() {
    let err = GeneratorConfig::from_toml("content_types = []").unwrap_err();

    assert!(err.to_string().contains("content_types"));
}

#[test]
fn GeneratorConfig___config_file_parameter___file_loaded_then_overridden() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "mode = \"server\"\npath_prefix = \"rpc\"").unwrap();
    let parameter = format!("path_prefix=twirp,config={}", file.path().display());

    let config = GeneratorConfig::from_parameter(&parameter).unwrap();

    assert_eq!(config.mode, Mode::Server);
    assert_eq!(config.path_prefix, "twirp");
}

#[test]
fn GeneratorConfig___missing_config_file___config_error() {
    let err = GeneratorConfig::from_parameter("config=/nonexistent/xservice.toml").unwrap_err();

    assert!(matches!(err, GenError::Config(_)));
    assert!(err.to_string().contains("cannot read"));
}

#[test]
fn GeneratorConfig___serialize___roundtrips_through_json() {
    let config = GeneratorConfig::from_parameter("mode=server,paths=import").unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let back: GeneratorConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, config);
    assert!(json.contains("\"mode\":\"server\""));
    assert!(json.contains("\"paths\":\"import\""));
}

#[test]
fn Mode___emits_clients___only_in_api_mode() {
    assert!(Mode::Api.emits_clients());
    assert!(!Mode::Server.emits_clients());
}
