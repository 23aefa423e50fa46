//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! resolving endpoints through it.

use std::io::Write;
use std::sync::Arc;

use apim_domain::constants::DEFAULT_CONNECTION_NAME;
use apim_infra::config::{self, ChainedConfigSource, ConfigSource, MapConfigSource};
use apim_infra::{ApiManagementClient, EndpointCache};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "connection_strings": {
            "ApiManagement": "serviceName=contoso;identifier=integration;key=secret",
            "Staging": "uri=https://staging.example.net;accessToken=abc"
        },
        "http": {
            "timeout_secs": 10,
            "user_agent": "integration-tests/1.0"
        }
    }"#;
    let path = write_config(json_content, "json");

    let config = config::load_from_file(Some(path.clone())).expect("Failed to load JSON config");

    assert_eq!(config.connection_strings.len(), 2);
    assert_eq!(
        config.default_connection_string(),
        Some("serviceName=contoso;identifier=integration;key=secret")
    );
    assert_eq!(config.http.timeout_secs, 10);
    assert_eq!(config.http.user_agent.as_deref(), Some("integration-tests/1.0"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[connection_strings]
ApiManagement = "uri=https://contoso.example.net;version=2015-09-15"
"#;
    let path = write_config(toml_content, "toml");

    let config = config::load_from_file(Some(path.clone())).expect("Failed to load TOML config");

    assert_eq!(
        config.default_connection_string(),
        Some("uri=https://contoso.example.net;version=2015-09-15")
    );
    assert_eq!(config.http.timeout_secs, 30, "timeout should default");
    assert!(config.http.user_agent.is_none());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_loaded_config_resolves_default_endpoint() {
    let toml_content = r#"
[connection_strings]
ApiManagement = "uri=https://contoso.example.net;version=2015-09-15;identifier=a;key=b"
"#;
    let path = write_config(toml_content, "toml");
    let config = config::load_from_file(Some(path.clone())).expect("Failed to load TOML config");
    let cache = EndpointCache::new();

    let endpoint = cache.resolve_default(&config).unwrap().expect("endpoint should resolve");
    assert_eq!(endpoint.to_string(), "contoso.example.net");
    assert_eq!(endpoint.version(), "2015-09-15");
    assert!(endpoint.has_credentials());

    let client = ApiManagementClient::connect(&cache, &config, DEFAULT_CONNECTION_NAME)
        .expect("client should build");
    assert!(Arc::ptr_eq(client.endpoint(), &endpoint));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_chained_sources_prefer_earlier_entries() {
    let path = write_config(
        r#"{ "connection_strings": { "ApiManagement": "serviceName=from-file" } }"#,
        "json",
    );
    let file_config = config::load_from_file(Some(path.clone())).expect("Failed to load config");

    let source = ChainedConfigSource::new()
        .with(MapConfigSource::new().with(DEFAULT_CONNECTION_NAME, "serviceName=override"))
        .with(file_config);

    assert_eq!(
        source.connection_string(DEFAULT_CONNECTION_NAME).as_deref(),
        Some("serviceName=override")
    );

    let cache = EndpointCache::new();
    let endpoint = cache.resolve_default(&source).unwrap().expect("endpoint should resolve");
    assert_eq!(endpoint.to_string(), "override.management.azure-api.net");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_toml_is_config_error() {
    let path = write_config("[connection_strings\nbroken", "toml");

    let err = config::load_from_file(Some(path.clone())).unwrap_err();
    assert!(err.to_string().contains("Invalid TOML format"));

    std::fs::remove_file(path).ok();
}
