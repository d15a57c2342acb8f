//! Configuration loading tests

use clap::Parser;
use pretty_assertions::assert_eq;
use scar_logs::app::cli::Cli;
use scar_logs::app::cloudwatch_logs::RetentionDays;
use scar_logs::app::config::ScarLogsConfig;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
region = "eu-west-1"
profile = "scar"
endpoint_url = "http://localhost:4566"
log_retention_days = 7

[tags]
createdby = "scar"
owner = "alice"
"#,
    );

    let config = ScarLogsConfig::load_from_path(file.path()).unwrap();

    assert_eq!(config.region, "eu-west-1");
    assert_eq!(config.profile.as_deref(), Some("scar"));
    assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    assert_eq!(config.log_retention_days, RetentionDays::try_from(7).unwrap());
    assert_eq!(config.tags.len(), 2);
    assert_eq!(config.tags["owner"], "alice");
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScarLogsConfig::load_from_path(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, ScarLogsConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_config("region = [unterminated");

    let error = ScarLogsConfig::load_from_path(file.path()).unwrap_err();

    assert!(error.to_string().starts_with("configuration error:"));
}

#[test]
fn test_invalid_retention_in_file_is_an_error() {
    let file = write_config("log_retention_days = 45\n");

    assert!(ScarLogsConfig::load_from_path(file.path()).is_err());
}

#[test]
fn test_command_line_overrides_file() {
    let file = write_config("region = \"eu-west-1\"\nprofile = \"from-file\"\n");
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from([
        "scar-logs",
        "--config",
        path.as_str(),
        "--region",
        "us-west-2",
        "--endpoint-url",
        "http://localhost:4566",
        "delete",
        "/aws/lambda/fn",
    ])
    .unwrap();
    let config = cli.resolve_config().unwrap();

    assert_eq!(config.region, "us-west-2");
    assert_eq!(config.profile.as_deref(), Some("from-file"));
    assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
}

#[tokio::test]
async fn test_sdk_config_uses_configured_region() {
    let config = ScarLogsConfig {
        region: "ap-southeast-2".to_string(),
        ..ScarLogsConfig::default()
    };

    let sdk_config = config.sdk_config().await;

    assert_eq!(
        sdk_config.region().map(|r| r.as_ref().to_string()),
        Some("ap-southeast-2".to_string())
    );
}
