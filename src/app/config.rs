//! Configuration for the CloudWatch Logs adapter.
//!
//! Settings are read from a TOML file, by default `config.toml` in the
//! platform configuration directory (for example
//! `~/.config/scar/config.toml` on Linux). A missing file means defaults.
//!
//! # config.toml Format
//!
//! ```toml
//! region = "us-east-1"
//! profile = "scar"                        # optional
//! endpoint_url = "http://localhost:4566"  # optional, e.g. LocalStack
//! log_retention_days = 30
//!
//! [tags]
//! createdby = "scar"
//! owner = "alice"
//! ```

#![warn(clippy::all, rust_2018_idioms)]

use aws_config::BehaviorVersion;
use aws_types::region::Region;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::cloudwatch_logs::{LogsError, RetentionDays, Tags};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Adapter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScarLogsConfig {
    /// AWS region of the log groups
    pub region: String,
    /// Named profile from the shared AWS config files
    pub profile: Option<String>,
    /// Endpoint override for CloudWatch Logs compatible services
    pub endpoint_url: Option<String>,
    /// Retention applied to provisioned function log groups
    pub log_retention_days: RetentionDays,
    /// Tags attached to every created log group
    pub tags: Tags,
}

impl Default for ScarLogsConfig {
    fn default() -> Self {
        let mut tags = Tags::new();
        tags.insert("createdby".to_string(), "scar".to_string());

        Self {
            region: DEFAULT_REGION.to_string(),
            profile: None,
            endpoint_url: None,
            log_retention_days: RetentionDays::default(),
            tags,
        }
    }
}

impl ScarLogsConfig {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("es", "grycap", "scar")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self, LogsError> {
        match Self::default_path() {
            Some(path) => Self::load_from_path(path),
            None => {
                debug!("No configuration directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, LogsError> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No configuration found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            LogsError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents)
            .map_err(|e| LogsError::Config(format!("{}: {}", path.display(), e)))?;

        debug!(
            "Loaded configuration from {:?}: region={}, retention={}",
            path, config.region, config.log_retention_days
        );
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Build the AWS SDK configuration for these settings
    pub async fn sdk_config(&self) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()));

        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let config = loader.load().await;
        debug!("Created AWS config for region: {}", self.region);
        config
    }
}
