//! Command line front end for the CloudWatch Logs adapter.

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use super::cloudwatch_logs::{
    fetch_function_logs, provision_function_log_group, remove_function_log_group,
    CloudWatchLogsClient, GroupCreation, GroupDeletion, LogEventsPage, RetentionDays, Tags,
};
use super::config::ScarLogsConfig;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_BRANCH"),
    "@",
    env!("GIT_COMMIT"),
    ")"
);

#[derive(Debug, Parser)]
#[command(
    name = "scar-logs",
    version,
    long_version = LONG_VERSION,
    about = "Manage and read the CloudWatch Logs groups of SCAR functions"
)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "SCAR_LOGS_CONFIG")]
    pub config: Option<PathBuf>,

    /// AWS region, overriding the configuration file
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Named AWS profile, overriding the configuration file
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// CloudWatch Logs endpoint override
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every event of a log group
    Events {
        log_group_name: String,
        /// Only read this log stream
        #[arg(long)]
        stream: Option<String>,
    },
    /// Create a log group (an existing group is reused)
    Create {
        log_group_name: String,
        /// Tag as KEY=VALUE, repeatable
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<(String, String)>,
    },
    /// Set the retention of a log group
    Retention {
        log_group_name: String,
        /// Days to keep events (configuration default when omitted)
        #[arg(value_parser = parse_retention)]
        days: Option<RetentionDays>,
    },
    /// Delete a log group (a missing group is not an error)
    Delete { log_group_name: String },
    /// Create the log group of a function and apply its retention
    Provision {
        function_name: String,
        /// Tag as KEY=VALUE, repeatable
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<(String, String)>,
        #[arg(long, value_parser = parse_retention)]
        retention: Option<RetentionDays>,
    },
    /// Print the log output of a function
    Logs {
        function_name: String,
        #[arg(long)]
        stream: Option<String>,
    },
    /// Delete the log group of a function
    Remove { function_name: String },
}

/// Parse a `KEY=VALUE` tag argument
pub fn parse_tag(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

pub fn parse_retention(raw: &str) -> Result<RetentionDays, String> {
    let days: i32 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number of days", raw))?;
    RetentionDays::try_from(days).map_err(|e| e.to_string())
}

impl Cli {
    /// Resolve the configuration file and apply command line overrides
    pub fn resolve_config(&self) -> Result<ScarLogsConfig> {
        let mut config = match &self.config {
            Some(path) => ScarLogsConfig::load_from_path(path),
            None => ScarLogsConfig::load(),
        }
        .context("Failed to load configuration")?;

        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(profile) = &self.profile {
            config.profile = Some(profile.clone());
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint_url.clone());
        }

        Ok(config)
    }
}

/// Config tags with command line tags layered on top
pub fn merge_tags(base: &Tags, overrides: &[(String, String)]) -> Tags {
    let mut tags = base.clone();
    tags.extend(overrides.iter().cloned());
    tags
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    debug!("Resolved configuration: {:?}", config);

    let aws_config = config.sdk_config().await;
    let client = CloudWatchLogsClient::new(&aws_config);

    execute(&client, &config, cli.command, cli.json).await
}

/// Run one command against an already built client
pub async fn execute(
    client: &CloudWatchLogsClient,
    config: &ScarLogsConfig,
    command: Command,
    json: bool,
) -> Result<()> {
    match command {
        Command::Events {
            log_group_name,
            stream,
        } => {
            let pages = client
                .get_log_events(&log_group_name, stream.as_deref())
                .await
                .with_context(|| format!("Failed to list events of {}", log_group_name))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                print!("{}", format_pages(&pages));
            }
        }
        Command::Create {
            log_group_name,
            tags,
        } => {
            let tags = merge_tags(&config.tags, &tags);
            let creation = client
                .create_log_group(&log_group_name, &tags)
                .await
                .with_context(|| format!("Failed to create log group {}", log_group_name))?;
            report_creation(&log_group_name, creation);
        }
        Command::Retention {
            log_group_name,
            days,
        } => {
            let days = days.unwrap_or(config.log_retention_days);
            client
                .set_log_retention_policy(&log_group_name, days.days())
                .await
                .with_context(|| format!("Failed to set retention of {}", log_group_name))?;
            println!("Retention of '{}' set to {}", log_group_name, days);
        }
        Command::Delete { log_group_name } => {
            let deletion = client
                .delete_log_group(&log_group_name)
                .await
                .with_context(|| format!("Failed to delete log group {}", log_group_name))?;
            report_deletion(&log_group_name, deletion);
        }
        Command::Provision {
            function_name,
            tags,
            retention,
        } => {
            let tags = merge_tags(&config.tags, &tags);
            let retention = retention.unwrap_or(config.log_retention_days);
            let creation = provision_function_log_group(client, &function_name, &tags, retention)
                .await
                .with_context(|| format!("Failed to provision logs of {}", function_name))?;
            report_creation(&function_name, creation);
        }
        Command::Logs {
            function_name,
            stream,
        } => {
            let output = fetch_function_logs(client, &function_name, stream.as_deref())
                .await
                .with_context(|| format!("Failed to read logs of {}", function_name))?;
            print!("{}", output);
        }
        Command::Remove { function_name } => {
            let deletion = remove_function_log_group(client, &function_name)
                .await
                .with_context(|| format!("Failed to remove logs of {}", function_name))?;
            report_deletion(&function_name, deletion);
        }
    }

    Ok(())
}

/// One line per event: timestamp, stream, message
pub fn format_pages(pages: &[LogEventsPage]) -> String {
    let mut output = String::new();
    for event in pages.iter().flat_map(|page| page.events.iter()) {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(event.timestamp)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| event.timestamp.to_string());
        output.push_str(&format!(
            "{} {} {}\n",
            timestamp,
            event.log_stream_name,
            event.message.trim_end()
        ));
    }
    output
}

fn report_creation(name: &str, creation: GroupCreation) {
    match creation {
        GroupCreation::Created => println!("Created log group for '{}'", name),
        GroupCreation::AlreadyExisted => println!("Reusing existing log group for '{}'", name),
    }
}

fn report_deletion(name: &str, deletion: GroupDeletion) {
    match deletion {
        GroupDeletion::Deleted => println!("Deleted log group for '{}'", name),
        GroupDeletion::NotFound => println!("No log group found for '{}'", name),
    }
}
