//! CloudWatch Logs Integration Module
//!
//! Thin adapter over Amazon CloudWatch Logs used by SCAR functions.
//!
//! ## Features
//!
//! - List log events of a log group (optionally one stream), following every continuation token
//! - Idempotent log group creation with tags
//! - Retention policy updates
//! - Log group deletion that tolerates missing groups
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scar_logs::app::cloudwatch_logs::{CloudWatchLogsClient, Tags};
//!
//! # async fn example(aws_config: aws_config::SdkConfig) -> Result<(), scar_logs::app::cloudwatch_logs::LogsError> {
//! let client = CloudWatchLogsClient::new(&aws_config);
//!
//! client.create_log_group("/aws/lambda/scar-cowsay", &Tags::new()).await?;
//! client.set_log_retention_policy("/aws/lambda/scar-cowsay", 30).await?;
//!
//! for page in client.get_log_events("/aws/lambda/scar-cowsay", None).await? {
//!     for event in page.events {
//!         print!("{}", event.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod api;
pub mod client;
pub mod errors;
pub mod provisioning;
pub mod types;

// Re-export commonly used types
pub use api::{LogsApi, SdkLogsApi};
pub use client::CloudWatchLogsClient;
pub use errors::{ErrorCategory, LogsError, RESOURCE_ALREADY_EXISTS, RESOURCE_NOT_FOUND};
pub use provisioning::{
    fetch_function_logs, function_log_group_name, provision_function_log_group,
    remove_function_log_group, render_log_events,
};
pub use types::{
    FilterRequest, GroupCreation, GroupDeletion, LogEvent, LogEventsPage, RetentionDays,
    SearchedLogStream, Tags,
};
