//! SCAR CloudWatch Logs adapter
//!
//! SCAR (Serverless Container-aware ARchitectures) runs container images as
//! AWS Lambda functions. Each function writes to a CloudWatch Logs group, and
//! this crate is the piece that creates, configures, reads and removes those
//! groups.
//!
//! # Modules
//!
//! - [`app::cloudwatch_logs`]: the client, its SDK seam, typed pages and errors
//! - [`app::config`]: TOML configuration and AWS SDK configuration loading
//! - [`app::cli`]: the `scar-logs` command line front end
//!
//! # Behaviour
//!
//! All calls are forwarded to the AWS SDK. Two service errors are downgraded
//! to warnings: creating a log group that already exists and deleting one
//! that does not. Event listing follows continuation tokens and returns
//! every page it fetched.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;

pub use app::cloudwatch_logs::{CloudWatchLogsClient, LogsError};
pub use app::config::ScarLogsConfig;
