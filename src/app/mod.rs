//! Core modules of the SCAR CloudWatch Logs adapter.
//!
//! - [`cloudwatch_logs`] - CloudWatch Logs client, SDK seam and function log group helpers
//! - [`config`] - configuration file and AWS SDK configuration
//! - [`cli`] - command line parsing and command execution

pub mod cli;
pub mod cloudwatch_logs;
pub mod config;
