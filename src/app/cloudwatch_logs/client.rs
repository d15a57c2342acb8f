//! CloudWatch Logs Client Wrapper
//!
//! Forwards the four CloudWatch Logs operations SCAR needs. Listing follows
//! continuation tokens until the service stops returning them. Creating an
//! existing group and deleting a missing one are reported as warnings.

#![warn(clippy::all, rust_2018_idioms)]

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::api::{LogsApi, SdkLogsApi};
use super::errors::{LogsError, RESOURCE_ALREADY_EXISTS, RESOURCE_NOT_FOUND};
use super::types::{FilterRequest, GroupCreation, GroupDeletion, LogEventsPage, Tags};

/// CloudWatch Logs client wrapper
#[derive(Clone)]
pub struct CloudWatchLogsClient {
    api: Arc<dyn LogsApi>,
}

impl fmt::Debug for CloudWatchLogsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudWatchLogsClient").finish_non_exhaustive()
    }
}

impl CloudWatchLogsClient {
    /// Create a client talking to CloudWatch Logs through the AWS SDK
    pub fn new(aws_config: &aws_config::SdkConfig) -> Self {
        Self::with_api(Arc::new(SdkLogsApi::new(aws_config)))
    }

    /// Create a client on top of any [`LogsApi`] implementation
    pub fn with_api(api: Arc<dyn LogsApi>) -> Self {
        Self { api }
    }

    /// List log events from a log group, optionally restricted to one stream.
    ///
    /// Returns every page in the order it was fetched, one per SDK call.
    pub async fn get_log_events(
        &self,
        log_group_name: &str,
        log_stream_name: Option<&str>,
    ) -> Result<Vec<LogEventsPage>, LogsError> {
        let mut request = FilterRequest::new(log_group_name);
        if let Some(stream_name) = log_stream_name.filter(|name| !name.is_empty()) {
            request = request.with_log_stream_name(stream_name);
        }

        let mut pages = Vec::new();
        loop {
            let page = self
                .api
                .filter_log_events(&request)
                .await
                .map_err(report_failure)?;

            let next_token = page.continuation_token().map(str::to_owned);
            pages.push(page);

            match next_token {
                Some(token) => {
                    debug!(
                        "Fetching page {} of log events from {}",
                        pages.len() + 1,
                        log_group_name
                    );
                    request.next_token = Some(token);
                }
                None => break,
            }
        }

        debug!(
            "Collected {} page(s) of log events from {}",
            pages.len(),
            log_group_name
        );
        Ok(pages)
    }

    /// Create a log group with the given tags. An existing group is reused.
    pub async fn create_log_group(
        &self,
        log_group_name: &str,
        tags: &Tags,
    ) -> Result<GroupCreation, LogsError> {
        match self.api.create_log_group(log_group_name, tags).await {
            Ok(()) => {
                info!("Created log group '{}'", log_group_name);
                Ok(GroupCreation::Created)
            }
            Err(e) if e.is_service_code(RESOURCE_ALREADY_EXISTS) => {
                warn!("Using existent log group '{}'", log_group_name);
                Ok(GroupCreation::AlreadyExisted)
            }
            Err(e) => Err(report_failure(e)),
        }
    }

    /// Set the retention of a log group
    pub async fn set_log_retention_policy(
        &self,
        log_group_name: &str,
        log_retention_policy_in_days: i32,
    ) -> Result<(), LogsError> {
        self.api
            .put_retention_policy(log_group_name, log_retention_policy_in_days)
            .await
            .map_err(report_failure)?;

        info!(
            "Set retention of log group '{}' to {} days",
            log_group_name, log_retention_policy_in_days
        );
        Ok(())
    }

    /// Delete a log group and all of its archived events. A missing group is not an error.
    pub async fn delete_log_group(&self, log_group_name: &str) -> Result<GroupDeletion, LogsError> {
        match self.api.delete_log_group(log_group_name).await {
            Ok(()) => {
                info!("Deleted log group '{}'", log_group_name);
                Ok(GroupDeletion::Deleted)
            }
            Err(e) if e.is_service_code(RESOURCE_NOT_FOUND) => {
                warn!(
                    "Cannot delete log group '{}'. Group not found.",
                    log_group_name
                );
                Ok(GroupDeletion::NotFound)
            }
            Err(e) => Err(report_failure(e)),
        }
    }
}

/// Log a failure and hand it back unchanged
fn report_failure(error: LogsError) -> LogsError {
    error!("{}", failure_summary(&error));
    error
}

fn failure_summary(error: &LogsError) -> String {
    let category = error.category();
    format!(
        "CloudWatch Logs {} error ({}, {}): {}",
        error.operation().unwrap_or("request"),
        category.short_label(),
        if category.is_retryable() {
            "retryable"
        } else {
            "not retryable"
        },
        error
    )
}
