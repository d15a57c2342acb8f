//! CloudWatch Logs SDK seam
//!
//! [`LogsApi`] holds the four CloudWatch Logs calls the client forwards.
//! [`SdkLogsApi`] backs it with `aws-sdk-cloudwatchlogs`; tests plug in
//! scripted implementations.

#![warn(clippy::all, rust_2018_idioms)]

use async_trait::async_trait;
use aws_sdk_cloudwatchlogs as cloudwatchlogs;
use aws_sdk_cloudwatchlogs::operation::filter_log_events::FilterLogEventsOutput;
use tracing::debug;

use super::errors::LogsError;
use super::types::{FilterRequest, LogEvent, LogEventsPage, SearchedLogStream, Tags};

/// Raw CloudWatch Logs operations used by [`super::CloudWatchLogsClient`]
#[async_trait]
pub trait LogsApi: Send + Sync {
    /// FilterLogEvents: one page per call
    async fn filter_log_events(&self, request: &FilterRequest) -> Result<LogEventsPage, LogsError>;

    /// CreateLogGroup with the given tags
    async fn create_log_group(&self, log_group_name: &str, tags: &Tags) -> Result<(), LogsError>;

    /// PutRetentionPolicy
    async fn put_retention_policy(
        &self,
        log_group_name: &str,
        retention_in_days: i32,
    ) -> Result<(), LogsError>;

    /// DeleteLogGroup
    async fn delete_log_group(&self, log_group_name: &str) -> Result<(), LogsError>;
}

/// [`LogsApi`] backed by the AWS SDK
#[derive(Debug, Clone)]
pub struct SdkLogsApi {
    client: cloudwatchlogs::Client,
}

impl SdkLogsApi {
    pub fn new(aws_config: &aws_config::SdkConfig) -> Self {
        Self::from_client(cloudwatchlogs::Client::new(aws_config))
    }

    pub fn from_client(client: cloudwatchlogs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogsApi for SdkLogsApi {
    async fn filter_log_events(&self, request: &FilterRequest) -> Result<LogEventsPage, LogsError> {
        let mut call = self
            .client
            .filter_log_events()
            .log_group_name(&request.log_group_name);

        if let Some(stream_name) = &request.log_stream_name {
            call = call.log_stream_names(stream_name);
        }

        if let Some(token) = &request.next_token {
            call = call.next_token(token);
        }

        let response = call
            .send()
            .await
            .map_err(|e| LogsError::from_sdk("FilterLogEvents", e))?;

        let page = page_from_output(response);
        debug!(
            "FilterLogEvents on {} returned {} event(s)",
            request.log_group_name,
            page.events.len()
        );
        Ok(page)
    }

    async fn create_log_group(&self, log_group_name: &str, tags: &Tags) -> Result<(), LogsError> {
        let tags = if tags.is_empty() {
            None
        } else {
            Some(tags.clone().into_iter().collect())
        };

        self.client
            .create_log_group()
            .log_group_name(log_group_name)
            .set_tags(tags)
            .send()
            .await
            .map_err(|e| LogsError::from_sdk("CreateLogGroup", e))?;

        Ok(())
    }

    async fn put_retention_policy(
        &self,
        log_group_name: &str,
        retention_in_days: i32,
    ) -> Result<(), LogsError> {
        self.client
            .put_retention_policy()
            .log_group_name(log_group_name)
            .retention_in_days(retention_in_days)
            .send()
            .await
            .map_err(|e| LogsError::from_sdk("PutRetentionPolicy", e))?;

        Ok(())
    }

    async fn delete_log_group(&self, log_group_name: &str) -> Result<(), LogsError> {
        self.client
            .delete_log_group()
            .log_group_name(log_group_name)
            .send()
            .await
            .map_err(|e| LogsError::from_sdk("DeleteLogGroup", e))?;

        Ok(())
    }
}

/// Convert an SDK response into our page type
fn page_from_output(output: FilterLogEventsOutput) -> LogEventsPage {
    let events = output
        .events
        .unwrap_or_default()
        .into_iter()
        .map(|event| LogEvent {
            timestamp: event.timestamp.unwrap_or(0),
            message: event.message.unwrap_or_default(),
            ingestion_time: event.ingestion_time.unwrap_or(0),
            log_stream_name: event.log_stream_name.unwrap_or_default(),
            event_id: event.event_id,
        })
        .collect();

    let searched_log_streams = output
        .searched_log_streams
        .unwrap_or_default()
        .into_iter()
        .map(|stream| SearchedLogStream {
            log_stream_name: stream.log_stream_name.unwrap_or_default(),
            searched_completely: stream.searched_completely.unwrap_or(false),
        })
        .collect();

    LogEventsPage {
        events,
        searched_log_streams,
        next_token: output.next_token,
    }
}
