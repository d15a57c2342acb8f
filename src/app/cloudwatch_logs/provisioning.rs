//! Function log group helpers
//!
//! Every SCAR function logs to the log group Lambda assigns it,
//! `/aws/lambda/<function name>`. These helpers create, tear down and read
//! that group using only the client operations.

#![warn(clippy::all, rust_2018_idioms)]

use tracing::info;

use super::client::CloudWatchLogsClient;
use super::errors::LogsError;
use super::types::{GroupCreation, GroupDeletion, LogEventsPage, RetentionDays, Tags};

/// Prefix Lambda uses for function log groups
pub const LAMBDA_LOG_GROUP_PREFIX: &str = "/aws/lambda/";

/// Log group name of a Lambda function
pub fn function_log_group_name(function_name: &str) -> String {
    format!("{}{}", LAMBDA_LOG_GROUP_PREFIX, function_name)
}

/// Create the function log group (reusing an existing one) and apply its retention
pub async fn provision_function_log_group(
    client: &CloudWatchLogsClient,
    function_name: &str,
    tags: &Tags,
    retention: RetentionDays,
) -> Result<GroupCreation, LogsError> {
    let log_group_name = function_log_group_name(function_name);

    let creation = client.create_log_group(&log_group_name, tags).await?;
    client
        .set_log_retention_policy(&log_group_name, retention.days())
        .await?;

    info!(
        "Log group '{}' ready for function {} ({})",
        log_group_name, function_name, retention
    );
    Ok(creation)
}

/// Delete the function log group, tolerating a missing group
pub async fn remove_function_log_group(
    client: &CloudWatchLogsClient,
    function_name: &str,
) -> Result<GroupDeletion, LogsError> {
    client
        .delete_log_group(&function_log_group_name(function_name))
        .await
}

/// Fetch every log event of a function and render it as plain text
pub async fn fetch_function_logs(
    client: &CloudWatchLogsClient,
    function_name: &str,
    log_stream_name: Option<&str>,
) -> Result<String, LogsError> {
    let pages = client
        .get_log_events(&function_log_group_name(function_name), log_stream_name)
        .await?;
    Ok(render_log_events(&pages))
}

/// Concatenate the messages of all events, page by page, in service order.
///
/// Lambda messages already end with a newline, so nothing is inserted between them.
pub fn render_log_events(pages: &[LogEventsPage]) -> String {
    pages
        .iter()
        .flat_map(|page| page.events.iter())
        .map(|event| event.message.as_str())
        .collect()
}
