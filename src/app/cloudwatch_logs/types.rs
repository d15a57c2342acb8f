//! CloudWatch Logs Data Types
//!
//! Requests, pages and outcomes exchanged between the client and the SDK seam.

#![warn(clippy::all, rust_2018_idioms)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::errors::LogsError;

/// Tag mapping attached to a log group on creation
pub type Tags = BTreeMap<String, String>;

/// Parameters of a single FilterLogEvents call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    /// Log group to read from
    pub log_group_name: String,
    /// Restrict the listing to this stream (None = all streams)
    pub log_stream_name: Option<String>,
    /// Continuation token returned by the previous page
    pub next_token: Option<String>,
}

impl FilterRequest {
    pub fn new(log_group_name: impl Into<String>) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            log_stream_name: None,
            next_token: None,
        }
    }

    pub fn with_log_stream_name(mut self, log_stream_name: impl Into<String>) -> Self {
        self.log_stream_name = Some(log_stream_name.into());
        self
    }

    pub fn with_next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }
}

/// A single log event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Event timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Log message content
    pub message: String,
    /// Time when the event was ingested (Unix milliseconds)
    pub ingestion_time: i64,
    /// Name of the log stream this event belongs to
    pub log_stream_name: String,
    /// Service-assigned event identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl LogEvent {
    /// Create a new log event whose ingestion time equals its timestamp
    pub fn new(
        timestamp: i64,
        message: impl Into<String>,
        log_stream_name: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            message: message.into(),
            ingestion_time: timestamp,
            log_stream_name: log_stream_name.into(),
            event_id: None,
        }
    }
}

/// A log stream visited while serving a FilterLogEvents call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchedLogStream {
    pub log_stream_name: String,
    pub searched_completely: bool,
}

/// One FilterLogEvents response, kept as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEventsPage {
    pub events: Vec<LogEvent>,
    #[serde(default)]
    pub searched_log_streams: Vec<SearchedLogStream>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl LogEventsPage {
    pub fn new(events: Vec<LogEvent>, next_token: Option<String>) -> Self {
        Self {
            events,
            searched_log_streams: Vec::new(),
            next_token,
        }
    }

    /// Token for the next page. Empty tokens end the listing.
    pub fn continuation_token(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Result of an idempotent log group creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupCreation {
    Created,
    AlreadyExisted,
}

/// Result of a log group deletion that tolerates missing groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDeletion {
    Deleted,
    NotFound,
}

/// Retention period accepted by PutRetentionPolicy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct RetentionDays(i32);

impl RetentionDays {
    /// Every value CloudWatch Logs accepts for `retentionInDays`
    pub const ALLOWED: [i32; 22] = [
        1, 3, 5, 7, 14, 30, 60, 90, 120, 150, 180, 365, 400, 545, 731, 1096, 1827, 2192, 2557,
        2922, 3288, 3653,
    ];

    pub const fn days(self) -> i32 {
        self.0
    }
}

impl Default for RetentionDays {
    fn default() -> Self {
        Self(30)
    }
}

impl TryFrom<i32> for RetentionDays {
    type Error = LogsError;

    fn try_from(days: i32) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&days) {
            Ok(Self(days))
        } else {
            Err(LogsError::InvalidRetention(days))
        }
    }
}

impl From<RetentionDays> for i32 {
    fn from(retention: RetentionDays) -> Self {
        retention.0
    }
}

impl fmt::Display for RetentionDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.0)
    }
}
