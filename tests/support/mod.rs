//! Shared test doubles for the integration tests.
//!
//! - [`FakeLogs`] emulates the CloudWatch Logs calls in memory
//! - [`run_capturing_warnings`] runs a future with a subscriber that records WARN events

#![allow(dead_code)]

use async_trait::async_trait;
use scar_logs::app::cloudwatch_logs::{
    FilterRequest, LogEvent, LogEventsPage, LogsApi, LogsError, Tags, RESOURCE_ALREADY_EXISTS,
    RESOURCE_NOT_FOUND,
};
use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// State of one emulated log group
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FakeGroup {
    pub tags: Tags,
    pub retention_in_days: Option<i32>,
}

/// Every call received by [`FakeLogs`], in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Filter(FilterRequest),
    Create(String, Tags),
    PutRetention(String, i32),
    Delete(String),
}

/// In-memory CloudWatch Logs
#[derive(Default)]
pub struct FakeLogs {
    groups: Mutex<BTreeMap<String, FakeGroup>>,
    pages: Mutex<VecDeque<LogEventsPage>>,
    failures: Mutex<VecDeque<(&'static str, LogsError)>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeLogs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_group(self: Arc<Self>, name: &str) -> Arc<Self> {
        self.groups
            .lock()
            .unwrap()
            .insert(name.to_string(), FakeGroup::default());
        self
    }

    /// Queue a FilterLogEvents response
    pub fn push_page(&self, messages: &[&str], next_token: Option<&str>) {
        let events = messages
            .iter()
            .enumerate()
            .map(|(i, message)| LogEvent::new(1_700_000_000_000 + i as i64, *message, "stream-1"))
            .collect();
        self.pages
            .lock()
            .unwrap()
            .push_back(LogEventsPage::new(events, next_token.map(str::to_string)));
    }

    /// Make the next call to `operation` fail with a service error
    pub fn fail_next(&self, operation: &'static str, code: &str, message: &str) {
        self.failures.lock().unwrap().push_back((
            operation,
            LogsError::Service {
                operation,
                code: code.to_string(),
                message: message.to_string(),
            },
        ));
    }

    pub fn group(&self, name: &str) -> Option<FakeGroup> {
        self.groups.lock().unwrap().get(name).cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_failure(&self, operation: &str) -> Option<LogsError> {
        let mut failures = self.failures.lock().unwrap();
        let position = failures.iter().position(|(op, _)| *op == operation)?;
        failures.remove(position).map(|(_, error)| error)
    }

    fn service_error(operation: &'static str, code: &str, message: String) -> LogsError {
        LogsError::Service {
            operation,
            code: code.to_string(),
            message,
        }
    }
}

#[async_trait]
impl LogsApi for FakeLogs {
    async fn filter_log_events(&self, request: &FilterRequest) -> Result<LogEventsPage, LogsError> {
        self.record(Call::Filter(request.clone()));
        if let Some(error) = self.take_failure("FilterLogEvents") {
            return Err(error);
        }
        if !self.groups.lock().unwrap().contains_key(&request.log_group_name) {
            return Err(Self::service_error(
                "FilterLogEvents",
                RESOURCE_NOT_FOUND,
                "The specified log group does not exist.".to_string(),
            ));
        }
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn create_log_group(&self, log_group_name: &str, tags: &Tags) -> Result<(), LogsError> {
        self.record(Call::Create(log_group_name.to_string(), tags.clone()));
        if let Some(error) = self.take_failure("CreateLogGroup") {
            return Err(error);
        }
        let mut groups = self.groups.lock().unwrap();
        if groups.contains_key(log_group_name) {
            return Err(Self::service_error(
                "CreateLogGroup",
                RESOURCE_ALREADY_EXISTS,
                "The specified log group already exists".to_string(),
            ));
        }
        groups.insert(
            log_group_name.to_string(),
            FakeGroup {
                tags: tags.clone(),
                retention_in_days: None,
            },
        );
        Ok(())
    }

    async fn put_retention_policy(
        &self,
        log_group_name: &str,
        retention_in_days: i32,
    ) -> Result<(), LogsError> {
        self.record(Call::PutRetention(
            log_group_name.to_string(),
            retention_in_days,
        ));
        if let Some(error) = self.take_failure("PutRetentionPolicy") {
            return Err(error);
        }
        match self.groups.lock().unwrap().get_mut(log_group_name) {
            Some(group) => {
                group.retention_in_days = Some(retention_in_days);
                Ok(())
            }
            None => Err(Self::service_error(
                "PutRetentionPolicy",
                RESOURCE_NOT_FOUND,
                "The specified log group does not exist.".to_string(),
            )),
        }
    }

    async fn delete_log_group(&self, log_group_name: &str) -> Result<(), LogsError> {
        self.record(Call::Delete(log_group_name.to_string()));
        if let Some(error) = self.take_failure("DeleteLogGroup") {
            return Err(error);
        }
        match self.groups.lock().unwrap().remove(log_group_name) {
            Some(_) => Ok(()),
            None => Err(Self::service_error(
                "DeleteLogGroup",
                RESOURCE_NOT_FOUND,
                "The specified log group does not exist.".to_string(),
            )),
        }
    }
}

/// Tracing layer that keeps the message of every WARN event
#[derive(Clone, Default)]
pub struct WarningCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl WarningCapture {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for WarningCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            self.messages.lock().unwrap().push(visitor.0);
        }
    }
}

/// Drive `future` to completion and return its output with the captured warnings
pub fn run_capturing_warnings<F: Future>(future: F) -> (F::Output, Vec<String>) {
    let capture = WarningCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let output = tracing::subscriber::with_default(subscriber, || runtime.block_on(future));
    (output, capture.messages())
}
