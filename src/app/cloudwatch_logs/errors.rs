//! CloudWatch Logs error types and categorization.
//!
//! Service errors keep the code and message reported by CloudWatch Logs so
//! callers can match on them. Failures that never reached the service
//! (dispatch, timeouts, credential resolution) keep the SDK error as source.
//!
//! [`ErrorCategory`] is only used for log output; it never changes the error
//! that is handed back to the caller.

use aws_sdk_cloudwatchlogs::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Returned by CreateLogGroup when the group is already there
pub const RESOURCE_ALREADY_EXISTS: &str = "ResourceAlreadyExistsException";
/// Returned by DeleteLogGroup (and others) when the group does not exist
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum LogsError {
    #[error("{operation} failed with {code}: {message}")]
    Service {
        operation: &'static str,
        code: String,
        message: String,
    },
    #[error("{operation} failed: {source}")]
    Sdk {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("invalid log retention of {0} days")]
    InvalidRetention(i32),
    #[error("configuration error: {0}")]
    Config(String),
}

impl LogsError {
    /// Convert an SDK failure, keeping service error codes intact
    pub fn from_sdk<E, R>(operation: &'static str, error: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        if let Some(service_error) = error.as_service_error() {
            return LogsError::Service {
                operation,
                code: service_error.code().unwrap_or("Unknown").to_string(),
                message: service_error.message().unwrap_or_default().to_string(),
            };
        }

        LogsError::Sdk {
            operation,
            source: Box::new(error),
        }
    }

    /// Service error code, if the service answered
    pub fn code(&self) -> Option<&str> {
        match self {
            LogsError::Service { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    pub fn is_service_code(&self, expected: &str) -> bool {
        self.code() == Some(expected)
    }

    /// Name of the CloudWatch Logs operation that failed
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            LogsError::Service { operation, .. } | LogsError::Sdk { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LogsError::Service { code, .. } => categorize_code(code),
            LogsError::Sdk { source, .. } => categorize_transport(&format!("{:?}", source)),
            LogsError::InvalidRetention(_) | LogsError::Config(_) => ErrorCategory::NonRetryable {
                code: "InvalidInput".to_string(),
                is_permission_error: false,
            },
        }
    }
}

/// Categorized error kinds for log output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Request was throttled due to rate limiting
    Throttled { code: String },
    /// Request timed out before a response arrived
    Timeout,
    /// Network connectivity issues
    NetworkError,
    /// CloudWatch Logs temporarily unavailable
    ServiceUnavailable { code: String },
    /// Non-retryable error (permissions, validation, missing resources)
    NonRetryable {
        code: String,
        is_permission_error: bool,
    },
}

impl ErrorCategory {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ErrorCategory::NonRetryable { .. })
    }

    /// Short label for compact display
    pub fn short_label(&self) -> &'static str {
        match self {
            ErrorCategory::Throttled { .. } => "throttled",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::NetworkError => "network",
            ErrorCategory::ServiceUnavailable { .. } => "unavailable",
            ErrorCategory::NonRetryable {
                is_permission_error: true,
                ..
            } => "permission",
            ErrorCategory::NonRetryable { .. } => "error",
        }
    }
}

fn categorize_code(code: &str) -> ErrorCategory {
    match code {
        "ThrottlingException" | "LimitExceededException" | "TooManyRequestsException" => {
            ErrorCategory::Throttled {
                code: code.to_string(),
            }
        }
        "ServiceUnavailableException" | "InternalFailure" | "InternalServerError" => {
            ErrorCategory::ServiceUnavailable {
                code: code.to_string(),
            }
        }
        _ => ErrorCategory::NonRetryable {
            code: code.to_string(),
            is_permission_error: matches!(
                code,
                "AccessDeniedException"
                    | "UnrecognizedClientException"
                    | "ExpiredTokenException"
                    | "InvalidClientTokenId"
                    | "IncompleteSignature"
            ),
        },
    }
}

/// Categorize a failure that never produced a service response
fn categorize_transport(detail: &str) -> ErrorCategory {
    let lowered = detail.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("timed out") {
        return ErrorCategory::Timeout;
    }

    if lowered.contains("dispatch")
        || lowered.contains("connection")
        || lowered.contains("dns")
        || lowered.contains("socket")
    {
        return ErrorCategory::NetworkError;
    }

    let is_permission_error = lowered.contains("credentials");
    ErrorCategory::NonRetryable {
        code: if is_permission_error {
            "CredentialsError".to_string()
        } else {
            "SdkError".to_string()
        },
        is_permission_error,
    }
}
