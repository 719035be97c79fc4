/// Error types for the Purrr.love SDK.
///
/// Every failed call is reported as a [`PurrrError`]. HTTP failures are mapped
/// onto a closed taxonomy keyed by status code (see [`ErrorKind::classify`]);
/// transport failures always become [`PurrrError::Network`] so that no
/// `reqwest` error type leaks to callers.
use serde_json::{Map, Value};
use thiserror::Error;

/// Structured detail map attached to an error record.
pub type Details = Map<String, Value>;

/// Retry hint used when a 429 response carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Message used when a failed response has no decodable `error.message`.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// The tag of an error record, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Permission,
    NotFound,
    Timeout,
    Conflict,
    RateLimit,
    Maintenance,
    Server,
    Network,
    Api,
    InvalidResponse,
    Configuration,
}

impl ErrorKind {
    /// Map an HTTP status code to its error kind.
    ///
    /// Total over `u16`: unlisted 5xx codes are `Server`, everything else that
    /// has no dedicated kind is `Api`. Never returns `Network`,
    /// `InvalidResponse` or `Configuration`; those only arise locally.
    pub fn classify(status: u16) -> Self {
        match status {
            400 => ErrorKind::Validation,
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Permission,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::Timeout,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimit,
            503 => ErrorKind::Maintenance,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Api,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Permission => "permission",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Conflict => "conflict",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Maintenance => "maintenance",
            ErrorKind::Server => "server",
            ErrorKind::Network => "network",
            ErrorKind::Api => "api",
            ErrorKind::InvalidResponse => "invalid_response",
            ErrorKind::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`ErrorKind::classify`].
pub fn classify(status: u16) -> ErrorKind {
    ErrorKind::classify(status)
}

/// The primary error type for the Purrr.love SDK.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PurrrError {
    #[error("[400] {message}")]
    Validation {
        message: String,
        field: Option<String>,
        details: Details,
    },

    #[error("[401] {message}")]
    Authentication { message: String, details: Details },

    #[error("[403] {message}")]
    Permission {
        message: String,
        action: Option<String>,
        resource: Option<String>,
        details: Details,
    },

    #[error("[404] {message}")]
    NotFound {
        message: String,
        resource_type: Option<String>,
        resource_id: Option<String>,
        details: Details,
    },

    #[error("[408] {message}")]
    Timeout {
        message: String,
        timeout_seconds: Option<u64>,
        details: Details,
    },

    #[error("[409] {message}")]
    Conflict {
        message: String,
        conflict_type: Option<String>,
        details: Details,
    },

    #[error("[429] {message}")]
    RateLimit {
        message: String,
        retry_after: u64,
        details: Details,
    },

    #[error("[503] {message}")]
    Maintenance {
        message: String,
        estimated_duration: Option<String>,
        details: Details,
    },

    #[error("[{status}] {message}")]
    Server {
        status: u16,
        message: String,
        details: Details,
    },

    // Transport level, never carries a status
    #[error("{message}")]
    Network { message: String },

    #[error("[{status}] {message}")]
    Api {
        status: u16,
        message: String,
        details: Details,
    },

    // Local-only kinds
    #[error("{message}")]
    InvalidResponse {
        status: Option<u16>,
        message: String,
        body: String,
    },

    #[error("{message}")]
    Configuration {
        message: String,
        key: Option<String>,
    },
}

impl PurrrError {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Build the taxonomy variant for an HTTP status code.
    ///
    /// An empty message is replaced by `HTTP <status> error`. Kind-specific
    /// fields are left unset, except the retry hint of a 429 which falls back
    /// to [`DEFAULT_RETRY_AFTER_SECS`].
    pub fn from_status(status: u16, message: impl Into<String>, details: Details) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = format!("HTTP {status} error");
        }
        match ErrorKind::classify(status) {
            ErrorKind::Validation => PurrrError::Validation {
                message,
                field: None,
                details,
            },
            ErrorKind::Authentication => PurrrError::Authentication { message, details },
            ErrorKind::Permission => PurrrError::Permission {
                message,
                action: None,
                resource: None,
                details,
            },
            ErrorKind::NotFound => PurrrError::NotFound {
                message,
                resource_type: None,
                resource_id: None,
                details,
            },
            ErrorKind::Timeout => PurrrError::Timeout {
                message,
                timeout_seconds: None,
                details,
            },
            ErrorKind::Conflict => PurrrError::Conflict {
                message,
                conflict_type: None,
                details,
            },
            ErrorKind::RateLimit => PurrrError::RateLimit {
                message,
                retry_after: DEFAULT_RETRY_AFTER_SECS,
                details,
            },
            ErrorKind::Maintenance => PurrrError::Maintenance {
                message,
                estimated_duration: None,
                details,
            },
            ErrorKind::Server => PurrrError::Server {
                status,
                message,
                details,
            },
            _ => PurrrError::Api {
                status,
                message,
                details,
            },
        }
    }

    /// A validation failure, optionally scoped to a single field.
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        let message = message.into();
        let message = match field {
            Some(field) => format!("Validation failed for field '{field}': {message}"),
            None => message,
        };
        PurrrError::Validation {
            message,
            field: field.map(String::from),
            details: Details::new(),
        }
    }

    pub fn authentication() -> Self {
        PurrrError::Authentication {
            message: "Invalid API key or authentication failed".into(),
            details: Details::new(),
        }
    }

    pub fn permission_denied(action: &str, resource: &str) -> Self {
        PurrrError::Permission {
            message: format!("Permission denied: cannot {action} on {resource}"),
            action: Some(action.to_string()),
            resource: Some(resource.to_string()),
            details: Details::new(),
        }
    }

    pub fn not_found(resource_type: &str, resource_id: impl ToString) -> Self {
        let resource_id = resource_id.to_string();
        PurrrError::NotFound {
            message: format!("{resource_type} with ID '{resource_id}' not found"),
            resource_type: Some(resource_type.to_string()),
            resource_id: Some(resource_id),
            details: Details::new(),
        }
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        PurrrError::Timeout {
            message: format!("Request timed out after {timeout_seconds} seconds"),
            timeout_seconds: Some(timeout_seconds),
            details: Details::new(),
        }
    }

    pub fn conflict(conflict_type: &str, message: impl Into<String>) -> Self {
        PurrrError::Conflict {
            message: format!("Conflict ({conflict_type}): {}", message.into()),
            conflict_type: Some(conflict_type.to_string()),
            details: Details::new(),
        }
    }

    pub fn rate_limit(retry_after: u64) -> Self {
        PurrrError::RateLimit {
            message: format!("Rate limit exceeded. Retry after {retry_after} seconds"),
            retry_after,
            details: Details::new(),
        }
    }

    pub fn maintenance(estimated_duration: Option<&str>) -> Self {
        let message = match estimated_duration {
            Some(duration) => {
                format!("Service under maintenance. Estimated duration: {duration}")
            }
            None => "Service under maintenance".to_string(),
        };
        PurrrError::Maintenance {
            message,
            estimated_duration: estimated_duration.map(String::from),
            details: Details::new(),
        }
    }

    /// Wrap a transport failure.
    pub fn network(err: impl std::fmt::Display) -> Self {
        PurrrError::Network {
            message: format!("Network error occurred: {err}"),
        }
    }

    pub fn invalid_response(
        status: Option<u16>,
        message: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        PurrrError::InvalidResponse {
            status,
            message: message.into(),
            body: body.into(),
        }
    }

    pub fn configuration(message: impl Into<String>, key: Option<&str>) -> Self {
        let message = message.into();
        let message = match key {
            Some(key) => format!("Configuration error for '{key}': {message}"),
            None => message,
        };
        PurrrError::Configuration {
            message,
            key: key.map(String::from),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn kind(&self) -> ErrorKind {
        match self {
            PurrrError::Validation { .. } => ErrorKind::Validation,
            PurrrError::Authentication { .. } => ErrorKind::Authentication,
            PurrrError::Permission { .. } => ErrorKind::Permission,
            PurrrError::NotFound { .. } => ErrorKind::NotFound,
            PurrrError::Timeout { .. } => ErrorKind::Timeout,
            PurrrError::Conflict { .. } => ErrorKind::Conflict,
            PurrrError::RateLimit { .. } => ErrorKind::RateLimit,
            PurrrError::Maintenance { .. } => ErrorKind::Maintenance,
            PurrrError::Server { .. } => ErrorKind::Server,
            PurrrError::Network { .. } => ErrorKind::Network,
            PurrrError::Api { .. } => ErrorKind::Api,
            PurrrError::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            PurrrError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PurrrError::Validation { message, .. }
            | PurrrError::Authentication { message, .. }
            | PurrrError::Permission { message, .. }
            | PurrrError::NotFound { message, .. }
            | PurrrError::Timeout { message, .. }
            | PurrrError::Conflict { message, .. }
            | PurrrError::RateLimit { message, .. }
            | PurrrError::Maintenance { message, .. }
            | PurrrError::Server { message, .. }
            | PurrrError::Network { message }
            | PurrrError::Api { message, .. }
            | PurrrError::InvalidResponse { message, .. }
            | PurrrError::Configuration { message, .. } => message,
        }
    }

    /// The HTTP status this error mirrors, if any.
    pub fn code(&self) -> Option<u16> {
        match self {
            PurrrError::Validation { .. } => Some(400),
            PurrrError::Authentication { .. } => Some(401),
            PurrrError::Permission { .. } => Some(403),
            PurrrError::NotFound { .. } => Some(404),
            PurrrError::Timeout { .. } => Some(408),
            PurrrError::Conflict { .. } => Some(409),
            PurrrError::RateLimit { .. } => Some(429),
            PurrrError::Maintenance { .. } => Some(503),
            PurrrError::Server { status, .. } | PurrrError::Api { status, .. } => Some(*status),
            PurrrError::Network { .. }
            | PurrrError::InvalidResponse { .. }
            | PurrrError::Configuration { .. } => None,
        }
    }

    pub fn details(&self) -> Option<&Details> {
        match self {
            PurrrError::Validation { details, .. }
            | PurrrError::Authentication { details, .. }
            | PurrrError::Permission { details, .. }
            | PurrrError::NotFound { details, .. }
            | PurrrError::Timeout { details, .. }
            | PurrrError::Conflict { details, .. }
            | PurrrError::RateLimit { details, .. }
            | PurrrError::Maintenance { details, .. }
            | PurrrError::Server { details, .. }
            | PurrrError::Api { details, .. } => Some(details),
            PurrrError::Network { .. }
            | PurrrError::InvalidResponse { .. }
            | PurrrError::Configuration { .. } => None,
        }
    }

    /// Seconds to wait before retrying, for rate-limit errors.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            PurrrError::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// For `Api` errors, the specific kind the status code maps to.
    ///
    /// The executor reports every failed status other than 401 and 429 as
    /// `Api`; this exposes what [`ErrorKind::classify`] says about it.
    pub fn status_kind(&self) -> Option<ErrorKind> {
        match self {
            PurrrError::Api { status, .. } => Some(ErrorKind::classify(*status)),
            _ => None,
        }
    }

    /// Convert an `Api` error into its status-specific variant.
    /// Other variants are returned unchanged.
    pub fn into_specific(self) -> Self {
        match self {
            PurrrError::Api {
                status,
                message,
                details,
            } => PurrrError::from_status(status, message, details),
            other => other,
        }
    }

    /// Returns true if this error suggests the caller may retry later.
    /// The SDK itself never retries.
    /// Attach the response status and a body excerpt to an `InvalidResponse`.
    /// Other variants are returned unchanged.
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        match self {
            PurrrError::InvalidResponse { message, .. } => PurrrError::InvalidResponse {
                status: Some(status),
                message,
                body: body.into(),
            },
            other => other,
        }
    }

    /// A generic `Api` error is judged by the kind of its status, so this
    /// agrees with `into_specific().is_retryable()`.
    pub fn is_retryable(&self) -> bool {
        let kind = self.status_kind().unwrap_or_else(|| self.kind());
        matches!(
            kind,
            ErrorKind::RateLimit
                | ErrorKind::Server
                | ErrorKind::Maintenance
                | ErrorKind::Timeout
                | ErrorKind::Network
        )
    }
}

impl From<reqwest::Error> for PurrrError {
    fn from(err: reqwest::Error) -> Self {
        PurrrError::network(err)
    }
}

impl From<url::ParseError> for PurrrError {
    fn from(err: url::ParseError) -> Self {
        PurrrError::configuration(err.to_string(), Some("base_url"))
    }
}

impl From<serde_json::Error> for PurrrError {
    fn from(err: serde_json::Error) -> Self {
        PurrrError::invalid_response(
            None,
            format!("Invalid response from server: {err}"),
            "",
        )
    }
}
