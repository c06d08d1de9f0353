//! HTTP error envelope and the mapping from contact failures to it.
//!
//! This is the only place that decides status codes. Server errors are
//! logged here and redacted according to the request's
//! [`ErrorDisclosure`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{ContactError, FieldErrors, TRACE_ID_HEADER, TraceId};
use crate::middleware::ErrorDisclosure;

/// Message sent in place of internal detail when redacting.
pub const REDACTED_MESSAGE: &str = "Something went wrong on our end";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The addressed resource does not exist.
    NotFound,
    /// The request conflicts with stored state.
    Conflict,
    /// A dependency is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected failure inside the server.
    InternalError,
}

impl ErrorCode {
    /// Status code for this category.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body.
///
/// `errors` is present only for validation failures; `stack` only on
/// internal errors when disclosure is verbose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Validation failed")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    errors: Option<FieldErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, rename = "stack", skip_serializing_if = "Option::is_none")]
    debug: Option<String>,
}

impl Error {
    /// Create an error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
            debug: None,
        }
    }

    /// [`ErrorCode::InvalidRequest`] error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::NotFound`] error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::Conflict`] error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// [`ErrorCode::ServiceUnavailable`] error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// [`ErrorCode::InternalError`] error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach per-field validation messages.
    #[must_use]
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Attach diagnostic detail.
    #[must_use]
    pub fn with_debug(mut self, debug: impl Into<String>) -> Self {
        self.debug = Some(debug.into());
        self
    }

    /// Override the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Error category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Per-field validation messages.
    pub fn errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    /// Trace identifier captured at construction.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Diagnostic detail.
    pub fn debug(&self) -> Option<&str> {
        self.debug.as_deref()
    }

    /// Body to send under `disclosure`.
    fn disclosed(&self, disclosure: ErrorDisclosure) -> Self {
        let mut body = self.clone();
        match (self.code, disclosure) {
            (ErrorCode::InternalError, ErrorDisclosure::Redacted) => {
                body.message = REDACTED_MESSAGE.to_owned();
                body.debug = None;
            }
            (ErrorCode::InternalError, ErrorDisclosure::Verbose) => {}
            _ => body.debug = None,
        }
        body
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<ContactError> for Error {
    fn from(err: ContactError) -> Self {
        let message = err.to_string();
        match err {
            ContactError::Validation(errors) => Self::invalid_request(message).with_errors(errors),
            ContactError::InvalidData | ContactError::InvalidId => Self::invalid_request(message),
            ContactError::DuplicateEmail => Self::conflict(message),
            ContactError::NotFound => Self::not_found(message),
            ContactError::Unavailable { detail } => {
                Self::service_unavailable(message).with_debug(detail)
            }
            ContactError::Unexpected { detail } => Self::internal(message).with_debug(detail),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            let detail = self.debug().unwrap_or_default();
            if status == StatusCode::SERVICE_UNAVAILABLE {
                warn!(trace_id = self.trace_id(), detail, "{}", self.message);
            } else {
                error!(trace_id = self.trace_id(), detail, "{}", self.message);
            }
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self.disclosed(ErrorDisclosure::current()))
    }
}
