//! Failures reported by domain services.
//!
//! An [`Error`] carries a category, a message for humans and optional
//! structured details. It knows nothing about HTTP; the inbound adapter picks
//! the status code from [`ErrorCode`].

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::trace_id::TraceId;
use super::validation::FieldViolation;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Failure category, serialised in snake case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed input, failed validation or a dangling reference.
    InvalidRequest,
    /// The action is never allowed on this row.
    Forbidden,
    /// No row has the requested identifier.
    NotFound,
    /// Other rows still depend on the addressed one.
    Conflict,
    /// The store cannot be reached.
    ServiceUnavailable,
    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::ServiceUnavailable => "service unavailable",
            Self::InternalError => "internal error",
        }
    }
}

/// Error returned by every service operation.
///
/// The message is never blank and a present trace identifier is never blank.
/// Errors built inside a [`TraceId::scope`] pick up that identifier.
///
/// # Examples
/// ```
/// use pupil_tracker::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Pupil not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "Pupil not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(try_from = "Envelope", into = "Envelope")]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

/// Reasons a serialised error envelope is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// `message` was blank.
    #[error("error message is blank")]
    BlankMessage,
    /// `trace_id` was present but blank.
    #[error("trace identifier is blank")]
    BlankTraceId,
}

impl Error {
    /// Build an error of `code`; a blank `message` falls back to
    /// [`ErrorCode::summary`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let given = message.into();
        let message = if given.trim().is_empty() {
            code.summary().to_owned()
        } else {
            given
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Like [`Error::new`] but rejecting blank messages.
    ///
    /// # Errors
    /// [`EnvelopeError::BlankMessage`] when `message` is blank.
    pub fn checked(code: ErrorCode, message: impl Into<String>) -> Result<Self, EnvelopeError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(EnvelopeError::BlankMessage);
        }
        Ok(Self::new(code, message))
    }

    /// Failure category.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message for humans.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Identifier of the request that failed.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details, e.g. the offending fields.
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Replace the trace identifier; blank values are ignored.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        let trace_id = trace_id.into();
        if !trace_id.trim().is_empty() {
            self.trace_id = Some(trace_id);
        }
        self
    }

    /// [`ErrorCode::InvalidRequest`] with `message`.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::Forbidden`] with `message`.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// [`ErrorCode::NotFound`] with `message`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::Conflict`] with `message`.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// [`ErrorCode::ServiceUnavailable`] with `message`.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// [`ErrorCode::InternalError`] with `message`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Validation failure listing every offending field.
    ///
    /// # Examples
    /// ```
    /// use pupil_tracker::domain::{Error, ErrorCode, FieldViolation};
    ///
    /// let err = Error::validation(vec![FieldViolation::blank("name")]);
    /// assert_eq!(err.code(), ErrorCode::InvalidRequest);
    /// assert_eq!(err.details().unwrap()["fields"][0]["field"], "name");
    /// ```
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::invalid_request("request validation failed")
            .with_details(json!({ "fields": violations }))
    }

    /// A foreign key that does not resolve to an existing row.
    pub fn unknown_reference(field: impl Into<String>, entity: &str, value: i32) -> Self {
        Self::validation(vec![FieldViolation::new(
            field,
            "unknown_reference",
            format!("{entity} {value} does not exist"),
        )])
    }
}

/// Wire form of [`Error`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for Envelope {
    fn from(error: Error) -> Self {
        let Error {
            code,
            message,
            trace_id,
            details,
        } = error;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<Envelope> for Error {
    type Error = EnvelopeError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        if envelope.message.trim().is_empty() {
            return Err(EnvelopeError::BlankMessage);
        }
        if envelope
            .trace_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            return Err(EnvelopeError::BlankTraceId);
        }
        Ok(Self {
            code: envelope.code,
            message: envelope.message,
            trace_id: envelope.trace_id,
            details: envelope.details,
        })
    }
}

#[cfg(test)]
mod tests;
