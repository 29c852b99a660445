//! Error normalizer.
//!
//! # Design
//! Every failure, local or remote, leaves the core as exactly one
//! `ClayfulError`. Callers construct a `Failure` describing what went wrong
//! and `normalize` maps it onto the fixed taxonomy in `ErrorKind`; there is
//! no other public constructor for a remote-origin error.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::http::{HttpResponse, TransportFailure, TransportFailureKind};

pub type Result<T> = std::result::Result<T, ClayfulError>;

/// Status reported for failures that never produced an HTTP response.
pub const NO_STATUS: u16 = 0;

/// The fixed error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Detected locally before any request was sent.
    ValidationFailed,
    /// The transport could not complete the round-trip.
    TransportError,
    /// The server answered non-2xx with a structured error body.
    ApiError,
    /// Anything else.
    UnknownError,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::TransportError => "transport_error",
            ErrorKind::ApiError => "api_error",
            ErrorKind::UnknownError => "unknown_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The single error shape surfaced to callers.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{model}.{method} failed ({code}, status {status}): {message}")]
pub struct ClayfulError {
    /// Server-provided code when one was sent, else `kind`'s code.
    pub code: String,
    pub kind: ErrorKind,
    pub message: String,
    pub model: String,
    pub method: String,
    /// HTTP status, or `NO_STATUS` when no response was received.
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub validation: Option<Map<String, Value>>,
    is_clayful: bool,
}

impl ClayfulError {
    fn new(kind: ErrorKind, context: &ErrorContext, message: impl Into<String>) -> Self {
        Self {
            code: kind.code().to_string(),
            kind,
            message: message.into(),
            model: context.model.to_string(),
            method: context.method.to_string(),
            status: NO_STATUS,
            headers: Vec::new(),
            validation: None,
            is_clayful: true,
        }
    }

    /// Always `true`. Marks the value as produced by this library.
    pub fn is_clayful(&self) -> bool {
        self.is_clayful
    }

    pub fn validation_field(&self, field: &str) -> Option<&str> {
        self.validation.as_ref()?.get(field)?.as_str()
    }
}

/// Which operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorContext {
    pub model: &'static str,
    pub method: &'static str,
}

impl ErrorContext {
    pub fn new(model: &'static str, method: &'static str) -> Self {
        Self { model, method }
    }
}

/// Raw failure, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A required argument or payload field was missing.
    Validation {
        message: String,
        validation: Map<String, Value>,
    },
    /// A non-2xx response.
    Http(HttpResponse),
    /// No response at all, including cancellation.
    Transport(TransportFailure),
    /// A 2xx response whose body did not have the expected shape.
    Decode { response: HttpResponse, message: String },
    /// The request could not be built.
    Encode(String),
}

impl Failure {
    /// `{field: "required"}` for each missing field.
    pub fn missing<I, S>(fields: I) -> Failure
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::fields(fields, "required", "missing required field(s)")
    }

    /// `{field: "invalid"}` for each field whose value cannot be sent.
    pub fn invalid<I, S>(fields: I) -> Failure
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::fields(fields, "invalid", "invalid field(s)")
    }

    fn fields<I, S>(fields: I, reason: &str, summary: &str) -> Failure
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let validation: Map<String, Value> = fields
            .into_iter()
            .map(|field| (field.into(), Value::String(reason.to_string())))
            .collect();
        let names: Vec<&str> = validation.keys().map(String::as_str).collect();
        let message = format!("{summary}: {}", names.join(", "));
        Failure::Validation { message, validation }
    }
}

pub fn normalize(failure: Failure, context: ErrorContext) -> ClayfulError {
    match failure {
        Failure::Validation { message, validation } => {
            let mut error = ClayfulError::new(ErrorKind::ValidationFailed, &context, message);
            error.validation = Some(validation);
            error
        }
        Failure::Transport(transport) => {
            let message = match transport.kind {
                TransportFailureKind::Timeout => format!("request timed out: {}", transport.message),
                TransportFailureKind::Connect => format!("connection failed: {}", transport.message),
                TransportFailureKind::Cancelled => format!("request cancelled: {}", transport.message),
                TransportFailureKind::Other => transport.message,
            };
            ClayfulError::new(ErrorKind::TransportError, &context, message)
        }
        Failure::Http(response) => from_response(response, &context),
        Failure::Decode { response, message } => {
            let mut error = ClayfulError::new(
                ErrorKind::UnknownError,
                &context,
                format!("unexpected response body: {message}"),
            );
            error.status = response.status;
            error.headers = response.headers;
            error
        }
        Failure::Encode(message) => ClayfulError::new(ErrorKind::UnknownError, &context, message),
    }
}

fn from_response(response: HttpResponse, context: &ErrorContext) -> ClayfulError {
    let HttpResponse { status, headers, body } = response;
    let parsed = serde_json::from_str::<Value>(&body).ok();

    // Any JSON object is a structured error; `code` falls back to `api_error`.
    let mut error = match parsed.as_ref().and_then(Value::as_object) {
        Some(object) => {
            let message = object
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("request failed with status {status}"));
            let mut error = ClayfulError::new(ErrorKind::ApiError, context, message);
            if let Some(code) = object
                .get("code")
                .or_else(|| object.get("errorCode"))
                .and_then(Value::as_str)
                .filter(|code| !code.is_empty())
            {
                error.code = code.to_string();
            }
            error.validation = object
                .get("validation")
                .and_then(Value::as_object)
                .filter(|v| !v.is_empty())
                .cloned();
            error
        }
        None => {
            let trimmed = body.trim();
            let message = if trimmed.is_empty() {
                format!("unexpected status {status}")
            } else {
                format!("unexpected status {status}: {trimmed}")
            };
            ClayfulError::new(ErrorKind::UnknownError, context, message)
        }
    };
    error.status = status;
    error.headers = headers;
    error
}
