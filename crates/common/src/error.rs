//! Common error types and handling for Garage
//!
//! Every failed operation is reported through the same JSON envelope:
//! `{error: true, message, fields, payload, ...extra}`. The HTTP status is
//! advisory (400 unless a handler overrides it); callers inspect the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

/// Common result type
pub type Result<T> = std::result::Result<T, Failure>;

/// Tag for a failed operation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Validation,
    Conflict,
    Storage,
    Internal,
}

/// One failed operation outcome
///
/// Carries the tag, the user-facing message, the field names the field-diff
/// computed, an echo of the offending payload, and any extra properties a
/// handler wants merged into the envelope.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub fields: Vec<String>,
    pub payload: Value,
    pub extra: Map<String, Value>,
    pub status: StatusCode,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: Vec::new(),
            payload: Value::String(String::new()),
            extra: Map::new(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Conflict, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Storage, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Internal, message)
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Render the envelope body
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::Bool(true));
        body.insert("message".to_string(), Value::String(self.message.clone()));
        body.insert(
            "fields".to_string(),
            Value::Array(self.fields.iter().cloned().map(Value::String).collect()),
        );
        body.insert("payload".to_string(), self.payload.clone());
        for (key, value) in &self.extra {
            body.insert(key.clone(), value.clone());
        }
        Value::Object(body)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        // Log storage and internal failures with full context
        if matches!(self.kind, FailureKind::Storage | FailureKind::Internal) {
            tracing::error!(error = %self.message, "request failed");
        }

        (self.status, Json(self.body())).into_response()
    }
}
