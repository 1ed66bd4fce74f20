//! The uniform response envelope and the builder that produces it.
//!
//! Every endpoint answers with
//!
//! ```json
//! { "code": 0, "message": "SUCCESS", "data": [...], "pagination": {...} }
//! ```
//!
//! where `pagination` only appears on successful list results. Handlers state
//! what they are returning through an [`Input`] variant and
//! [`ResponseBuilder::build`] normalizes it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codes::{ErrorCodeTable, SUCCESS, SUCCESS_MESSAGE, UNAUTHORIZED, UNKNOWN_ERROR};
use crate::coerce::{coerce_int, is_numeric};
use crate::pagination::PaginationBlock;

/// Pagination attached to a success payload.
///
/// Usually a computed [`PaginationBlock`], but callers may hand over any
/// mapping or sequence; it is attached as-is without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pagination {
    Block(PaginationBlock),
    Raw(Value),
}

impl From<PaginationBlock> for Pagination {
    fn from(block: PaginationBlock) -> Self {
        Pagination::Block(block)
    }
}

/// What a handler wants to send back.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// An error or status code, optionally with an explicit message.
    Code { code: i64, message: Option<String> },
    /// A success payload, optionally with pagination.
    Payload {
        data: Value,
        pagination: Option<Pagination>,
    },
    /// A bare success message with no payload.
    Message(String),
}

impl Input {
    pub fn code(code: i64) -> Self {
        Input::Code {
            code,
            message: None,
        }
    }

    pub fn code_with_message(code: i64, message: impl Into<String>) -> Self {
        Input::Code {
            code,
            message: Some(message.into()),
        }
    }

    pub fn payload(data: impl Into<Value>) -> Self {
        Input::Payload {
            data: data.into(),
            pagination: None,
        }
    }

    pub fn paginated(data: impl Into<Value>, pagination: impl Into<Pagination>) -> Self {
        Input::Payload {
            data: data.into(),
            pagination: Some(pagination.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Input::Message(message.into())
    }

    /// Classify untyped values by shape, for callers that only have JSON.
    ///
    /// - arrays and objects are a success payload; `secondary` becomes the
    ///   pagination when it is itself an array or object
    /// - strings that do not read as numbers are a success message
    /// - everything else (numbers, numeric strings, booleans, null) is cast to
    ///   an integer code; `secondary` is the message when it is text or a number
    pub fn infer(primary: Value, secondary: Option<Value>) -> Self {
        if primary.is_array() || primary.is_object() {
            let pagination = secondary
                .filter(|v| v.is_array() || v.is_object())
                .map(Pagination::Raw);
            return Input::Payload {
                data: primary,
                pagination,
            };
        }

        match primary {
            Value::String(text) if !is_numeric(&text) => Input::Message(text),
            other => {
                let message = secondary.and_then(|v| match v {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                });
                Input::Code {
                    code: coerce_int(&other),
                    message,
                }
            }
        }
    }
}

/// The wire object handed to the serialization boundary.
///
/// Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    code: i64,
    message: String,
    data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pagination: Option<Pagination>,
}

impl ResponseEnvelope {
    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }

    /// Whether the transport must signal `401 Unauthorized`.
    pub fn requires_auth(&self) -> bool {
        self.code == UNAUTHORIZED
    }
}

fn empty_data() -> Value {
    Value::Array(Vec::new())
}

/// Builds envelopes against an injected [`ErrorCodeTable`].
///
/// Cheap to clone; the table is shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    codes: Arc<ErrorCodeTable>,
}

impl ResponseBuilder {
    pub fn new(codes: Arc<ErrorCodeTable>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &ErrorCodeTable {
        &self.codes
    }

    pub fn build(&self, input: Input) -> ResponseEnvelope {
        let envelope = match input {
            Input::Code { code, message } => self.failure(code, message),
            Input::Payload { data, pagination } => ResponseEnvelope {
                code: SUCCESS,
                message: SUCCESS_MESSAGE.to_string(),
                data,
                pagination,
            },
            Input::Message(message) => ResponseEnvelope {
                code: SUCCESS,
                message,
                data: empty_data(),
                pagination: None,
            },
        };

        tracing::debug!(code = envelope.code, "Built response envelope");
        envelope
    }

    pub fn success(&self, data: impl Into<Value>) -> ResponseEnvelope {
        self.build(Input::payload(data))
    }

    pub fn paginated(
        &self,
        data: impl Into<Value>,
        pagination: impl Into<Pagination>,
    ) -> ResponseEnvelope {
        self.build(Input::paginated(data, pagination))
    }

    pub fn error(&self, code: i64) -> ResponseEnvelope {
        self.build(Input::code(code))
    }

    pub fn error_with(&self, code: i64, message: impl Into<String>) -> ResponseEnvelope {
        self.build(Input::code_with_message(code, message))
    }

    /// Message resolution order: explicit non-blank message, table entry, then
    /// the code itself as text. Code `0` is resolved first and then reported
    /// as [`UNKNOWN_ERROR`], since zero belongs to the success path.
    fn failure(&self, code: i64, message: Option<String>) -> ResponseEnvelope {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => self
                .codes
                .message(code)
                .map_or_else(|| code.to_string(), str::to_string),
        };

        let code = if code == SUCCESS {
            tracing::warn!(%message, "Code 0 passed as an error, reporting as unknown error");
            UNKNOWN_ERROR
        } else {
            code
        };

        ResponseEnvelope {
            code,
            message,
            data: empty_data(),
            pagination: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
