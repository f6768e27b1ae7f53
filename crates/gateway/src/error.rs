// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Failure classification for backend calls.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Fallback text for 404 responses without a message.
const NOT_FOUND_MESSAGE: &str = "Resource not found.";
/// Fallback text for 500 responses without a message.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";
/// Fallback text for every other failed request.
const REQUEST_FAILED_MESSAGE: &str = "Request failed.";

/// A classified backend failure.
///
/// `Display` yields the single message shown to the librarian.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never reached the server.
    #[error("Connection error. Verify that the backend is reachable at {base_url}.")]
    Transport {
        /// The origin that could not be reached.
        base_url: String,
        /// The underlying transport error, for logs.
        detail: String,
    },

    /// HTTP 401. The body is ignored.
    #[error("Invalid or expired authentication token.")]
    Auth,

    /// HTTP 422.
    #[error("{message}")]
    Validation {
        /// Field messages joined with spaces, or the server message.
        message: String,
        /// The fields the server rejected, in server order.
        fields: Vec<String>,
    },

    /// HTTP 404.
    #[error("{message}")]
    NotFound {
        /// Server message or the generic not-found text.
        message: String,
    },

    /// HTTP 500.
    #[error("{message}")]
    Server {
        /// Server error/message or the generic internal-error text.
        message: String,
    },

    /// Any other non-2xx status.
    #[error("{message}")]
    UnknownHttp {
        /// The HTTP status code.
        status: u16,
        /// Server message or the generic request-failed text.
        message: String,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Malformed response from the backend: {detail}")]
    Decode {
        /// The deserialization error.
        detail: String,
    },
}

/// The parts of an error body the classifier looks at.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    /// Laravel-style top-level message.
    #[serde(default)]
    message: Option<String>,
    /// Free-form error text some handlers use instead of `message`.
    #[serde(default)]
    error: Option<String>,
    /// Per-field validation messages.
    #[serde(default)]
    errors: Option<Map<String, Value>>,
}

impl GatewayError {
    /// Classifies a non-2xx response from its status and raw body.
    ///
    /// Bodies that are not JSON are treated as carrying no message.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message: Option<String> = non_empty(parsed.message);

        match status {
            401 => Self::Auth,
            422 => {
                let (fields, field_messages) = flatten_field_errors(parsed.errors);
                let message: String = if field_messages.is_empty() {
                    message.unwrap_or_else(|| String::from(REQUEST_FAILED_MESSAGE))
                } else {
                    field_messages.join(" ")
                };
                Self::Validation { message, fields }
            }
            404 => Self::NotFound {
                message: message.unwrap_or_else(|| String::from(NOT_FOUND_MESSAGE)),
            },
            500 => Self::Server {
                message: non_empty(parsed.error)
                    .or(message)
                    .unwrap_or_else(|| String::from(INTERNAL_ERROR_MESSAGE)),
            },
            _ => Self::UnknownHttp {
                status,
                message: message.unwrap_or_else(|| String::from(REQUEST_FAILED_MESSAGE)),
            },
        }
    }

    /// Returns the message shown to the librarian.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns the HTTP status behind this failure, if a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } | Self::Decode { .. } => None,
            Self::Auth => Some(401),
            Self::Validation { .. } => Some(422),
            Self::NotFound { .. } => Some(404),
            Self::Server { .. } => Some(500),
            Self::UnknownHttp { status, .. } => Some(*status),
        }
    }

    /// Returns whether the request never reached the server.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Drops empty strings, which the backend sometimes sends instead of null.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Flattens `{field: [messages]}` into field names and messages, both in
/// body order.
fn flatten_field_errors(errors: Option<Map<String, Value>>) -> (Vec<String>, Vec<String>) {
    let mut fields: Vec<String> = Vec::new();
    let mut messages: Vec<String> = Vec::new();

    for (field, value) in errors.unwrap_or_default() {
        match value {
            Value::Array(items) => {
                messages.extend(items.into_iter().filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                }));
            }
            Value::String(text) => messages.push(text),
            _ => {}
        }
        fields.push(field);
    }

    (fields, messages)
}
