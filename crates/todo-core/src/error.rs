//! Error types for the todo client.
//!
//! Every failure the browser can hit is folded into `ApiError` before it
//! reaches the store or a component.

use serde::Deserialize;
use thiserror::Error;

use crate::schema::TodoKey;
use crate::store::MutationKind;

/// Fallback when a failing response carries no message of its own.
pub const DEFAULT_SERVER_MESSAGE: &str = "An error occurred";

/// A local or response-shape validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Offending field, or `"response"` for a malformed payload
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Typed API error raised by the client and the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Input rejected locally or response did not match the schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Transport {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// The request went out but no response came back.
    #[error("Network error - no response received")]
    Network { reason: String },

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// HTTP status, or 0 when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Transport { status, .. } => *status,
            _ => 0,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }

    /// Build a transport error from a failing response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            code: Option<String>,
        }

        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let (message, code) = match parsed {
            Some(ErrorBody { message, code }) => (message, code),
            None => (None, None),
        };
        ApiError::Transport {
            status,
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_SERVER_MESSAGE.to_string()),
            code,
        }
    }
}

/// A mutation was refused because an earlier one has not settled yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationConflict {
    #[error("a todo is already being created")]
    CreateInFlight,

    #[error("a {kind} is already in flight for todo {key}")]
    KeyInFlight { key: TodoKey, kind: MutationKind },
}
