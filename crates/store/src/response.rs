//! API-boundary result envelope.
//!
//! The IPC layer (out of scope) forwards these as plain result objects.
//! Detected replays are successes with a distinguishing message, never
//! errors.

use serde::Serialize;

use crate::error::OpError;

/// The serializable outcome of one operation.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded (replays included).
    pub success: bool,
    /// The operation's payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable outcome message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Stable error code on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A plain success.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// A success with an explanatory message (used for replays).
    #[must_use]
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    /// A failure carrying the error's stable code and message.
    #[must_use]
    pub fn fail(err: &OpError) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(err.to_string()),
            error: Some(err.error_code().to_string()),
        }
    }
}

impl<T: Serialize> From<Result<T, OpError>> for ApiResponse<T> {
    fn from(result: Result<T, OpError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(&err),
        }
    }
}
