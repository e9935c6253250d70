// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Deserialize;
use std::fmt;

/// User-visible text for any 5xx response. Raw server output is never shown.
pub const SERVER_UNAVAILABLE_MSG: &str = "Server unavailable. Please try again.";

/// User-visible text when session validation rejects the identity.
pub const SESSION_INVALID_MSG: &str = "User not found.";

/// Errors produced by the Zentra API client and session core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Client-side validation failed; no network I/O was attempted.
    InvalidInput(String),
    /// Login rejected by the server. Carries the server's message verbatim.
    InvalidCredentials(String),
    /// The refresh credential was rejected. Drives silent logout, never UI.
    RefreshInvalid(String),
    /// Session validation returned `valid: false`.
    SessionInvalid,
    /// Terminal 401: renewal failed or the retried request was rejected again.
    Unauthorized(String),
    /// Any other 4xx with a server-supplied message.
    Api { status: u16, message: String },
    /// Any 5xx. The server's body is intentionally discarded.
    ServerUnavailable,
    /// No response received (connect failure, timeout, closed connection).
    Network(String),
    /// A response arrived but its body could not be decoded.
    Decode(String),
}

impl ApiError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::RefreshInvalid(_) => "REFRESH_INVALID",
            Self::SessionInvalid => "SESSION_INVALID",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Api { .. } => "API_ERROR",
            Self::ServerUnavailable => "SERVER_UNAVAILABLE",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
        }
    }

    /// HTTP status associated with the error, when one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredentials(_) | Self::RefreshInvalid(_) | Self::Unauthorized(_) => {
                Some(401)
            }
            Self::Api { status, .. } => Some(*status),
            Self::ServerUnavailable => Some(500),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg)
            | Self::InvalidCredentials(msg)
            | Self::RefreshInvalid(msg)
            | Self::Unauthorized(msg)
            | Self::Network(msg)
            | Self::Decode(msg) => f.write_str(msg),
            Self::SessionInvalid => f.write_str(SESSION_INVALID_MSG),
            Self::Api { message, .. } => f.write_str(message),
            Self::ServerUnavailable => f.write_str(SERVER_UNAVAILABLE_MSG),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Error body sent by the Zentra backend: a flat `{"message": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Extract the server's human-readable message from an error response body,
/// falling back to a status-derived message when the body is unusable.
pub(crate) fn server_message(status: u16, body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(msg) }) if !msg.is_empty() => msg,
        _ => format!("Request failed with status {status}"),
    }
}

/// Classify a non-success data-path response. 5xx collapses to the generic
/// unavailable error; 401 is pre-classified by the caller's retry logic.
pub(crate) fn classify_status(status: u16, body: &[u8]) -> ApiError {
    if status >= 500 {
        ApiError::ServerUnavailable
    } else if status == 401 {
        ApiError::Unauthorized(server_message(status, body))
    } else {
        ApiError::Api { status, message: server_message(status, body) }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
