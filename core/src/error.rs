//! Error types for the Pockets API client.
//!
//! # Design
//! Every variant's Display string is the exact sentence shown to the user:
//! `save_current_page` and `test_connection` turn these errors into
//! `ApiResult.message` verbatim, so no variant may render a stack trace or a
//! bare status code. Configuration problems get dedicated variants because
//! they must fail before any network call is attempted.

use thiserror::Error;

use crate::http::TransportError;

/// Errors raised by `ApiClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No API token is stored. Raised before any request is built.
    #[error("API not configured. Please configure in settings.")]
    NotConfigured,

    /// No target project is stored or supplied. Raised before any request.
    #[error("No project selected. Please select a project in settings.")]
    NoProjectSelected,

    /// The server rejected the token with a 401.
    #[error("Authentication failed. Please check your API token in settings.")]
    AuthFailed,

    /// Any other non-2xx response. `message` is the server's JSON `message`
    /// field when present, otherwise the response's status text.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// No HTTP response was received at all.
    #[error("Network error. Please check your internet connection.")]
    Network(#[from] TransportError),

    /// A 2xx response whose body was not valid JSON.
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    /// The request payload could not be encoded as JSON.
    #[error("Failed to encode request: {0}")]
    Serialize(String),
}
