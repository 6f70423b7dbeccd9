//! Error types for scenetag operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across the workspace. Uses `thiserror` for derive macros.
//!
//! None of these errors are recovered locally: every failure propagates to
//! the plugin protocol boundary, where it is serialized into the `error`
//! field of the terminal output envelope.

use thiserror::Error;

/// Errors that can occur while running a plugin invocation.
#[derive(Error, Debug)]
pub enum Error {
    /// The host-supplied input envelope was unparsable, missing required
    /// fields, or named an unrecognized operation mode. No remote calls
    /// are attempted after this error.
    #[error("malformed plugin input: {0}")]
    MalformedInput(String),

    /// A client-side precondition was violated before any I/O happened.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The GraphQL endpoint could not be reached.
    #[error("could not reach GraphQL endpoint: {0}")]
    Connection(String),

    /// The endpoint answered with a non-2xx HTTP status. The body is the
    /// raw response text and is never parsed as a GraphQL envelope.
    #[error("GraphQL request failed with status {status}: {body}")]
    Transport { status: u16, body: String },

    /// The remote service accepted the request but reported one or more
    /// application-level errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// An operation precondition was unmet, e.g. no scenes exist to tag.
    #[error("no eligible target: {0}")]
    NoTarget(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a malformed input error.
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a transport error from an HTTP status and raw body.
    pub fn transport(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            body: body.into(),
        }
    }

    /// Create a GraphQL application error.
    pub fn graphql(msg: impl Into<String>) -> Self {
        Self::GraphQl(msg.into())
    }

    /// Create a missing target error.
    pub fn no_target(msg: impl Into<String>) -> Self {
        Self::NoTarget(msg.into())
    }
}

/// Result type alias using scenetag's Error type.
pub type Result<T> = std::result::Result<T, Error>;
