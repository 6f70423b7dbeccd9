//! Invocation envelope types exchanged with the host.
//!
//! The host launches the plugin process with a single JSON document on
//! stdin ([`PluginInput`]) and reads a single JSON line back from stdout
//! ([`PluginOutput`]) once the invocation has run to completion or failed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The input envelope the host supplies on stdin.
///
/// Parsed once per process lifetime and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginInput {
    /// Free-form operation arguments. `args["mode"]` selects the
    /// operation to run; all other keys are ignored.
    #[serde(default)]
    pub args: HashMap<String, String>,

    /// Connection parameters for the host's GraphQL endpoint.
    pub server_connection: ConnectionInfo,
}

impl PluginInput {
    /// The requested operation mode. An absent or empty mode selects the
    /// default operation.
    pub fn mode(&self) -> &str {
        self.args.get("mode").map(String::as_str).unwrap_or("")
    }
}

/// Connection parameters identifying the single GraphQL endpoint this
/// process may talk to: `{scheme}://localhost:{port}/graphql`.
///
/// Owned exclusively by the GraphQL client for the process lifetime;
/// exactly one instance exists per process.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionInfo {
    /// URL scheme, `http` or `https`.
    pub scheme: String,

    /// Port the host's GraphQL endpoint listens on.
    pub port: u16,

    /// Session credential, sent as a `session` cookie when present.
    /// The argv fallback path leaves this unset and talks to the
    /// endpoint unauthenticated.
    #[serde(default)]
    pub session_cookie: Option<String>,
}

/// The terminal output envelope, written to stdout exactly once as the
/// last act of the process. Exactly one of the two fields is populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginOutput {
    /// Result payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Error description on failure. The envelope is emitted even when
    /// the invocation fails, so the host can react gracefully.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PluginOutput {
    /// A success envelope carrying the given payload.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            error: None,
        }
    }

    /// A failure envelope carrying the given error description.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            output: None,
            error: Some(error.into()),
        }
    }
}
