//! The scenetag plugin binary, as a library.
//!
//! The binary entry point is a thin wrapper around [`run_invocation`]:
//! decode the input envelope, run exactly one operation, and always
//! produce a terminal output envelope — failures are routed into its
//! `error` field rather than aborting the process.

pub mod cli;
pub mod config;
pub mod logger;
pub mod ops;
pub mod protocol;

use scenetag_client::GraphqlClient;
use scenetag_core::{PluginInput, PluginOutput, Result};

/// Run one plugin invocation to its terminal envelope.
///
/// Never fails: any error raised by the dispatched operation is
/// serialized into the `error` field of the returned envelope.
pub async fn run_invocation(input: PluginInput) -> PluginOutput {
    match execute(input).await {
        Ok(()) => PluginOutput::ok("ok"),
        Err(err) => {
            log::error!("{err}");
            PluginOutput::error(err.to_string())
        }
    }
}

async fn execute(input: PluginInput) -> Result<()> {
    let mode = ops::Mode::parse(input.mode())?;

    // One client per invocation, handed explicitly to the operation.
    let client = GraphqlClient::new(input.server_connection)?;
    ops::dispatch(mode, &client, &logger::HostProgress).await
}
