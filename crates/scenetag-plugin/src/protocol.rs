//! Plugin invocation protocol: decode the host input envelope, encode
//! the terminal output envelope.

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::config::PluginConfig;
use scenetag_core::{ConnectionInfo, Error, PluginInput, PluginOutput, Result};

/// Parse the host-supplied JSON input envelope.
pub fn parse_input(raw: &str) -> Result<PluginInput> {
    serde_json::from_str(raw).map_err(|e| Error::malformed_input(e.to_string()))
}

/// Read the input envelope from `reader` in full, then parse it.
pub fn read_input(reader: &mut impl Read) -> Result<PluginInput> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    log::debug!("raw input: {}", raw.trim_end());
    parse_input(&raw)
}

/// Build the synthetic input used when a mode is passed on the command
/// line: the configured fallback connection, no session cookie.
pub fn synthetic_input(mode: &str, config: &PluginConfig) -> PluginInput {
    let mut args = HashMap::new();
    args.insert("mode".to_string(), mode.to_string());

    PluginInput {
        args,
        server_connection: ConnectionInfo {
            scheme: config.connection.scheme.clone(),
            port: config.connection.port,
            session_cookie: None,
        },
    }
}

/// Serialize the terminal output envelope: one JSON line followed by a
/// trailing blank line. Called exactly once, as the last act before the
/// process exits.
pub fn write_output(output: &PluginOutput, writer: &mut impl Write) -> Result<()> {
    let line = serde_json::to_string(output)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n\n")?;
    writer.flush()?;
    Ok(())
}
