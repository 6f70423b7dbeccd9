//! Configuration for the plugin binary.
//!
//! Only the argv fallback path needs configuration: the connection
//! defaults used when a mode is passed on the command line instead of a
//! full input envelope. Loads from TOML files, environment variables,
//! and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `SCENETAG_CONFIG` environment variable
//! 3. XDG default: `~/.config/scenetag/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use scenetag_core::{Error, Result};

/// Configuration for the `scenetag` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Fallback connection used by command-line invocations.
    pub connection: ConnectionDefaults,
}

/// Connection defaults for the argv fallback path. Host-driven
/// invocations carry their own connection in the input envelope and
/// never consult these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionDefaults {
    /// URL scheme for the local endpoint.
    pub scheme: String,

    /// Port the local endpoint listens on.
    pub port: u16,
}

impl Default for ConnectionDefaults {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            port: 9999,
        }
    }
}

impl PluginConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("SCENETAG");
        env_opts.add_section("connection");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG
    /// default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("SCENETAG_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scenetag").join("config.toml"))
    }
}
