use clap::Parser;
use std::io;
use std::process::ExitCode;

use scenetag_core::{PluginInput, PluginOutput, Result};
use scenetag_plugin::cli::CliArgs;
use scenetag_plugin::config::PluginConfig;
use scenetag_plugin::{logger, protocol, run_invocation};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logger::init(args.verbose, args.quiet);

    let output = invoke(&args).await;

    let mut stdout = io::stdout().lock();
    if let Err(err) = protocol::write_output(&output, &mut stdout) {
        // The host owns stdout; stderr is all that is left.
        eprintln!("failed to write terminal output: {err}");
        return ExitCode::FAILURE;
    }

    if output.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn invoke(args: &CliArgs) -> PluginOutput {
    let input = match read_input(args) {
        Ok(input) => input,
        Err(err) => {
            log::error!("{err}");
            return PluginOutput::error(err.to_string());
        }
    };

    run_invocation(input).await
}

/// Decode the invocation input: the stdin envelope normally, or a
/// synthetic one when a mode was passed on the command line.
fn read_input(args: &CliArgs) -> Result<PluginInput> {
    match &args.mode {
        Some(mode) => {
            log::debug!("using command line input");
            let config = PluginConfig::load(args.config.as_deref())?;
            Ok(protocol::synthetic_input(mode, &config))
        }
        None => {
            let mut stdin = io::stdin().lock();
            protocol::read_input(&mut stdin)
        }
    }
}
