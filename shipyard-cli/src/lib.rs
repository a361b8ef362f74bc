//! Command-line interface for the shipyard artefact generator.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

mod error;
mod generate;

pub use error::CliError;
use generate::GenerateArgs;
#[cfg(test)]
use generate::{resolve_generate_config, run_generate_with};

const ARG_DATA_ROOT: &str = "data-root";
const ARG_OUTPUT_DIR: &str = "output-dir";
const ARG_GAME_VERSION: &str = "game-version";
const ARG_SCHEMA_FORMAT_VERSION: &str = "schema-format-version";
const ENV_DATA_ROOT: &str = "SHIPYARD_CMDS_GENERATE_DATA_ROOT";
const ENV_OUTPUT_DIR: &str = "SHIPYARD_CMDS_GENERATE_OUTPUT_DIR";
const ENV_GAME_VERSION: &str = "SHIPYARD_CMDS_GENERATE_GAME_VERSION";

/// Log level used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

/// Run the shipyard CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments or configuration are invalid, or when
/// generation fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Generate(args) => {
            let mut stdout = std::io::stdout().lock();
            generate::run_generate(args, &mut stdout)
        }
    }
}

/// Install a formatting subscriber on stderr.
///
/// Library crates log through the `log` facade; the subscriber bridges those
/// records. The filter comes from `RUST_LOG`, defaulting to `info`.
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init_logging() -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
        .map_err(CliError::InitLogging)
}

#[derive(Debug, Parser)]
#[command(
    name = "shipyard",
    about = "Turn game data files into species-partitioned JSON artefacts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse, normalise and validate ship and outfit definitions.
    Generate(GenerateArgs),
}

#[cfg(test)]
mod tests;
