//! Error types emitted by the shipyard CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use shipyard_data::GenerateError;
use thiserror::Error;

/// Errors emitted by the shipyard CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    InitLogging(#[source] tracing_subscriber::util::TryInitError),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input directory does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceDirectory {
        /// Option naming the directory.
        field: &'static str,
        /// Path that was given.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a directory.
    #[error("{field} path {path:?} is not a directory")]
    SourcePathNotDirectory {
        /// Option naming the directory.
        field: &'static str,
        /// Path that was given.
        path: Utf8PathBuf,
    },
    /// A referenced path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectPath {
        /// Option naming the path.
        field: &'static str,
        /// Path that was given.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The output directory exists but is not a directory.
    #[error("output directory {path:?} is not a directory")]
    OutputDirectoryNotDirectory {
        /// Path that was given.
        path: Utf8PathBuf,
    },
    /// Artefact generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// Serialising the generation summary failed.
    #[error("failed to serialise generation summary: {0}")]
    SerialiseSummary(#[source] serde_json::Error),
    /// Writing the generation summary failed.
    #[error("failed to write generation summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
