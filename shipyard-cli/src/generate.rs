//! Generate command implementation for the shipyard CLI.

use std::io::{ErrorKind, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use shipyard_core::{LogWarnings, RecordKind, WarningSink};
use shipyard_data::{DEFAULT_SCHEMA_FORMAT_VERSION, GenerationConfig, GenerationReport, generate};

use crate::{
    ARG_DATA_ROOT, ARG_GAME_VERSION, ARG_OUTPUT_DIR, ARG_SCHEMA_FORMAT_VERSION, CliError,
    ENV_DATA_ROOT, ENV_GAME_VERSION, ENV_OUTPUT_DIR,
};

/// CLI arguments for the `generate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read ship and outfit definitions beneath a data root, \
                 validate them and write one JSON artefact per species and \
                 record kind. Options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Generate species artefacts from game data"
)]
#[ortho_config(prefix = "SHIPYARD")]
pub(crate) struct GenerateArgs {
    /// Root of the game's data directory.
    #[arg(long = ARG_DATA_ROOT, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_root: Option<Utf8PathBuf>,
    /// Directory receiving the generated artefacts.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Version of the game the data was taken from.
    #[arg(long = ARG_GAME_VERSION, value_name = "version")]
    #[serde(default)]
    pub(crate) game_version: Option<String>,
    /// Artefact format version; defaults to the current format.
    #[arg(long = ARG_SCHEMA_FORMAT_VERSION, value_name = "version")]
    #[serde(default)]
    pub(crate) schema_format_version: Option<String>,
}

impl GenerateArgs {
    fn into_config(self) -> Result<GenerationConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GenerationConfig::try_from(merged)
    }
}

impl TryFrom<GenerateArgs> for GenerationConfig {
    type Error = CliError;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let data_root = args.data_root.ok_or(CliError::MissingArgument {
            field: ARG_DATA_ROOT,
            env: ENV_DATA_ROOT,
        })?;
        let output_dir = args.output_dir.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT_DIR,
            env: ENV_OUTPUT_DIR,
        })?;
        let game_version = args.game_version.ok_or(CliError::MissingArgument {
            field: ARG_GAME_VERSION,
            env: ENV_GAME_VERSION,
        })?;

        let mut config = Self::new(data_root, output_dir, game_version);
        config.schema_format_version = args
            .schema_format_version
            .unwrap_or_else(|| DEFAULT_SCHEMA_FORMAT_VERSION.to_owned());
        Ok(config)
    }
}

/// Check that the configured paths can be used before any work starts.
pub(crate) fn validate_paths(config: &GenerationConfig) -> Result<(), CliError> {
    match shipyard_fs::path_is_dir(&config.data_root) {
        Ok(true) => {}
        Ok(false) => {
            return Err(CliError::SourcePathNotDirectory {
                field: ARG_DATA_ROOT,
                path: config.data_root.clone(),
            });
        }
        Err(source) if source.kind() == ErrorKind::NotFound => {
            return Err(CliError::MissingSourceDirectory {
                field: ARG_DATA_ROOT,
                path: config.data_root.clone(),
            });
        }
        Err(source) => return Err(inspect_error(ARG_DATA_ROOT, &config.data_root, source)),
    }

    match shipyard_fs::path_is_dir(&config.output_dir) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::OutputDirectoryNotDirectory {
            path: config.output_dir.clone(),
        }),
        // Created on demand by the pipeline.
        Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(inspect_error(ARG_OUTPUT_DIR, &config.output_dir, source)),
    }
}

fn inspect_error(field: &'static str, path: &Utf8Path, source: std::io::Error) -> CliError {
    CliError::InspectPath {
        field,
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn resolve_generate_config(args: GenerateArgs) -> Result<GenerationConfig, CliError> {
    let config = args.into_config()?;
    validate_paths(&config)?;
    Ok(config)
}

pub(crate) fn run_generate(args: GenerateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_generate_with(args, &LogWarnings, writer)
}

pub(crate) fn run_generate_with(
    args: GenerateArgs,
    sink: &dyn WarningSink,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_generate_config(args)?;
    let report = generate(&config, sink)?;
    write_summary(writer, &report)
}

/// JSON summary printed after a successful run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    items: usize,
    dropped: usize,
    batches: Vec<BatchSummary<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchSummary<'a> {
    species: &'a str,
    kind: RecordKind,
    item_count: usize,
    dropped: usize,
    path: &'a Utf8Path,
}

impl<'a> From<&'a GenerationReport> for Summary<'a> {
    fn from(report: &'a GenerationReport) -> Self {
        Self {
            items: report.total_items(),
            dropped: report.total_dropped(),
            batches: report
                .batches
                .iter()
                .map(|batch| BatchSummary {
                    species: &batch.species,
                    kind: batch.kind,
                    item_count: batch.item_count,
                    dropped: batch.dropped,
                    path: &batch.path,
                })
                .collect(),
        }
    }
}

fn write_summary(writer: &mut dyn Write, report: &GenerationReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(&Summary::from(report))
        .map_err(CliError::SerialiseSummary)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSummary)?;
    writer.write_all(b"\n").map_err(CliError::WriteSummary)?;
    Ok(())
}
