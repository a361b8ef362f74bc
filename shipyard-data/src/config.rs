//! Settings for a generation run.

use camino::Utf8PathBuf;
use glob::Pattern;
use shipyard_core::{ParserOptions, RecordKind, RecordSchema};

use crate::GenerateError;

/// Format version combined with the game version in `schemaVersion`.
pub const DEFAULT_SCHEMA_FORMAT_VERSION: &str = "1";

/// Filename globs selecting the source files of each record kind.
///
/// Patterns are matched against the file name only, never the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePatterns {
    /// Patterns for files holding ship definitions.
    pub ships: Vec<String>,
    /// Patterns for files holding outfit definitions.
    pub outfits: Vec<String>,
}

impl Default for SourcePatterns {
    fn default() -> Self {
        Self {
            ships: vec!["*ships.txt".to_owned(), "*ship.txt".to_owned()],
            outfits: [
                "*outfits.txt",
                "*weapons.txt",
                "*engines.txt",
                "*power.txt",
                "*systems.txt",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

impl SourcePatterns {
    /// Patterns configured for `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: RecordKind) -> &[String] {
        match kind {
            RecordKind::Ship => &self.ships,
            RecordKind::Outfit => &self.outfits,
        }
    }

    /// Compile the patterns for `kind`.
    ///
    /// # Errors
    /// Returns [`GenerateError::InvalidPattern`] for the first pattern that is
    /// not a valid glob.
    pub fn compile(&self, kind: RecordKind) -> Result<Vec<Pattern>, GenerateError> {
        self.for_kind(kind)
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| GenerateError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}

/// Everything a generation run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Root of the source data tree.
    pub data_root: Utf8PathBuf,
    /// Directory receiving one subdirectory of artefacts per species.
    pub output_dir: Utf8PathBuf,
    /// Version of the game the data belongs to.
    pub game_version: String,
    /// Version of the artefact format.
    pub schema_format_version: String,
    /// Source text conventions.
    pub parser: ParserOptions,
    /// Filename patterns per record kind.
    pub patterns: SourcePatterns,
    /// Numeric schema applied during normalization and validation.
    pub schema: RecordSchema,
}

impl GenerationConfig {
    /// A configuration with default parser, patterns and schema.
    #[must_use]
    pub fn new(
        data_root: impl Into<Utf8PathBuf>,
        output_dir: impl Into<Utf8PathBuf>,
        game_version: impl Into<String>,
    ) -> Self {
        Self {
            data_root: data_root.into(),
            output_dir: output_dir.into(),
            game_version: game_version.into(),
            schema_format_version: DEFAULT_SCHEMA_FORMAT_VERSION.to_owned(),
            parser: ParserOptions::default(),
            patterns: SourcePatterns::default(),
            schema: RecordSchema::default(),
        }
    }
}
