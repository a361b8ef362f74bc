//! Errors that abort a generation run.

use std::io;

use camino::Utf8PathBuf;
use shipyard_core::ParseError;
use thiserror::Error;

/// Errors produced while generating artefacts from a data tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// No file under the data root matched the configured patterns.
    #[error("no files under {root} match any of {patterns:?}")]
    NoMatchingFiles {
        /// Data root that was searched.
        root: Utf8PathBuf,
        /// Patterns that were tried.
        patterns: Vec<String>,
    },
    /// The data root could not be listed.
    #[error("failed to read data directory {path}: {source}")]
    ReadDirectory {
        /// Directory being listed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A matched source file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A source file is not well formed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        #[source]
        source: ParseError,
    },
    /// A configured filename pattern is not a valid glob.
    #[error("invalid file pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// Offending pattern.
        pattern: String,
        /// Glob compilation error.
        #[source]
        source: glob::PatternError,
    },
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDirectory {
        /// Directory being created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A batch could not be serialised.
    #[error("failed to serialise artefact {path}: {source}")]
    SerialiseArtifact {
        /// Artefact being produced.
        path: Utf8PathBuf,
        /// Serialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// A serialised batch could not be written.
    #[error("failed to write artefact {path}: {source}")]
    WriteArtifact {
        /// Artefact being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
