//! Filesystem side of the shipyard pipeline.
//!
//! Responsibilities:
//! - Find ship and outfit source files beneath a data root and assign each
//!   to a species by its first directory.
//! - Drive the core parser, transformer chains and validator per species.
//! - Publish one JSON artefact per species and record kind, stamped with
//!   [`shipyard_core::BatchMetadata`].
//!
//! Boundaries:
//! - Knows nothing about command-line parsing or configuration layering.
//! - Leaves record semantics to `shipyard-core`.
//!
//! Invariants:
//! - Artefact contents depend only on the source tree and configuration,
//!   apart from `generatedAt`.
//! - Invalid records are warned about and skipped; I/O and parse failures
//!   abort the run.

#![forbid(unsafe_code)]

pub mod artifact;
pub mod config;
pub mod discover;
pub mod error;
pub mod metadata;
pub mod pipeline;

pub use artifact::{artifact_path, write_batch};
pub use config::{DEFAULT_SCHEMA_FORMAT_VERSION, GenerationConfig, SourcePatterns};
pub use discover::{GameDataFile, discover, group_by_species, species_for};
pub use error::GenerateError;
pub use metadata::MetadataService;
pub use pipeline::{BatchReport, GenerationReport, generate};
