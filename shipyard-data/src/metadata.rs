//! Provenance stamped on published batches.

use chrono::{DateTime, SecondsFormat, Utc};
use shipyard_core::BatchMetadata;

use crate::GenerationConfig;

/// Builds [`BatchMetadata`] for one game and format version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataService {
    game_version: String,
    schema_format_version: String,
}

impl MetadataService {
    /// Create a service for the given versions.
    #[must_use]
    pub fn new(game_version: impl Into<String>, schema_format_version: impl Into<String>) -> Self {
        Self {
            game_version: game_version.into(),
            schema_format_version: schema_format_version.into(),
        }
    }

    /// Create a service for the versions named in `config`.
    #[must_use]
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(
            config.game_version.clone(),
            config.schema_format_version.clone(),
        )
    }

    /// `{format}-{game}`, e.g. `1-0.10.7`.
    #[must_use]
    pub fn schema_version(&self) -> String {
        format!("{}-{}", self.schema_format_version, self.game_version)
    }

    /// Metadata stamped with the current time.
    #[must_use]
    pub fn create_metadata(&self, species: &str, item_count: usize) -> BatchMetadata {
        self.create_metadata_at(species, item_count, Utc::now())
    }

    /// Metadata stamped with `generated_at`, rendered as RFC 3339 with
    /// millisecond precision and a `Z` suffix.
    #[must_use]
    pub fn create_metadata_at(
        &self,
        species: &str,
        item_count: usize,
        generated_at: DateTime<Utc>,
    ) -> BatchMetadata {
        BatchMetadata {
            version: self.game_version.clone(),
            schema_version: self.schema_version(),
            species: species.to_owned(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            item_count,
        }
    }
}
