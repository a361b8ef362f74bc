//! Write batches as pretty-printed JSON artefacts.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use shipyard_core::{Batch, RecordKind};

use crate::GenerateError;

/// `{output_dir}/{species}/{ships|outfits}.json`.
#[must_use]
pub fn artifact_path(output_dir: &Utf8Path, species: &str, kind: RecordKind) -> Utf8PathBuf {
    output_dir
        .join(species)
        .join(format!("{}.json", kind.plural()))
}

/// Serialise `batch` and write it to `path`, creating parent directories.
///
/// # Errors
/// Returns [`GenerateError::SerialiseArtifact`] or
/// [`GenerateError::WriteArtifact`].
pub fn write_batch<T: Serialize>(path: &Utf8Path, batch: &Batch<T>) -> Result<(), GenerateError> {
    let mut bytes =
        serde_json::to_vec_pretty(batch).map_err(|source| GenerateError::SerialiseArtifact {
            path: path.to_path_buf(),
            source,
        })?;
    bytes.push(b'\n');
    shipyard_fs::write_file(path, &bytes).map_err(|source| GenerateError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })
}
