//! Locate source files and assign them to species.
//!
//! A file's species is the first directory beneath the data root that
//! contains it. Files sitting directly in the root belong to
//! [`DEFAULT_SPECIES`].

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use glob::Pattern;
use shipyard_core::DEFAULT_SPECIES;

use crate::GenerateError;

/// A matched source file and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDataFile {
    /// Location relative to the data root.
    pub path: Utf8PathBuf,
    /// Species the file belongs to.
    pub species: String,
    /// Full UTF-8 contents.
    pub content: String,
}

/// Read every file beneath `root` whose name matches one of `patterns`.
///
/// Files are returned in path order.
///
/// # Errors
/// Fails when the root cannot be walked, a matched file cannot be read, or
/// no file matches at all.
pub fn discover(root: &Utf8Path, patterns: &[Pattern]) -> Result<Vec<GameDataFile>, GenerateError> {
    let listed = shipyard_fs::walk_utf8_files(root).map_err(|source| GenerateError::ReadDirectory {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for relative in listed {
        let matched = relative
            .file_name()
            .is_some_and(|name| patterns.iter().any(|pattern| pattern.matches(name)));
        if !matched {
            continue;
        }
        let absolute = root.join(&relative);
        let content = shipyard_fs::read_utf8_to_string(&absolute)
            .map_err(|source| GenerateError::ReadFile { path: absolute, source })?;
        files.push(GameDataFile {
            species: species_for(&relative, Utf8Path::new("")),
            path: relative,
            content,
        });
    }

    if files.is_empty() {
        return Err(GenerateError::NoMatchingFiles {
            root: root.to_path_buf(),
            patterns: patterns.iter().map(|pattern| pattern.as_str().to_owned()).collect(),
        });
    }
    log::debug!("matched {} files under {root}", files.len());
    Ok(files)
}

/// Species of `path`, judged relative to `root`.
///
/// Paths outside `root` are judged as given.
#[must_use]
pub fn species_for(path: &Utf8Path, root: &Utf8Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut components = relative.components();
    match (components.next(), components.next()) {
        (Some(first), Some(_)) => first.as_str().to_owned(),
        _ => DEFAULT_SPECIES.to_owned(),
    }
}

/// Group files by species, keeping discovery order within each group.
#[must_use]
pub fn group_by_species(files: Vec<GameDataFile>) -> BTreeMap<String, Vec<GameDataFile>> {
    let mut groups: BTreeMap<String, Vec<GameDataFile>> = BTreeMap::new();
    for file in files {
        groups.entry(file.species.clone()).or_default().push(file);
    }
    groups
}
