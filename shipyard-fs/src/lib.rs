//! Capability-based filesystem helpers built on `cap-std` and `camino`.
//!
//! Paths handed in by callers may be absolute or relative; each helper
//! resolves an ambient base directory once and performs every further
//! operation relative to that capability.
#![forbid(unsafe_code)]

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Read a whole UTF-8 file into memory.
pub fn read_utf8_to_string(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.read_to_string(name.as_str())
}

/// Write `contents` to `path`, creating missing parent directories first.
pub fn write_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.write(name.as_str(), contents)
}

/// List every regular file beneath `root`, as paths relative to `root`.
///
/// The result is sorted by path components, so it is identical across runs
/// for an unchanged tree. Symbolic links are not followed.
pub fn walk_utf8_files(root: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
    let root_dir = fs_utf8::Dir::open_ambient_dir(root, ambient_authority())?;
    let mut files = Vec::new();
    let mut pending = vec![(root_dir, Utf8PathBuf::new())];

    while let Some((dir, prefix)) = pending.pop() {
        for item in dir.entries()? {
            let entry = item?;
            let name = entry.file_name()?;
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                pending.push((dir.open_dir(name.as_str())?, prefix.join(&name)));
            } else if file_type.is_file() {
                files.push(prefix.join(&name));
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Report whether `path` names an existing directory.
///
/// Missing paths surface as [`io::ErrorKind::NotFound`].
pub fn path_is_dir(path: &Utf8Path) -> io::Result<bool> {
    if path.file_name().is_none() {
        return fs_utf8::Dir::open_ambient_dir(path, ambient_authority()).map(|_| true);
    }
    let (dir, name) = open_dir_and_file(path)?;
    Ok(dir.metadata(name.as_str())?.is_dir())
}

/// Resolve an ambient directory for the given path and return the directory
/// with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} should include a file name")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Ensure the parent directory for `path` exists, handling absolute paths
/// safely for cap-std.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    ensure_dir(parent)
}

/// Ensure `path` exists as a directory, creating missing ancestors.
///
/// Any drive prefix and root of `path` become the ambient capability and the
/// remaining components are created beneath it.
pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
    let mut anchor = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => anchor.push(component),
            _ => relative.push(component),
        }
    }
    if relative.as_str().is_empty() {
        return Ok(());
    }
    let base = if anchor.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        anchor.as_path()
    };
    fs_utf8::Dir::open_ambient_dir(base, ambient_authority())?.create_dir_all(&relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        (dir, root)
    }

    #[rstest]
    fn writes_through_missing_parents(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let target = root.join("human/nested/ships.json");

        write_file(&target, b"{}").expect("write file");

        assert_eq!(read_utf8_to_string(&target).expect("read back"), "{}");
    }

    #[rstest]
    fn walks_in_component_order(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        for relative in ["b.txt", "a/z.txt", "a/b/c.txt", "a.txt", "c/.keep"] {
            write_file(&root.join(relative), b"").expect("seed file");
        }

        let files = walk_utf8_files(&root).expect("walk tree");

        let names: Vec<&str> = files.iter().map(|path| path.as_str()).collect();
        assert_eq!(names, ["a/b/c.txt", "a/z.txt", "a.txt", "b.txt", "c/.keep"]);
    }

    #[rstest]
    fn distinguishes_directories_from_files(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        write_file(&root.join("human/ships.txt"), b"").expect("seed file");

        assert!(path_is_dir(&root.join("human")).expect("inspect dir"));
        assert!(!path_is_dir(&root.join("human/ships.txt")).expect("inspect file"));
        let err = path_is_dir(&root.join("hai")).expect_err("missing path");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn creates_nested_directories_idempotently(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let target = root.join("out/human");

        ensure_dir(&target).expect("create dirs");
        ensure_dir(&target).expect("existing dirs are fine");

        assert!(path_is_dir(&target).expect("inspect dir"));
        ensure_dir(Utf8Path::new("")).expect("empty path is a no-op");
        ensure_dir(Utf8Path::new("/")).expect("root is a no-op");
    }

    #[rstest]
    fn walking_a_missing_root_fails(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let err = walk_utf8_files(&root.join("missing")).expect_err("missing root");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
