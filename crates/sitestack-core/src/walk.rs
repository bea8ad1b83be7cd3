//! Directory traversal for the sync stage.
//!
//! Traversal is a pure function from a local root to a list of
//! `(path, key)` pairs; the upload stage consumes the list separately. This
//! keeps dry-run modes and future parallel uploads from having to touch the
//! walk itself.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeployError, Result};

/// One file discovered under the sync root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute (or root-relative) path on the local filesystem.
    pub path: PathBuf,
    /// Destination object key: the path relative to the sync root, joined
    /// with forward slashes regardless of platform.
    pub key: String,
}

/// Recursively collect every regular file under `root`.
///
/// Directories never produce entries. Siblings are visited in lexicographic
/// order so the resulting upload order is deterministic. Symlinks and other
/// non-regular entries are skipped.
///
/// # Examples
///
/// ```no_run
/// use sitestack_core::walk::walk_files;
/// use std::path::Path;
///
/// let entries = walk_files(Path::new("./public"))?;
/// for entry in &entries {
///     println!("{} -> {}", entry.path.display(), entry.key);
/// }
/// # Ok::<(), sitestack_core::DeployError>(())
/// ```
pub fn walk_files(root: &Path) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    walk_dir(root, "", &mut entries)?;
    Ok(entries)
}

fn walk_dir(dir: &Path, base: &str, out: &mut Vec<FileEntry>) -> Result<()> {
    let read_dir = fs::read_dir(dir).map_err(|source| DeployError::Walk {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut children: Vec<_> = read_dir
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|source| DeployError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
    children.sort_by_key(fs::DirEntry::file_name);

    for child in children {
        let name = child.file_name();
        let name = name.to_string_lossy();
        let key = if base.is_empty() {
            name.to_string()
        } else {
            format!("{base}/{name}")
        };

        let file_type = child.file_type().map_err(|source| DeployError::Walk {
            path: child.path(),
            source,
        })?;

        if file_type.is_dir() {
            walk_dir(&child.path(), &key, out)?;
        } else if file_type.is_file() {
            out.push(FileEntry {
                path: child.path(),
                key,
            });
        }
        // Symlinks, sockets, devices: not mirrored.
    }

    Ok(())
}
