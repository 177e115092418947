//! Source discovery: enumerate the files a read session will consume.
//!
//! Discovery is a separate phase from streaming so that failures attribute
//! cleanly: problems with the root directory surface here, problems with
//! individual files surface when the reader opens them.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ReaderError;
use crate::Result;

/// Recursively enumerate every regular file under `root`.
///
/// The walk is depth-first in directory-listing order; no sorting is
/// applied, so the order is platform-dependent but fixed for the snapshot
/// this call returns. Symlinks are not followed. Entries that cannot be
/// read mid-walk (e.g. a subdirectory whose permissions were revoked) are
/// skipped rather than failing the whole walk.
///
/// An empty directory returns an empty list; that is not an error here.
/// The reader raises [`ReaderError::NoDataSource`] at `open` instead, so
/// that a count-only caller can still observe "zero files" as a count.
pub fn discover(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    check_directory(root)?;

    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if entry.file_type().is_file() {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

/// Validate the root path before any file-level work.
fn check_directory(root: &Path) -> Result<()> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(_) => return Err(ReaderError::DirectoryNotFound(root.to_path_buf())),
    };

    if !metadata.is_dir() {
        return Err(ReaderError::NotADirectory(root.to_path_buf()));
    }

    // Probe readability up front so permission problems surface as a
    // configuration error rather than an empty walk.
    if let Err(e) = fs::read_dir(root) {
        return Err(ReaderError::DirectoryUnreadable {
            path: root.to_path_buf(),
            source: e,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_flat_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "x\ny\n").unwrap();
        fs::write(temp.path().join("b.txt"), "z\n").unwrap();

        let files = discover(temp.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.ends_with("a.txt")));
        assert!(files.iter().any(|p| p.ends_with("b.txt")));
    }

    #[test]
    fn test_discover_nested_directories() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("sub/deeper")).unwrap();
        fs::write(temp.path().join("top.txt"), "1\n").unwrap();
        fs::write(temp.path().join("sub/mid.txt"), "2\n").unwrap();
        fs::write(temp.path().join("sub/deeper/leaf.txt"), "3\n").unwrap();

        let files = discover(temp.path()).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.iter().any(|p| p.ends_with("sub/deeper/leaf.txt")));
    }

    #[test]
    fn test_discover_empty_directory_is_not_an_error() {
        let temp = tempdir().unwrap();

        let files = discover(temp.path()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_skips_directories_themselves() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("only_dirs")).unwrap();

        let files = discover(temp.path()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_missing_root() {
        let err = discover("/nonexistent/linerec/root").unwrap_err();

        assert!(matches!(err, ReaderError::DirectoryNotFound(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_discover_root_is_a_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "not a dir\n").unwrap();

        let err = discover(&file).unwrap_err();

        assert!(matches!(err, ReaderError::NotADirectory(_)));
        assert!(err.is_configuration());
    }
}
