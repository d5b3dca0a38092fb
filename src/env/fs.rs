//! Filesystem queries used by the parser.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations an [`EnvFileParser`](super::EnvFileParser) needs.
///
/// Keeping these behind a trait leaves the line parser pure and lets tests
/// substitute an in-memory tree.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Resolves `path` to its canonical absolute form.
    fn resolve_path(&self, path: &Path) -> io::Result<PathBuf>;

    fn is_dir(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    fn is_readable(&self, path: &Path) -> bool;

    /// Reads the whole file. Any handle must be released before returning.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn resolve_path(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_readable(&self, path: &Path) -> bool {
        File::open(path).is_ok()
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_os_resolves_directory() {
        let dir = TempDir::new().unwrap();
        let fs = OsFileSystem;

        let resolved = fs.resolve_path(dir.path()).unwrap();

        assert!(resolved.is_absolute());
        assert!(fs.is_dir(&resolved));
    }

    #[test]
    fn test_os_resolve_missing_fails() {
        let result = OsFileSystem.resolve_path(Path::new("/nonexistent/rootenv/dir"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_os_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "A=1").unwrap();
        let fs = OsFileSystem;

        assert!(fs.exists(file.path()));
        assert!(!fs.is_dir(file.path()));
        assert!(fs.is_readable(file.path()));
        assert_eq!(fs.read_file(file.path()).unwrap(), b"A=1");
    }
}
