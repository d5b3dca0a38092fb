use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use tracing::debug;

use super::environment::{ParsedEnvironment, ROOT_PATH_KEY};
use super::fs::{FileSystem, OsFileSystem};
use super::lines::parse_lines;
use crate::error::{Error, ParseFailure};

/// Name of the file looked up inside the root directory.
pub const ENV_FILE_NAME: &str = ".env";

/// Reads `<root>/.env` and turns it into a [`ParsedEnvironment`].
///
/// The root directory is validated and canonicalized once, at construction.
/// Every call to [`parse`](Self::parse) re-reads the file and returns a fresh
/// mapping that always carries [`ROOT_PATH_KEY`].
///
/// ## Example
///
/// ```no_run
/// use rootenv::EnvFileParser;
///
/// let parser = EnvFileParser::new("/srv/app")?;
/// let env = parser.parse()?;
///
/// assert_eq!(env.root_path(), Some(parser.root()));
/// # Ok::<(), rootenv::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnvFileParser<F = OsFileSystem> {
    root: String,
    fs: F,
}

impl EnvFileParser {
    /// Creates a parser rooted at `root` on the real filesystem.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, Error> {
        Self::with_file_system(root, OsFileSystem)
    }
}

impl<F: FileSystem> EnvFileParser<F> {
    /// Creates a parser that queries `fs` instead of the real filesystem.
    ///
    /// Fails with [`Error::InvalidRootDirectory`] if `root` doesn't resolve to
    /// an existing directory, or resolves to a path that isn't valid UTF-8.
    pub fn with_file_system(root: impl AsRef<Path>, fs: F) -> Result<Self, Error> {
        let requested = root.as_ref();

        let resolved = fs
            .resolve_path(requested)
            .map_err(|e| Error::invalid_root(requested, Some(e)))?;
        if !fs.is_dir(&resolved) {
            return Err(Error::invalid_root(requested, None));
        }

        let root = resolved
            .to_str()
            .map(strip_trailing_separators)
            .ok_or_else(|| Error::invalid_root(requested, None))?
            .to_owned();

        debug!(root = %root, "env root directory resolved");
        Ok(Self { root, fs })
    }

    /// The canonical root directory, without a trailing separator.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Location of the `.env` file this parser reads.
    pub fn env_file_path(&self) -> PathBuf {
        Path::new(&self.root).join(ENV_FILE_NAME)
    }

    /// Reads and parses the `.env` file.
    ///
    /// Fails with [`Error::CannotParseEnvFile`] when the file is missing,
    /// unreadable or fails to read, and wraps any other failure in the same
    /// variant with the original error as its source. Malformed lines are
    /// skipped.
    pub fn parse(&self) -> Result<ParsedEnvironment, Error> {
        let path = self.env_file_path();

        if !self.fs.exists(&path) {
            return Err(Error::cannot_parse(path, ParseFailure::NotFound));
        }
        if !self.fs.is_readable(&path) {
            return Err(Error::cannot_parse(path, ParseFailure::PermissionDenied));
        }

        let bytes = self
            .fs
            .read_file(&path)
            .map_err(|e| Error::cannot_parse_with(&path, ParseFailure::Read, e))?;

        let env = self
            .build_environment(bytes)
            .map_err(|e| Error::cannot_parse_with(&path, ParseFailure::Unexpected, e))?;

        debug!(path = %path.display(), entries = env.len(), "env file parsed");
        Ok(env)
    }

    fn build_environment(
        &self,
        bytes: Vec<u8>,
    ) -> Result<ParsedEnvironment, std::string::FromUtf8Error> {
        let contents = String::from_utf8(bytes)?;
        let mut env = parse_lines(&contents);
        env.insert(ROOT_PATH_KEY, self.root.as_str());
        Ok(env)
    }
}

/// Builds [`EnvFileParser`]s that share one [`FileSystem`].
///
/// ## Example
///
/// ```
/// use rootenv::EnvFileParserFactory;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join(".env"), "A=1\n").unwrap();
///
/// let parser = EnvFileParserFactory::new().create(dir.path())?;
/// assert_eq!(parser.parse()?.get("A"), Some("1"));
/// # Ok::<(), rootenv::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvFileParserFactory<F = OsFileSystem> {
    fs: F,
}

impl EnvFileParserFactory {
    /// Creates a factory whose parsers use the real filesystem.
    pub fn new() -> Self {
        Self { fs: OsFileSystem }
    }
}

impl<F: FileSystem + Clone> EnvFileParserFactory<F> {
    /// Creates a factory whose parsers query `fs`.
    pub fn with_file_system(fs: F) -> Self {
        Self { fs }
    }

    /// Equivalent to [`EnvFileParser::with_file_system`] with this factory's filesystem.
    pub fn create(&self, root: impl AsRef<Path>) -> Result<EnvFileParser<F>, Error> {
        EnvFileParser::with_file_system(root, self.fs.clone())
    }
}

fn strip_trailing_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(MAIN_SEPARATOR);
    if trimmed.is_empty() {
        // filesystem root
        &path[..MAIN_SEPARATOR.len_utf8().min(path.len())]
    } else {
        trimmed
    }
}
