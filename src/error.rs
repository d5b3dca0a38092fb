use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

/// Boxed underlying cause attached to [`Error::CannotParseEnvFile`].
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for the rootenv library.
///
/// Building a parser only ever fails with [`Error::InvalidRootDirectory`] and
/// parsing only ever fails with [`Error::CannotParseEnvFile`]. Malformed lines
/// inside a `.env` file are skipped and never surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid root directory: {path}")]
    InvalidRootDirectory {
        path: PathBuf,
        source: Option<std::io::Error>,
    },

    #[error("cannot parse env file '{path}': {reason}")]
    CannotParseEnvFile {
        path: PathBuf,
        reason: ParseFailure,
        source: Option<Cause>,
    },

    #[error("failed to deserialize environment: {0}")]
    Deserialize(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn invalid_root(path: impl Into<PathBuf>, source: Option<std::io::Error>) -> Self {
        Self::InvalidRootDirectory {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn cannot_parse(path: impl Into<PathBuf>, reason: ParseFailure) -> Self {
        Self::CannotParseEnvFile {
            path: path.into(),
            reason,
            source: None,
        }
    }

    /// Wraps an arbitrary failure into [`Error::CannotParseEnvFile`].
    pub(crate) fn cannot_parse_with(
        path: impl Into<PathBuf>,
        reason: ParseFailure,
        cause: impl Into<Cause>,
    ) -> Self {
        Self::CannotParseEnvFile {
            path: path.into(),
            reason,
            source: Some(cause.into()),
        }
    }

    /// Returns the parse failure reason, if this is a parse error.
    pub fn parse_failure(&self) -> Option<ParseFailure> {
        match self {
            Self::CannotParseEnvFile { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Why a `.env` file could not be turned into a [`ParsedEnvironment`](crate::ParsedEnvironment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseFailure {
    /// No `.env` file in the root directory.
    NotFound,
    /// The file exists but cannot be opened for reading.
    PermissionDenied,
    /// Reading failed after the file was found readable.
    Read,
    /// Anything else, with the original cause attached.
    Unexpected,
}

impl Display for ParseFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "insufficient permissions"),
            Self::Read => write!(f, "read error"),
            Self::Unexpected => write!(f, "unexpected failure"),
        }
    }
}
