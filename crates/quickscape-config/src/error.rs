//! Errors raised while reading or writing `config.ron`.

use std::path::{Path, PathBuf};

/// A config file could not be read, written, or understood.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    ReadError {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config directory or file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    WriteError {
        /// Directory or file that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("{}:{source}", path.display())]
    ParseError {
        /// File holding the bad RON.
        path: PathBuf,
        /// Position and cause inside the file.
        #[source]
        source: ron::error::SpannedError,
    },

    /// The in-memory config could not be turned into RON.
    #[error("cannot serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}

impl ConfigError {
    /// File or directory the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::ReadError { path, .. }
            | Self::WriteError { path, .. }
            | Self::ParseError { path, .. } => Some(path),
            Self::SerializeError(_) => None,
        }
    }

    pub(crate) fn read(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::ReadError {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::WriteError {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path) -> impl FnOnce(ron::error::SpannedError) -> Self + '_ {
        move |source| Self::ParseError {
            path: path.to_path_buf(),
            source,
        }
    }
}
