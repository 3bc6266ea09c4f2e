use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// Where a store keeps its data.
///
/// Currently only directories on the local filesystem are supported.
// FUTURE maybe this should be a url?
#[derive(
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash
)]
pub enum Source {
    Directory(PathBuf),
}

impl FromStr for Source {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SourceError::Empty);
        }
        Ok(Source::Directory(PathBuf::from(s)))
    }
}

impl Source {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Source::Directory(path.into())
    }

    /// Checks the directory exists and can be written to.
    ///
    /// Writability is tested by creating, then removing, a temporary file in the directory, so ownership, ACLs and
    /// read-only mounts are all taken into account.
    pub fn try_existing_writable(path: PathBuf) -> Result<Source, SourceError> {
        if !path.exists() {
            return Err(SourceError::PathDoesNotExist(path));
        }
        if !path.is_dir() {
            return Err(SourceError::PathIsNotADirectory(path));
        }
        if tempfile::Builder::new()
            .prefix(".write-check")
            .tempfile_in(&path)
            .is_err()
        {
            return Err(SourceError::PathIsNotWritable(path));
        }
        Ok(Source::Directory(path))
    }

    pub fn path(&self) -> &Path {
        match self {
            Source::Directory(path) => path.as_path(),
        }
    }

    pub fn join(&self, file_name: &str) -> PathBuf {
        self.path().join(file_name)
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Directory(path) => f.write_str(path.display().to_string().as_str()),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Path does not exist. path: {0}")]
    PathDoesNotExist(PathBuf),
    #[error("Path is not a directory. path: {0}")]
    PathIsNotADirectory(PathBuf),
    #[error("Path is not writable. path: {0}")]
    PathIsNotWritable(PathBuf),
    #[error("Empty source.")]
    Empty,
}
