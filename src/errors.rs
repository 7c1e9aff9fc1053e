//! Error taxonomy for repository operations
//!
//! Every failure the core can report maps to exactly one variant here, each with
//! a stable message. `FileNotInRepository` is the only per-file error: staging
//! collects it in its report instead of aborting the batch.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not a vcs repository (or .vcs/objects is missing): {0}")]
    RepositoryNotInitialized(PathBuf),

    #[error("file {0} does not exist in the repository")]
    FileNotInRepository(String),

    #[error("corrupt index at line {line}: {reason}")]
    CorruptIndex { line: usize, reason: String },

    #[error("nothing to commit, stage files before committing")]
    NothingToCommit,

    #[error("aborting commit due to empty commit message")]
    EmptyCommitMessage,

    #[error("commit {0} already exists")]
    CommitAlreadyExists(ObjectId),

    #[error("object {0} not found")]
    NotFound(ObjectId),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("invalid ignore pattern {pattern:?}: {source}")]
    Ignore {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

impl RepositoryError {
    pub(crate) fn corrupt_index(line: usize, reason: impl Into<String>) -> Self {
        RepositoryError::CorruptIndex {
            line,
            reason: reason.into(),
        }
    }
}

/// Attach the offending path to a raw `std::io::Error`
pub(crate) trait IoResultExt<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| RepositoryError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

impl From<walkdir::Error> for RepositoryError {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(Path::to_path_buf).unwrap_or_default();
        let source = error
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));

        RepositoryError::Io { path, source }
    }
}
