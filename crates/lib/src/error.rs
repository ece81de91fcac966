//! Error taxonomy shared by every pipeline stage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing, fetching, building, collecting, or
/// releasing a build.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The repository reference is neither `https://` nor a git-scheme URL.
  #[error("invalid repository: {url}")]
  InvalidRepository { url: String },

  /// The revision cannot be used as a single path component or git argument.
  #[error("invalid revision {revision:?}: {reason}")]
  InvalidRevision { revision: String, reason: &'static str },

  #[error("failed to create directory {}: {source}", path.display())]
  DirectoryCreationFailed {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Another build holds the lock, or a previous run left it behind.
  #[error(
    "build is already locked: {}\n\
     If you're sure no docbuild process is running, remove the lock file.",
    lock_path.display()
  )]
  AlreadyLocked { lock_path: PathBuf },

  /// An external tool exited non-zero or could not be spawned.
  #[error("{step} failed ({})", exit_summary(program, *code))]
  CommandFailed {
    step: String,
    program: String,
    code: Option<i32>,
  },

  #[error("file operation failed on {}: {source}", path.display())]
  FileIOFailed {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to release lock {}: {source}", lock_path.display())]
  LockReleaseFailed {
    lock_path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The checked-out tree has no resolvable HEAD.
  #[error("failed to resolve HEAD in {}: {message}", path.display())]
  ResolveRevision { path: PathBuf, message: String },
}

impl BuildError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    BuildError::FileIOFailed {
      path: path.into(),
      source,
    }
  }
}

fn exit_summary(program: &str, code: Option<i32>) -> String {
  match code {
    Some(code) => format!("{program} exited with code {code}"),
    None => format!("{program} could not be started or was killed by a signal"),
  }
}
