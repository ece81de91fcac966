//! Per-revision build lock.
//!
//! The lock is a zero-byte marker file created with exclusive-create semantics.
//! It is advisory: a crashed or failed run leaves it behind, and the operator
//! removes it before retrying. Dropping a [`BuildLock`] does not remove the file.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BuildError;

#[derive(Debug)]
pub struct BuildLock {
  lock_path: PathBuf,
}

impl BuildLock {
  /// Create the lock file, failing with `AlreadyLocked` if it exists.
  pub fn acquire(lock_path: &Path) -> Result<Self, BuildError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
      use std::os::unix::fs::OpenOptionsExt;
      options.mode(0o600);
    }

    match options.open(lock_path) {
      Ok(_) => {
        debug!(path = %lock_path.display(), "lock acquired");
        Ok(BuildLock {
          lock_path: lock_path.to_path_buf(),
        })
      }
      Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Err(BuildError::AlreadyLocked {
        lock_path: lock_path.to_path_buf(),
      }),
      Err(err) => Err(BuildError::io(lock_path, err)),
    }
  }

  pub fn lock_path(&self) -> &Path {
    &self.lock_path
  }

  /// Remove the lock file.
  pub fn release(self) -> Result<(), BuildError> {
    release_lock(&self.lock_path)
  }
}

/// Remove a lock file by path. A missing lock is an error, not a no-op.
pub fn release_lock(lock_path: &Path) -> Result<(), BuildError> {
  std::fs::remove_file(lock_path).map_err(|source| BuildError::LockReleaseFailed {
    lock_path: lock_path.to_path_buf(),
    source,
  })?;
  debug!(path = %lock_path.display(), "lock released");
  Ok(())
}
