//! Workspace preparation.
//!
//! Creates the project build and output directories, then takes the
//! per-revision lock. Directories created before a lock conflict are left in
//! place.

pub mod layout;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::BuildError;
use crate::lock::BuildLock;

pub use layout::{ProjectIdentity, WorkspaceLayout};

/// Create the build and output directories and acquire the lock.
///
/// # Errors
///
/// - `DirectoryCreationFailed` if either directory cannot be created
/// - `AlreadyLocked` if the lock file for this revision already exists
pub fn prepare(layout: &WorkspaceLayout) -> Result<BuildLock, BuildError> {
  create_dir(&layout.project_build_dir)?;
  create_dir(&layout.project_output_dir)?;

  BuildLock::acquire(&layout.lock_path)
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
  let mut builder = fs::DirBuilder::new();
  builder.recursive(true);

  #[cfg(unix)]
  {
    use std::os::unix::fs::DirBuilderExt;
    builder.mode(0o700);
  }

  builder.create(path).map_err(|source| BuildError::DirectoryCreationFailed {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), "directory ready");
  Ok(())
}
