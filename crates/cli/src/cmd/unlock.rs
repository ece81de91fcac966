use anyhow::{Context, Result};
use tracing::debug;

use docbuild_lib::lock::release_lock;
use docbuild_lib::{ProjectIdentity, WorkspaceLayout};

use crate::output::print_success;

/// Remove the lock file for `project` at `revision`.
///
/// Fails when no lock exists, so a typo in the revision is not silently accepted.
pub fn cmd_unlock(project: &str, revision: &str, build_root: &str) -> Result<()> {
  let base_dir = std::env::current_dir().context("Failed to read current directory")?;
  let identity = ProjectIdentity::new(project, "", revision);
  // The output root does not matter for locating the lock.
  let layout = WorkspaceLayout::new(&base_dir, &identity, build_root, build_root);

  debug!(path = %layout.lock_path.display(), "removing lock");
  release_lock(&layout.lock_path).context("Unlock failed")?;

  print_success(&format!("Removed lock {}", layout.lock_path.display()));
  Ok(())
}
