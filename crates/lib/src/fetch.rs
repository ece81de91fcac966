//! Repository fetch.
//!
//! This module handles:
//! - Removing a previous clone of the same revision
//! - Cloning with the external git client
//! - Initializing and updating submodules
//! - Checking out the requested revision
//!
//! Every git invocation gets its working directory explicitly, so the caller's
//! current directory is the same after a failure as before the call.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::BuildError;
use crate::process::run_command;

/// Clone `clone_url` into `clone_dir` and check out `revision`.
///
/// An existing `clone_dir` is removed first, so re-fetching the same revision
/// always starts from a fresh clone.
///
/// Submodules are initialized and updated right after the clone, before the
/// checkout. They are therefore pinned to the commits recorded on the default
/// branch, not to the ones recorded at `revision`.
///
/// # Returns
///
/// The full commit id of the checked-out HEAD.
pub async fn fetch_repository(
  git_program: &str,
  clone_url: &str,
  clone_dir: &Path,
  revision: &str,
  env: &BTreeMap<String, String>,
) -> Result<String, BuildError> {
  let (parent, dir_name) = split_clone_dir(clone_dir)?;

  if clone_dir.exists() {
    debug!(path = %clone_dir.display(), "removing previous clone");
    std::fs::remove_dir_all(clone_dir).map_err(|e| BuildError::io(clone_dir, e))?;
  }

  info!(url = clone_url, path = %clone_dir.display(), "cloning repository");
  run_command(
    "clone",
    git_program,
    [OsStr::new("clone"), OsStr::new("--"), OsStr::new(clone_url), dir_name],
    parent,
    env,
  )
  .await?;

  run_command("submodule init", git_program, ["submodule", "init"], clone_dir, env).await?;
  run_command("submodule update", git_program, ["submodule", "update"], clone_dir, env).await?;

  info!(revision, "checking out revision");
  run_command("checkout", git_program, ["checkout", "-q", revision], clone_dir, env).await?;

  let commit = resolve_head(clone_dir)?;
  debug!(revision, commit = %commit, "resolved revision");
  Ok(commit)
}

fn split_clone_dir(clone_dir: &Path) -> Result<(&Path, &OsStr), BuildError> {
  match (clone_dir.parent(), clone_dir.file_name()) {
    (Some(parent), Some(name)) if parent.as_os_str().is_empty() => Ok((Path::new("."), name)),
    (Some(parent), Some(name)) => Ok((parent, name)),
    _ => Err(BuildError::io(
      clone_dir,
      io::Error::new(io::ErrorKind::InvalidInput, "clone directory has no parent"),
    )),
  }
}

/// Resolve HEAD of the repository at `repo_path` to a commit id.
pub fn resolve_head(repo_path: &Path) -> Result<String, BuildError> {
  let repo = gix::open(repo_path).map_err(|e| BuildError::ResolveRevision {
    path: repo_path.to_path_buf(),
    message: e.to_string(),
  })?;

  let head = repo.head_id().map_err(|e| BuildError::ResolveRevision {
    path: repo_path.to_path_buf(),
    message: e.to_string(),
  })?;

  Ok(head.to_string())
}
