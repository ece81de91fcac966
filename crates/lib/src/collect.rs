//! Artifact collection.
//!
//! The destination directory is emptied, then every regular file directly in
//! the source directory whose name ends in `.<extension>` is copied over.
//! Nothing in the source directory is modified.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::BuildError;

/// A file published to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
  pub name: String,
  pub path: PathBuf,
  pub size_bytes: u64,
}

/// Remove every entry of `dir`, stopping at the first failure.
pub fn clear_dir(dir: &Path) -> Result<(), BuildError> {
  let entries = fs::read_dir(dir).map_err(|e| BuildError::io(dir, e))?;

  for entry in entries {
    let entry = entry.map_err(|e| BuildError::io(dir, e))?;
    let path = entry.path();
    let file_type = entry.file_type().map_err(|e| BuildError::io(&path, e))?;

    let removed = if file_type.is_dir() {
      fs::remove_dir_all(&path)
    } else {
      fs::remove_file(&path)
    };
    removed.map_err(|e| BuildError::io(&path, e))?;
    debug!(path = %path.display(), "removed stale output");
  }

  Ok(())
}

/// Replace the contents of `dest_dir` with the artifacts found in `source_dir`.
///
/// Returns the collected artifacts sorted by name. The first copy error aborts
/// the collection; files copied before it stay in `dest_dir`.
pub fn collect_artifacts(source_dir: &Path, dest_dir: &Path, extension: &str) -> Result<Vec<Artifact>, BuildError> {
  clear_dir(dest_dir)?;

  let suffix = format!(".{extension}");
  let mut artifacts = Vec::new();

  let walker = WalkDir::new(source_dir)
    .min_depth(1)
    .max_depth(1)
    .sort_by_file_name()
    .into_iter();

  for entry in walker {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(source_dir).to_path_buf();
      BuildError::io(path, e.into())
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let name = entry.file_name().to_string_lossy().into_owned();
    if !name.ends_with(&suffix) {
      continue;
    }

    let dest = dest_dir.join(entry.file_name());
    let size_bytes = fs::copy(entry.path(), &dest).map_err(|e| BuildError::io(entry.path(), e))?;
    debug!(from = %entry.path().display(), to = %dest.display(), size_bytes, "copied artifact");

    artifacts.push(Artifact {
      name,
      path: dest,
      size_bytes,
    });
  }

  info!(count = artifacts.len(), dest = %dest_dir.display(), "artifacts collected");
  Ok(artifacts)
}
