use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::LOCK_FILE_PREFIX;
use crate::error::BuildError;

/// What to build: a named project at a fixed revision of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectIdentity {
  pub name: String,
  pub source_url: String,
  pub revision: String,
}

impl ProjectIdentity {
  pub fn new(name: impl Into<String>, source_url: impl Into<String>, revision: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      source_url: source_url.into(),
      revision: revision.into(),
    }
  }
}

/// Check that `revision` can name the clone directory and lock file.
///
/// The revision becomes a single path component and a positional git argument,
/// so separators, `.`/`..`, and a leading `-` are rejected. Branch names that
/// contain `/` cannot be built directly; use their commit id instead.
pub fn validate_revision(revision: &str) -> Result<(), BuildError> {
  let reason = if revision.is_empty() {
    Some("must not be empty")
  } else if revision.contains(['/', '\\']) {
    Some("must not contain a path separator")
  } else if revision == "." || revision == ".." {
    Some("must not be a relative directory name")
  } else if revision.starts_with('-') {
    Some("must not start with '-'")
  } else {
    None
  };

  match reason {
    Some(reason) => Err(BuildError::InvalidRevision {
      revision: revision.to_string(),
      reason,
    }),
    None => Ok(()),
  }
}

/// Paths derived once per run.
///
/// ```text
/// <build-root>/<project>/<revision>/   # clone_dir
/// <build-root>/<project>/.<revision>   # lock_path
/// <output-root>/<project>/             # project_output_dir
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceLayout {
  pub build_root: PathBuf,
  pub output_root: PathBuf,
  pub project_build_dir: PathBuf,
  pub project_output_dir: PathBuf,
  pub clone_dir: PathBuf,
  pub lock_path: PathBuf,
}

impl WorkspaceLayout {
  /// `build_root` and `output_root` are resolved against `base_dir` unless absolute.
  pub fn new(base_dir: &Path, identity: &ProjectIdentity, build_root: &str, output_root: &str) -> Self {
    let build_root = base_dir.join(build_root);
    let output_root = base_dir.join(output_root);
    let project_build_dir = build_root.join(&identity.name);
    let project_output_dir = output_root.join(&identity.name);
    let clone_dir = project_build_dir.join(&identity.revision);
    let lock_path = project_build_dir.join(format!("{LOCK_FILE_PREFIX}{}", identity.revision));

    Self {
      build_root,
      output_root,
      project_build_dir,
      project_output_dir,
      clone_dir,
      lock_path,
    }
  }
}
