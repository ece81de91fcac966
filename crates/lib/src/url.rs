//! Clone URL normalization.

use crate::consts::{ACCEPTED_URL_PREFIXES, VCS_SUFFIX};
use crate::error::BuildError;

/// Turn a repository reference into a URL `git clone` accepts.
///
/// Only `https://` URLs and git-scheme references (`git://...`, `git@host:...`)
/// are accepted. A missing `.git` suffix is appended once; URLs that already
/// carry it are returned unchanged.
pub fn normalize_clone_url(repo_url: &str) -> Result<String, BuildError> {
  if !ACCEPTED_URL_PREFIXES.iter().any(|prefix| repo_url.starts_with(prefix)) {
    return Err(BuildError::InvalidRepository {
      url: repo_url.to_string(),
    });
  }

  if repo_url.ends_with(VCS_SUFFIX) {
    Ok(repo_url.to_string())
  } else {
    Ok(format!("{repo_url}{VCS_SUFFIX}"))
  }
}
