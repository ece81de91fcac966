//! Test utilities for docbuild-lib.
//!
//! Helpers for tests that run shell commands or need a local git repository
//! reachable through an `https://` URL.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Base URL redirected to the local repositories root by [`SourceRepo::git_env`].
pub const FAKE_REMOTE: &str = "https://example.com/org/";

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

/// Whether a `git` binary is on PATH. Git-backed tests return early without it.
pub fn git_available() -> bool {
  Command::new("git")
    .arg("--version")
    .output()
    .map(|o| o.status.success())
    .unwrap_or(false)
}

/// Run git in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
  let output = Command::new("git")
    .args(["-c", "user.name=docbuild", "-c", "user.email=docbuild@example.com"])
    .args(args)
    .current_dir(dir)
    .output()
    .unwrap();
  assert!(
    output.status.success(),
    "git {:?} failed: {}",
    args,
    String::from_utf8_lossy(&output.stderr)
  );
  String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A local repository at `<root>/<name>.git` holding a `paper.tex`.
pub struct SourceRepo {
  pub root: PathBuf,
  pub path: PathBuf,
}

impl SourceRepo {
  pub fn init(root: &Path, name: &str) -> Self {
    let path = root.join(format!("{name}.git"));
    std::fs::create_dir_all(&path).unwrap();
    git(&path, &["init", "-q"]);
    Self {
      root: root.to_path_buf(),
      path,
    }
  }

  /// Commit `content` as `paper.tex` and return the commit id.
  pub fn commit(&self, content: &str) -> String {
    std::fs::write(self.path.join("paper.tex"), content).unwrap();
    git(&self.path, &["add", "paper.tex"]);
    git(&self.path, &["commit", "-q", "-m", content]);
    git(&self.path, &["rev-parse", "HEAD"])
  }

  /// Subprocess env that makes `FAKE_REMOTE<name>.git` resolve to the repositories under `root`.
  pub fn git_env(&self) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("GIT_CONFIG_COUNT".to_string(), "2".to_string());
    env.insert(
      "GIT_CONFIG_KEY_0".to_string(),
      format!("url.file://{}/.insteadOf", self.root.display()),
    );
    env.insert("GIT_CONFIG_VALUE_0".to_string(), FAKE_REMOTE.to_string());
    // Submodules pointing at local paths need the file transport.
    env.insert("GIT_CONFIG_KEY_1".to_string(), "protocol.file.allow".to_string());
    env.insert("GIT_CONFIG_VALUE_1".to_string(), "always".to_string());
    env
  }
}

/// Write an executable build script that turns `paper.tex` into `paper.pdf`
/// and leaves a `paper.log` next to it.
#[cfg(unix)]
pub fn fake_build_tool(dir: &Path) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let script = dir.join("fake-make.sh");
  std::fs::write(&script, "#!/bin/sh\nset -e\ncp paper.tex paper.pdf\necho built > paper.log\n").unwrap();
  std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
  script
}
