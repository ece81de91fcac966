//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Base URL the test git config rewrites to the local `remote/` directory.
pub const FAKE_REMOTE: &str = "https://example.com/org/";

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Whether a `git` binary is on PATH. Git-backed tests return early without it.
pub fn git_available() -> bool {
  std::process::Command::new("git")
    .arg("--version")
    .output()
    .map(|o| o.status.success())
    .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
  let output = std::process::Command::new("git")
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

/// Isolated test environment.
///
/// Each test gets its own working directory, a `remote/` directory holding
/// source repositories, and a copy of the fake build tool.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("work")).unwrap();
    std::fs::create_dir_all(temp.path().join("remote")).unwrap();
    Self { temp }
  }

  /// Directory the binary runs in; build and output roots resolve against it.
  pub fn work_path(&self) -> PathBuf {
    let p = self.temp.path().join("work");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn remote_path(&self) -> PathBuf {
    let p = self.temp.path().join("remote");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Copy a fixture script into the temp dir and make it executable.
  #[cfg(unix)]
  pub fn install_tool(&self, fixture: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let dest = self.temp.path().join(fixture);
    std::fs::copy(fixture_path(fixture), &dest).unwrap();
    std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o755)).unwrap();
    dest
  }

  /// Create `remote/<name>.git` with one commit of `paper.tex`; returns the commit id.
  pub fn source_repo(&self, name: &str, content: &str) -> String {
    let path = self.remote_path().join(format!("{name}.git"));
    std::fs::create_dir_all(&path).unwrap();
    git(&path, &["init", "-q"]);
    self.commit(name, content)
  }

  /// Commit new `paper.tex` content to an existing source repository.
  pub fn commit(&self, name: &str, content: &str) -> String {
    let path = self.remote_path().join(format!("{name}.git"));
    std::fs::write(path.join("paper.tex"), content).unwrap();
    git(&path, &["add", "paper.tex"]);
    git(&path, &["commit", "-q", "-m", content]);
    git(&path, &["rev-parse", "HEAD"])
  }

  pub fn lock_path(&self, project: &str, revision: &str) -> PathBuf {
    self.work_path().join("build").join(project).join(format!(".{revision}"))
  }

  pub fn output_dir(&self, project: &str) -> PathBuf {
    self.work_path().join("out").join(project)
  }

  /// Get a pre-configured Command for the docbuild binary.
  ///
  /// - runs in `work/`
  /// - rewrites `FAKE_REMOTE` URLs to `remote/` through git's env config
  /// - uses `build_tool` as the build program
  pub fn docbuild_cmd(&self, build_tool: &Path) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("docbuild");
    cmd.current_dir(self.work_path());
    cmd.env("DOCBUILD_BUILD_PROGRAM", build_tool);
    cmd.env("GIT_CONFIG_COUNT", "1");
    cmd.env(
      "GIT_CONFIG_KEY_0",
      format!("url.file://{}/.insteadOf", self.remote_path().display()),
    );
    cmd.env("GIT_CONFIG_VALUE_0", FAKE_REMOTE);
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
