//! External command execution.
//!
//! Every command runs with an explicit working directory. The process-wide
//! current directory is never changed, so a failed step leaves it untouched.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::BuildError;

/// Run `program` with `args` inside `cwd` and wait for it to finish.
///
/// `step` names the pipeline step for error reporting (e.g. `"clone"`).
/// The inherited environment is kept and `env` is merged on top.
///
/// # Returns
///
/// The trimmed stdout of the command on success.
pub async fn run_command<I, S>(
  step: &str,
  program: &str,
  args: I,
  cwd: &Path,
  env: &BTreeMap<String, String>,
) -> Result<String, BuildError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let args: Vec<S> = args.into_iter().collect();
  info!(step, program, cwd = %cwd.display(), "running command");

  let mut command = Command::new(program);
  command.args(&args).current_dir(cwd).envs(env).kill_on_drop(true);

  debug!(
    args = ?args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()).collect::<Vec<_>>(),
    "spawning process"
  );

  let output = command.output().await.map_err(|err| {
    warn!(step, program, error = %err, "failed to spawn command");
    BuildError::CommandFailed {
      step: step.to_string(),
      program: program.to_string(),
      code: None,
    }
  })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }
    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command stdout");
    }

    return Err(BuildError::CommandFailed {
      step: step.to_string(),
      program: program.to_string(),
      code: output.status.code(),
    });
  }

  let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

  if !stdout.is_empty() {
    debug!(stdout = %stdout, "command output");
  }

  Ok(stdout)
}
