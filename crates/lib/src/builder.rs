//! Build tool invocation.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use crate::error::BuildError;
use crate::process::run_command;

/// Run the build tool with no arguments inside `project_dir`.
///
/// Artifacts are expected next to the sources. A failed build leaves whatever
/// it produced in place.
pub async fn run_build(
  build_program: &str,
  project_dir: &Path,
  env: &BTreeMap<String, String>,
) -> Result<(), BuildError> {
  info!(program = build_program, dir = %project_dir.display(), "building project");
  run_command("build", build_program, Vec::<&str>::new(), project_dir, env).await?;
  Ok(())
}
