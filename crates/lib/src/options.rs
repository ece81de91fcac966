use std::collections::BTreeMap;

use crate::consts::{
  BUILD_PROGRAM_ENV, DEFAULT_ARTIFACT_EXTENSION, DEFAULT_BUILD_PROGRAM, DEFAULT_GIT_PROGRAM, GIT_PROGRAM_ENV,
};

/// Knobs for the external collaborators of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
  /// Version-control client used for clone, submodules, and checkout.
  pub git_program: String,
  /// Build tool, invoked with no arguments inside the clone.
  pub build_program: String,
  /// Artifact extension without the leading dot.
  pub artifact_extension: String,
  /// Extra environment merged into every subprocess.
  pub env: BTreeMap<String, String>,
}

impl Default for PipelineOptions {
  fn default() -> Self {
    Self {
      git_program: DEFAULT_GIT_PROGRAM.to_string(),
      build_program: DEFAULT_BUILD_PROGRAM.to_string(),
      artifact_extension: DEFAULT_ARTIFACT_EXTENSION.to_string(),
      env: BTreeMap::new(),
    }
  }
}

impl PipelineOptions {
  /// Defaults, with the programs overridable through `DOCBUILD_GIT` and
  /// `DOCBUILD_BUILD_PROGRAM`.
  pub fn from_env() -> Self {
    let mut options = Self::default();

    if let Ok(program) = std::env::var(GIT_PROGRAM_ENV)
      && !program.is_empty()
    {
      options.git_program = program;
    }

    if let Ok(program) = std::env::var(BUILD_PROGRAM_ENV)
      && !program.is_empty()
    {
      options.build_program = program;
    }

    options
  }

  pub fn with_artifact_extension(mut self, extension: &str) -> Self {
    self.artifact_extension = extension.trim_start_matches('.').to_string();
    self
  }
}
