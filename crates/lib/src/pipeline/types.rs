//! Types for pipeline execution.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::collect::Artifact;
use crate::error::BuildError;

/// One step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
  Preparing,
  Fetching,
  Building,
  Collecting,
  Releasing,
}

impl Stage {
  pub const ORDER: [Stage; 5] = [
    Stage::Preparing,
    Stage::Fetching,
    Stage::Building,
    Stage::Collecting,
    Stage::Releasing,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Stage::Preparing => "preparing",
      Stage::Fetching => "fetching",
      Stage::Building => "building",
      Stage::Collecting => "collecting",
      Stage::Releasing => "releasing",
    }
  }

  /// Human-readable progress message shown when the stage starts.
  pub fn description(self) -> &'static str {
    match self {
      Stage::Preparing => "Preparing environment",
      Stage::Fetching => "Cloning repository",
      Stage::Building => "Building project",
      Stage::Collecting => "Copying artifacts",
      Stage::Releasing => "Releasing lock",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Where a pipeline run currently is.
///
/// `Idle → Running(Preparing) → … → Running(Releasing) → Done`; any stage can
/// move to `Failed`. There are no retries: a failed run is re-invoked from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
  Idle,
  Running(Stage),
  Done,
  Failed { stage: Stage, error: String },
}

/// The first error of a run, tagged with the stage that produced it.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
  pub stage: Stage,
  #[source]
  pub source: BuildError,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
  pub project: String,
  pub revision: String,
  pub clone_url: String,
  /// Full commit id of the checked-out HEAD.
  pub commit: String,
  pub clone_dir: PathBuf,
  pub output_dir: PathBuf,
  pub artifacts: Vec<Artifact>,
  pub duration_ms: u64,
}
