//! The build pipeline.
//!
//! A run walks [`Stage::ORDER`] and stops at the first failing stage. Nothing is
//! rolled back: created directories, partial clones, build outputs, and the
//! lock file stay on disk for inspection.

mod types;

use std::path::Path;
use std::time::Instant;

use tracing::{error, info};

use crate::builder::run_build;
use crate::collect::{Artifact, collect_artifacts};
use crate::error::BuildError;
use crate::fetch::fetch_repository;
use crate::lock::BuildLock;
use crate::options::PipelineOptions;
use crate::url::normalize_clone_url;
use crate::workspace::layout::validate_revision;
use crate::workspace::{ProjectIdentity, WorkspaceLayout, prepare};

pub use types::{BuildReport, PipelineError, PipelineState, Stage};

pub struct Pipeline {
  identity: ProjectIdentity,
  layout: WorkspaceLayout,
  options: PipelineOptions,
  state: PipelineState,

  // Filled in as stages complete.
  clone_url: String,
  lock: Option<BuildLock>,
  commit: String,
  artifacts: Vec<Artifact>,
}

impl Pipeline {
  pub fn new(identity: ProjectIdentity, layout: WorkspaceLayout, options: PipelineOptions) -> Self {
    Self {
      identity,
      layout,
      options,
      state: PipelineState::Idle,
      clone_url: String::new(),
      lock: None,
      commit: String::new(),
      artifacts: Vec::new(),
    }
  }

  /// Pipeline rooted at `base_dir`, with build and output roots relative to it.
  pub fn in_dir(
    base_dir: &Path,
    identity: ProjectIdentity,
    build_root: &str,
    output_root: &str,
    options: PipelineOptions,
  ) -> Self {
    let layout = WorkspaceLayout::new(base_dir, &identity, build_root, output_root);
    Self::new(identity, layout, options)
  }

  pub fn layout(&self) -> &WorkspaceLayout {
    &self.layout
  }

  pub fn state(&self) -> &PipelineState {
    &self.state
  }

  /// Run every stage in order.
  ///
  /// `on_stage` is called as each stage starts. Each call is a fresh
  /// invocation; state left by an earlier call is discarded.
  pub async fn run<F>(&mut self, mut on_stage: F) -> Result<BuildReport, PipelineError>
  where
    F: FnMut(Stage),
  {
    let start = Instant::now();
    self.reset();

    for stage in Stage::ORDER {
      self.state = PipelineState::Running(stage);
      on_stage(stage);
      info!(
        stage = %stage,
        project = %self.identity.name,
        revision = %self.identity.revision,
        "stage started"
      );

      if let Err(source) = self.run_stage(stage).await {
        error!(stage = %stage, error = %source, "stage failed");
        self.state = PipelineState::Failed {
          stage,
          error: source.to_string(),
        };
        return Err(PipelineError { stage, source });
      }
    }

    self.state = PipelineState::Done;
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(duration_ms, artifacts = self.artifacts.len(), "pipeline complete");

    Ok(BuildReport {
      project: self.identity.name.clone(),
      revision: self.identity.revision.clone(),
      clone_url: self.clone_url.clone(),
      commit: self.commit.clone(),
      clone_dir: self.layout.clone_dir.clone(),
      output_dir: self.layout.project_output_dir.clone(),
      artifacts: std::mem::take(&mut self.artifacts),
      duration_ms,
    })
  }

  fn reset(&mut self) {
    self.state = PipelineState::Idle;
    self.clone_url.clear();
    self.lock = None;
    self.commit.clear();
    self.artifacts.clear();
  }

  async fn run_stage(&mut self, stage: Stage) -> Result<(), BuildError> {
    match stage {
      Stage::Preparing => {
        validate_revision(&self.identity.revision)?;
        self.clone_url = normalize_clone_url(&self.identity.source_url)?;
        self.lock = Some(prepare(&self.layout)?);
      }
      Stage::Fetching => {
        self.commit = fetch_repository(
          &self.options.git_program,
          &self.clone_url,
          &self.layout.clone_dir,
          &self.identity.revision,
          &self.options.env,
        )
        .await?;
      }
      Stage::Building => {
        run_build(&self.options.build_program, &self.layout.clone_dir, &self.options.env).await?;
      }
      Stage::Collecting => {
        self.artifacts = collect_artifacts(
          &self.layout.clone_dir,
          &self.layout.project_output_dir,
          &self.options.artifact_extension,
        )?;
      }
      Stage::Releasing => {
        // Preparing always leaves the lock in place for a run that got this far.
        if let Some(lock) = self.lock.take() {
          lock.release()?;
        }
      }
    }
    Ok(())
  }
}

/// Build `project` at `revision` with roots relative to the current directory.
pub async fn build_document<F>(
  identity: ProjectIdentity,
  build_root: &str,
  output_root: &str,
  options: PipelineOptions,
  on_stage: F,
) -> Result<BuildReport, PipelineError>
where
  F: FnMut(Stage),
{
  let base_dir = std::env::current_dir().map_err(|e| PipelineError {
    stage: Stage::Preparing,
    source: BuildError::io(".", e),
  })?;

  Pipeline::in_dir(&base_dir, identity, build_root, output_root, options)
    .run(on_stage)
    .await
}
