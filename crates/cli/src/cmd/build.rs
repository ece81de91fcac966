//! Implementation of the `docbuild build` command.
//!
//! Runs the full pipeline in the current directory: prepare, fetch, build,
//! collect, release.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use docbuild_lib::consts::DEFAULT_ARTIFACT_EXTENSION;
use docbuild_lib::{PipelineOptions, ProjectIdentity, build_document};

use crate::output::{
  OutputFormat, format_elapsed, print_artifact, print_json, print_stage, print_stat, print_success, short_commit,
};

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Project name, used for the build and output subdirectories
  pub project: String,

  /// Repository URL (https:// or git)
  pub url: String,

  /// Revision to check out (commit hash, tag, or a branch name without '/')
  pub revision: String,

  /// Build root, relative to the current directory
  #[arg(long, default_value = "build")]
  pub build_root: String,

  /// Output root, relative to the current directory
  #[arg(long, default_value = "out")]
  pub out_root: String,

  /// Extension of the artifact files to publish
  #[arg(long, default_value = DEFAULT_ARTIFACT_EXTENSION)]
  pub ext: String,
}

pub fn cmd_build(args: BuildArgs, output: OutputFormat) -> Result<()> {
  let options = PipelineOptions::from_env().with_artifact_extension(&args.ext);
  let identity = ProjectIdentity::new(args.project, args.url, args.revision);
  let quiet = output.is_json();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt
    .block_on(build_document(identity, &args.build_root, &args.out_root, options, |stage| {
      if !quiet {
        print_stage(stage.description());
      }
    }))
    .context("Build failed")?;

  if output.is_json() {
    print_json(&report)?;
    return Ok(());
  }

  println!();
  print_success("Build complete!");
  print_stat("Clone URL", &report.clone_url);
  print_stat("Commit", short_commit(&report.commit));
  print_stat("Output", &report.output_dir.display().to_string());
  print_stat("Artifacts", &report.artifacts.len().to_string());
  for artifact in &report.artifacts {
    print_artifact(&artifact.name, artifact.size_bytes);
  }
  print_stat("Duration", &format_elapsed(Duration::from_millis(report.duration_ms)));

  Ok(())
}
