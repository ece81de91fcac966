mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{BuildArgs, cmd_build, cmd_unlock};
use crate::output::OutputFormat;

/// docbuild - build a document repository at a fixed revision
#[derive(Parser)]
#[command(name = "docbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Clone, build, and publish a project at a revision
  Build {
    #[command(flatten)]
    args: BuildArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Remove a stale lock left by a failed or crashed build
  Unlock {
    /// Project name
    project: String,

    /// Revision whose lock should be removed
    revision: String,

    /// Build root, relative to the current directory
    #[arg(long, default_value = "build")]
    build_root: String,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Build { args, output } => cmd_build(args, output),
    Commands::Unlock {
      project,
      revision,
      build_root,
    } => cmd_unlock(&project, &revision, &build_root),
  }
}
