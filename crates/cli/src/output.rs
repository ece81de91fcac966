//! CLI output formatting utilities.
//!
//! Colored status lines, human-readable sizes and durations, and JSON output.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const STAGE: &str = "::";
  pub const ARROW: &str = "→";
}

/// First 12 characters of a commit id.
pub fn short_commit(commit: &str) -> &str {
  commit.get(..12).unwrap_or(commit)
}

pub fn format_size(bytes: u64) -> String {
  const UNITS: [&str; 3] = ["KB", "MB", "GB"];

  if bytes < 1024 {
    return format!("{bytes} B");
  }

  let mut value = bytes as f64 / 1024.0;
  let mut unit = UNITS[0];
  for next in UNITS.iter().skip(1) {
    if value < 1024.0 {
      break;
    }
    value /= 1024.0;
    unit = *next;
  }
  format!("{value:.1} {unit}")
}

pub fn format_elapsed(elapsed: Duration) -> String {
  match elapsed.as_secs() {
    0 => format!("{}ms", elapsed.subsec_millis()),
    1..=59 => format!("{:.2}s", elapsed.as_secs_f64()),
    secs => format!("{}m {}s", secs / 60, secs % 60),
  }
}

/// Progress line for a pipeline stage.
pub fn print_stage(message: &str) {
  println!(
    "{} {}",
    symbols::STAGE.if_supports_color(Stream::Stdout, |s| s.cyan()),
    message
  );
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_artifact(name: &str, size_bytes: u64) {
  println!(
    "    {} {} {}",
    symbols::ARROW,
    name,
    format!("({})", format_size(size_bytes)).if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
