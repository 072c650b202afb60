//! Common error messages used across the codebase.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Shell convention for "command not found".
pub const EXIT_COMMAND_NOT_FOUND: i32 = 127;
/// Shell convention for "found but not executable".
pub const EXIT_CANNOT_EXECUTE: i32 = 126;
pub const EXIT_FAILURE: i32 = 1;

pub(crate) const LAUNCHER_PATH_UNRESOLVED: &str = "failed to locate the launcher executable";

/// Failures while starting or waiting on the dashboard process.
#[derive(Debug, Error)]
pub enum LaunchError {
  #[error("{program}: command not found")]
  ToolNotFound { program: String },
  #[error("{program}: failed to start in {}: {source}", .cwd.display())]
  Spawn {
    program: String,
    cwd: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed while waiting for {program}: {source}")]
  Wait {
    program: String,
    #[source]
    source: io::Error,
  },
}

impl LaunchError {
  /// Process exit code the launcher reports for this failure.
  #[must_use]
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::ToolNotFound { .. } => EXIT_COMMAND_NOT_FOUND,
      Self::Spawn { .. } => EXIT_CANNOT_EXECUTE,
      Self::Wait { .. } => EXIT_FAILURE,
    }
  }
}
