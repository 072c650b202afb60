use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use log::{debug, info};

use crate::utils::command::LaunchPlan;
use crate::utils::error_messages::LaunchError;
use crate::utils::interrupt;
use crate::utils::which::{has_separator, which};

/// Run the planned child to completion with inherited stdio.
///
/// The working directory is handed to the spawn call; the launcher's own
/// working directory is left untouched. SIGINT is shielded for the duration
/// of the wait so an interrupt stops the child but not the launcher.
pub fn run_child_process(plan: &LaunchPlan) -> Result<ExitStatus, LaunchError> {
  let anchored = anchor_to_cwd(&plan.program, &plan.cwd);
  let resolved = which(&anchored).ok_or_else(|| LaunchError::ToolNotFound {
    program: plan.program.clone(),
  })?;
  let program = std::path::absolute(&resolved).unwrap_or(resolved);
  debug!(
    "spawning {} {:?} in {}",
    program.display(),
    plan.args,
    plan.cwd.display()
  );

  let _shield = interrupt::shield();
  let mut child = Command::new(&program)
    .args(&plan.args)
    .current_dir(&plan.cwd)
    .stdin(Stdio::inherit())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .spawn()
    .map_err(|source| spawn_error(plan, source))?;

  let status = child.wait().map_err(|source| LaunchError::Wait {
    program: plan.program.clone(),
    source,
  })?;
  info!("{} exited with {status}", plan.program);
  Ok(status)
}

/// Relative program paths like `.venv/bin/streamlit` resolve from the child's
/// working directory, not the launcher's. Bare names are left for PATH lookup.
fn anchor_to_cwd(program: &str, cwd: &Path) -> String {
  let path = Path::new(program);
  if has_separator(program) && path.is_relative() {
    return cwd.join(path).display().to_string();
  }
  program.to_string()
}

fn spawn_error(plan: &LaunchPlan, source: io::Error) -> LaunchError {
  if source.kind() == io::ErrorKind::NotFound && plan.cwd.is_dir() {
    return LaunchError::ToolNotFound {
      program: plan.program.clone(),
    };
  }
  LaunchError::Spawn {
    program: plan.program.clone(),
    cwd: plan.cwd.clone(),
    source,
  }
}
