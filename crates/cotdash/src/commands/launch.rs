use anyhow::Result;
use log::debug;

use crate::config::AppContext;
use crate::texts::banner::banner_lines;
use crate::utils::child::run_child_process;
use crate::utils::command::LaunchPlan;
use crate::utils::pause::pause_for_user;
use crate::{log_command, log_error, log_info, log_warn};

/// Start the dashboard from the repository root and wait for it to exit.
///
/// Returns the process exit code: 0 once the dashboard was started (its own
/// status is not forwarded), otherwise the code of the launch failure.
pub fn run(ctx: &AppContext) -> Result<i32> {
  let plan = LaunchPlan::for_dashboard(&ctx.config.dashboard, &ctx.paths)?;
  debug!("launch plan: {plan:?}");

  for line in banner_lines(&ctx.paths.repo_root().display().to_string()) {
    log_info!("{}", line);
  }
  log_command!("{}", plan.display_command());

  let code = match run_child_process(&plan) {
    Ok(_) => 0,
    Err(err) => {
      log_error!("{}", err);
      err.exit_code()
    }
  };

  if ctx.config.launcher.pause
    && let Err(err) = pause_for_user()
  {
    log_warn!("{:#}", err);
  }
  Ok(code)
}
