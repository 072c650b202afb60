use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::config::{DashboardConfig, LaunchPaths};

/// Placeholder replaced with the absolute repository root in argv tokens.
pub const ROOT_PLACEHOLDER: &str = "<root>";

/// The single child invocation the launcher performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl LaunchPlan {
  /// Construct from argv-like vector: first element is the program, rest are args.
  pub fn new(argv: &[String], cwd: impl Into<PathBuf>) -> Result<Self> {
    let Some((program, args)) = argv.split_first() else {
      bail!("dashboard command is empty");
    };
    if program.trim().is_empty() {
      bail!("dashboard command program is empty");
    }
    Ok(Self {
      program: program.clone(),
      args: args.to_vec(),
      cwd: cwd.into(),
    })
  }

  /// Build `<cmd...> <script>` to run from the repository root.
  pub fn for_dashboard(cfg: &DashboardConfig, paths: &LaunchPaths) -> Result<Self> {
    let script = match cfg.script.as_deref().map(str::trim) {
      Some(script) if !script.is_empty() => script.to_string(),
      _ => bail!("dashboard.script is not defined or empty"),
    };
    let mut argv = cfg.cmd.argv()?;
    if argv.is_empty() {
      bail!("dashboard.cmd is not defined or empty");
    }
    argv.push(script);
    let argv = expand_root(&argv, paths.repo_root());
    Self::new(&argv, paths.repo_root())
  }

  /// Render the invocation for display, quoting tokens where needed.
  #[must_use]
  pub fn display_command(&self) -> String {
    shell_words::join(std::iter::once(&self.program).chain(self.args.iter()))
  }
}

/// Replace `<root>` in every token with `root`.
#[must_use]
pub fn expand_root(argv: &[String], root: &Path) -> Vec<String> {
  let root = root.display().to_string();
  argv
    .iter()
    .map(|raw| raw.replace(ROOT_PLACEHOLDER, &root))
    .collect()
}
