use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use owo_colors::OwoColorize as _;
use serde::Deserialize;
use toml::Value as TomlValue;

use crate::utils::error_messages::LAUNCHER_PATH_UNRESOLVED;

/// File name of both the global and the launcher-local config file.
pub const CONFIG_FILE_NAME: &str = "cotdash.toml";

/// Known top-level config keys.
const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["dashboard", "launcher"];

/// Known keys within `[dashboard]` section.
const KNOWN_DASHBOARD_KEYS: &[&str] = &["cmd", "script"];

/// Known keys within `[launcher]` section.
const KNOWN_LAUNCHER_KEYS: &[&str] = &["pause"];

// Embed repository defaults
const DEFAULT_TOML: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/cotdash.toml"));

/// Tool argv as written in the config: either an array or one shell-style string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CmdSpec {
  Argv(Vec<String>),
  Line(String),
}

impl Default for CmdSpec {
  fn default() -> Self {
    Self::Argv(Vec::new())
  }
}

impl CmdSpec {
  /// Returns the argv tokens, splitting the string form via shell-words.
  pub fn argv(&self) -> Result<Vec<String>> {
    match self {
      Self::Argv(argv) => Ok(argv.clone()),
      Self::Line(line) => {
        shell_words::split(line).with_context(|| format!("invalid dashboard.cmd: {line}"))
      }
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
  /// Visualization tool argv prefix. Tokens support the `<root>` placeholder.
  #[serde(default)]
  pub cmd: CmdSpec,
  /// Entry script, relative to the repository root.
  #[serde(default)]
  pub script: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LauncherConfig {
  /// Wait for Enter after the dashboard exits.
  #[serde(default = "default_pause")]
  pub pause: bool,
}

impl Default for LauncherConfig {
  fn default() -> Self {
    Self {
      pause: default_pause(),
    }
  }
}

fn default_pause() -> bool {
  true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CotdashConfig {
  #[serde(default)]
  pub dashboard: DashboardConfig,
  #[serde(default)]
  pub launcher: LauncherConfig,
}

/// Locations derived from the launcher executable.
///
/// `script_root` is the directory holding the launcher, `repo_root` its parent.
/// Neither depends on the caller's working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPaths {
  script_root: PathBuf,
  repo_root: PathBuf,
}

impl LaunchPaths {
  /// Resolve paths for the currently running executable.
  ///
  /// # Errors
  /// Returns an error if the executable path cannot be determined or has no
  /// grandparent directory.
  pub fn current() -> Result<Self> {
    let exe = std::env::current_exe().context(LAUNCHER_PATH_UNRESOLVED)?;
    Self::from_launcher(&exe)
  }

  /// Resolve paths for a launcher file at `launcher`.
  ///
  /// # Errors
  /// Returns an error if the path cannot be canonicalized or has no parent.
  pub fn from_launcher(launcher: &Path) -> Result<Self> {
    let launcher = launcher
      .canonicalize()
      .with_context(|| format!("failed to resolve launcher path {}", launcher.display()))?;
    let script_root = launcher
      .parent()
      .ok_or_else(|| anyhow::anyhow!("launcher {} has no parent directory", launcher.display()))?;
    Self::from_script_root(script_root)
  }

  /// Build paths from an already absolute launcher directory.
  ///
  /// # Errors
  /// Returns an error if `script_root` has no parent directory.
  pub fn from_script_root(script_root: impl Into<PathBuf>) -> Result<Self> {
    let script_root = script_root.into();
    let repo_root = script_root
      .parent()
      .ok_or_else(|| {
        anyhow::anyhow!(
          "launcher directory {} has no parent directory",
          script_root.display()
        )
      })?
      .to_path_buf();
    Ok(Self {
      script_root,
      repo_root,
    })
  }

  #[must_use]
  pub fn script_root(&self) -> &Path {
    &self.script_root
  }

  #[must_use]
  pub fn repo_root(&self) -> &Path {
    &self.repo_root
  }

  #[must_use]
  pub fn project_config_path(&self) -> PathBuf {
    self.script_root.join(CONFIG_FILE_NAME)
  }
}

#[derive(Debug, Clone)]
pub struct AppContext {
  pub paths: LaunchPaths,
  pub config: CotdashConfig,
}

fn merge_values(base: &mut TomlValue, overlay: TomlValue) {
  match (base, overlay) {
    (TomlValue::Table(base_tbl), TomlValue::Table(overlay_tbl)) => {
      for (k, v) in overlay_tbl {
        match base_tbl.get_mut(&k) {
          Some(existing) => merge_values(existing, v),
          None => {
            base_tbl.insert(k, v);
          }
        }
      }
    }
    // Arrays and scalars: replace last-wins
    (base_slot, new_v) => *base_slot = new_v,
  }
}

/// Warn about unknown keys in a parsed TOML config file.
///
/// Unknown keys are logged as warnings to help users catch typos.
fn warn_unknown_keys(val: &TomlValue, file_path: &Path) {
  let TomlValue::Table(table) = val else {
    return;
  };

  for key in table.keys() {
    if !KNOWN_TOP_LEVEL_KEYS.contains(&key.as_str()) {
      eprintln!(
        "{}: unknown config key '{}' in {} (did you mean one of: {}?)",
        "warning".yellow(),
        key,
        file_path.display(),
        KNOWN_TOP_LEVEL_KEYS.join(", ")
      );
    }
  }

  for (section, known) in [
    ("dashboard", KNOWN_DASHBOARD_KEYS),
    ("launcher", KNOWN_LAUNCHER_KEYS),
  ] {
    let Some(TomlValue::Table(inner)) = table.get(section) else {
      continue;
    };
    for key in inner.keys() {
      if !known.contains(&key.as_str()) {
        eprintln!(
          "{}: unknown config key '{}.{}' in {} (known keys: {})",
          "warning".yellow(),
          section,
          key,
          file_path.display(),
          known.join(", ")
        );
      }
    }
  }
}

fn merge_file(merged: &mut TomlValue, path: &Path) -> Result<()> {
  let data =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let val: TomlValue =
    toml::from_str(&data).with_context(|| format!("invalid TOML in {}", path.display()))?;
  warn_unknown_keys(&val, path);
  debug!("merged config from {}", path.display());
  merge_values(merged, val);
  Ok(())
}

/// Load and merge configuration from defaults, global, and launcher-local files.
///
/// # Errors
/// Returns an error if any of the config files cannot be read or parsed
/// as valid TOML, or if the merged result does not match the config schema.
pub fn load_config(paths: &LaunchPaths) -> Result<CotdashConfig> {
  // Start with embedded defaults
  let mut merged: TomlValue =
    toml::from_str(DEFAULT_TOML).context("invalid embedded default config")?;

  // Merge global XDG config if present
  let xdg = xdg::BaseDirectories::with_prefix("cotdash");
  if let Some(global_path) = xdg.find_config_file(CONFIG_FILE_NAME) {
    merge_file(&mut merged, &global_path)?;
  }

  // Merge the file next to the launcher if present
  let local_cfg = paths.project_config_path();
  if local_cfg.exists() {
    merge_file(&mut merged, &local_cfg)?;
  }

  // Deserialize into strongly typed config
  let merged_str = toml::to_string(&merged).context("failed to serialize merged config")?;
  let cfg: CotdashConfig = toml::from_str(&merged_str).context("failed to parse merged config")?;
  Ok(cfg)
}
