use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assert_cmd::Command;
use tempfile::TempDir;

use super::tempdir_in_sandbox;

pub const TARGET_SCRIPT: &str = "src/analysis/cot_positioning/streamlit_app.py";

/// Records its working directory and argv next to itself, then exits with
/// `$FAKE_STREAMLIT_EXIT` (default 0). With `$FAKE_STREAMLIT_INTERRUPT` set it
/// sends SIGINT to the launcher and to itself, like Ctrl+C in a terminal.
/// Uses shell builtins only so it works with a PATH that contains nothing but
/// the fake tool.
const FAKE_STREAMLIT: &str = r#"#!/bin/sh
echo "fake streamlit started"
printf '%s|%s\n' "$(pwd -P)" "$*" >> "${0%/*}/calls.log"
if [ -n "$FAKE_STREAMLIT_INTERRUPT" ]; then
  kill -INT "$PPID"
  kill -INT "$$"
fi
exit "${FAKE_STREAMLIT_EXIT:-0}"
"#;

/// One recorded invocation of the fake tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
  pub cwd: PathBuf,
  pub args: String,
}

/// A throwaway repository with the built launcher copied into `<repo>/tools/`
/// and a fake `streamlit` on a private PATH.
#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
  repo: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = tempdir_in_sandbox();
    let repo = temp.path().join("repo");
    let env = Self { temp, repo };
    if let Err(err) = env.prepare() {
      panic!("prepare test repository failed: {err:#}");
    }
    env
  }

  fn prepare(&self) -> Result<()> {
    fs::create_dir_all(self.tools_dir())?;
    fs::create_dir_all(self.repo.join("src").join("analysis"))?;
    fs::create_dir_all(self.bin_dir())?;
    fs::create_dir_all(self.xdg_home())?;

    let src = PathBuf::from(env!("CARGO_BIN_EXE_cotdash"));
    let dst = self.launcher_path();
    fs_extra::file::copy(&src, &dst, &fs_extra::file::CopyOptions::new())
      .with_context(|| format!("copy {} -> {}", src.display(), dst.display()))?;
    make_executable(&dst)?;

    self.install_tool(&self.bin_dir())
  }

  /// Write the fake `streamlit` into `dir`, which must exist.
  pub fn install_tool(&self, dir: &Path) -> Result<()> {
    let tool = dir.join("streamlit");
    fs::write(&tool, FAKE_STREAMLIT).context("write fake streamlit")?;
    make_executable(&tool)
  }

  /// Scratch directory outside the repository.
  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn repo_root(&self) -> &Path {
    &self.repo
  }

  pub fn tools_dir(&self) -> PathBuf {
    self.repo.join("tools")
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.temp.path().join("bin")
  }

  pub fn xdg_home(&self) -> PathBuf {
    self.temp.path().join("xdg")
  }

  pub fn launcher_path(&self) -> PathBuf {
    self
      .tools_dir()
      .join(format!("cotdash{}", std::env::consts::EXE_SUFFIX))
  }

  /// Launcher command with an isolated PATH and config home and Enter queued on stdin.
  pub fn launcher(&self) -> Command {
    let mut cmd = Command::new(self.launcher_path());
    cmd.current_dir(self.path());
    cmd.env("PATH", self.bin_dir());
    cmd.env("XDG_CONFIG_HOME", self.xdg_home());
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("FAKE_STREAMLIT_EXIT");
    cmd.env_remove("FAKE_STREAMLIT_INTERRUPT");
    cmd.write_stdin("\n");
    cmd
  }

  pub fn remove_tool(&self) -> Result<()> {
    fs::remove_file(self.bin_dir().join("streamlit")).context("remove fake streamlit")
  }

  /// Move the repository to `name` inside the scratch directory.
  pub fn relocate(&mut self, name: &str) -> Result<()> {
    let target = self.temp.path().join(name);
    fs::rename(&self.repo, &target).context("relocate repository")?;
    self.repo = target;
    Ok(())
  }

  pub fn write_launcher_config(&self, contents: &str) -> Result<()> {
    fs::write(self.tools_dir().join("cotdash.toml"), contents).context("write launcher config")
  }

  pub fn write_global_config(&self, contents: &str) -> Result<()> {
    let dir = self.xdg_home().join("cotdash");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("cotdash.toml"), contents).context("write global config")
  }

  /// Invocations recorded by the fake tool on PATH, in order.
  pub fn calls(&self) -> Vec<ToolCall> {
    self.calls_in(&self.bin_dir())
  }

  /// Invocations recorded by a fake tool installed in `dir`.
  pub fn calls_in(&self, dir: &Path) -> Vec<ToolCall> {
    let Ok(log) = fs::read_to_string(dir.join("calls.log")) else {
      return Vec::new();
    };
    log
      .lines()
      .filter_map(|line| line.split_once('|'))
      .map(|(cwd, args)| ToolCall {
        cwd: PathBuf::from(cwd),
        args: args.to_string(),
      })
      .collect()
  }

  /// Canonical repository root as the fake tool reports it via `pwd -P`.
  pub fn canonical_repo_root(&self) -> PathBuf {
    self.repo.canonicalize().expect("canonical repo root")
  }

  /// Sorted relative paths of every entry below the repository root.
  pub fn repo_listing(&self) -> Vec<PathBuf> {
    let mut out = Vec::new();
    collect_entries(&self.repo, &self.repo, &mut out);
    out.sort();
    out
  }
}

fn collect_entries(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
  let Ok(entries) = fs::read_dir(dir) else {
    return;
  };
  for entry in entries.flatten() {
    let path = entry.path();
    if let Ok(rel) = path.strip_prefix(root) {
      out.push(rel.to_path_buf());
    }
    if path.is_dir() {
      collect_entries(root, &path, out);
    }
  }
}

fn make_executable(path: &Path) -> Result<()> {
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt as _;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
  }
  #[cfg(not(unix))]
  {
    let _ = path;
  }
  Ok(())
}
