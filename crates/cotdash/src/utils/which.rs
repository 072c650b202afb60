use std::path::{Path, PathBuf};

/// Suffixes tried for bare program names on Windows.
#[cfg(windows)]
const EXECUTABLE_SUFFIXES: &[&str] = &["", ".exe", ".cmd", ".bat", ".com"];
#[cfg(not(windows))]
const EXECUTABLE_SUFFIXES: &[&str] = &[""];

/// Resolve `program` to an executable path by walking PATH entries.
#[must_use]
pub(crate) fn which(program: &str) -> Option<PathBuf> {
  let path = std::env::var_os("PATH")?;
  which_in(program, &path)
}

/// Resolve `program` against an explicit PATH value.
#[must_use]
pub(crate) fn which_in(program: &str, path: &std::ffi::OsStr) -> Option<PathBuf> {
  if has_separator(program) {
    return with_suffixes(Path::new(program)).find(|candidate| is_executable(candidate));
  }

  std::env::split_paths(path)
    .flat_map(|dir| with_suffixes(&dir.join(program)).collect::<Vec<_>>())
    .find(|candidate| is_executable(candidate))
}

/// True when `program` names a path (`./x`, `a/b`, `/usr/bin/x`) rather than a bare command.
#[must_use]
pub(crate) fn has_separator(program: &str) -> bool {
  Path::new(program).components().count() > 1
}

fn with_suffixes(base: &Path) -> impl Iterator<Item = PathBuf> + '_ {
  EXECUTABLE_SUFFIXES.iter().map(move |suffix| {
    let mut raw = base.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
  })
}

/// Returns true when `path` points to a regular executable file.
#[must_use]
pub(crate) fn is_executable(path: &Path) -> bool {
  if !path.is_file() {
    return false;
  }
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt as _;
    std::fs::metadata(path)
      .map(|meta| meta.permissions().mode() & 0o111 != 0)
      .unwrap_or(false)
  }
  #[cfg(not(unix))]
  {
    true
  }
}
