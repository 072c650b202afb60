use anyhow::Result;
use clap::Parser;
use log::debug;

pub mod commands;
pub mod config;
pub mod texts;
pub mod utils;

use crate::config::{AppContext, LaunchPaths, load_config};

/// Launch the COT positioning dashboard from the repository this launcher lives in.
///
/// Takes no arguments. Place the binary in a directory directly below the
/// repository root (for example `tools/`) and run it from anywhere.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {}

pub fn parse() -> Cli {
  Cli::parse()
}

fn init_logging() {
  let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    .format_timestamp_secs()
    .try_init();
}

pub fn run() -> Result<i32> {
  let _cli = parse();
  init_logging();

  let paths = LaunchPaths::current()?;
  debug!(
    "launcher dir {}, repository root {}",
    paths.script_root().display(),
    paths.repo_root().display()
  );
  let config = load_config(&paths)?;
  let ctx = AppContext { paths, config };

  commands::launch::run(&ctx)
}
