/// Token styling helpers.
///
/// The `t` module stands for "tokens". Use these helpers to style
/// specific values inside info messages consistently.
pub mod t {
  use std::fmt::Display;

  use owo_colors::OwoColorize as _;

  pub fn title(value: impl Display) -> String {
    format!("{}", value.to_string().bright_cyan().bold())
  }

  pub fn path(p: impl Display) -> String {
    format!("{}", p.to_string().cyan())
  }

  pub fn cmd(c: impl Display) -> String {
    format!("{}", c.to_string().magenta())
  }

  pub fn dim(s: impl Display) -> String {
    format!("{}", s.to_string().dimmed())
  }

  pub fn warn(s: impl Display) -> String {
    format!("{}", s.to_string().yellow())
  }

  pub fn err(s: impl Display) -> String {
    format!("{}", s.to_string().red())
  }
}

// Routed output: when a sink is set, macros emit events to it; otherwise print.
// info = neutral, warn/error = full-line tint.

use crossbeam_channel::Sender;
use parking_lot::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
  Info,
  Warn,
  Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
  /// Render a command preface line like "> streamlit run ..."
  Command(String),
  /// A single log line preserving ANSI styling
  Line { level: LogLevel, ansi: String },
}

static SINK: Mutex<Option<Sender<LogEvent>>> = Mutex::new(None);

pub fn set_log_sink(sender: Sender<LogEvent>) {
  *SINK.lock() = Some(sender);
}

pub fn clear_log_sink() {
  *SINK.lock() = None;
}

pub(crate) fn emit(level: LogLevel, text: String) {
  if let Some(tx) = SINK.lock().clone() {
    let _ = tx.send(LogEvent::Line { level, ansi: text });
  } else {
    match level {
      LogLevel::Info | LogLevel::Warn => anstream::println!("{}", text),
      LogLevel::Error => anstream::eprintln!("{}", text),
    }
  }
}

pub(crate) fn emit_command(command: String) {
  if let Some(tx) = SINK.lock().clone() {
    let _ = tx.send(LogEvent::Command(command));
  } else {
    anstream::println!("{} {}", t::dim(">"), t::cmd(command));
  }
}

#[macro_export]
macro_rules! log_info {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Info,
      format!($fmt $(, $args )*)
    );
  }};
}

#[macro_export]
macro_rules! log_warn {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Warn,
      $crate::utils::log::t::warn(format!($fmt $(, $args )*))
    );
  }};
}

#[macro_export]
macro_rules! log_error {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Error,
      $crate::utils::log::t::err(format!($fmt $(, $args )*))
    );
  }};
}

#[macro_export]
macro_rules! log_command {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit_command(format!($fmt $(, $args )*));
  }};
}
