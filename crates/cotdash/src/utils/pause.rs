use std::io::{self, Read, Write};

use anyhow::{Context, Result};

pub const PROMPT: &str = "Press Enter to close this window...";

/// Longest acknowledgment line kept; the rest of the line is not consumed.
const MAX_LINE: usize = 200;

/// Print a blank line and the close prompt, then block for one line of input.
///
/// EOF counts as acknowledgment, so a closed or redirected stdin never hangs.
///
/// # Errors
/// Returns an error if writing the prompt or reading the input fails.
pub fn wait_for_acknowledgement<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<()> {
  writeln!(writer).context("failed to write to stdout")?;
  write!(writer, "{PROMPT}").context("failed to write to stdout")?;
  writer.flush().context("failed to flush stdout")?;

  let mut line = String::new();
  read_line(reader, &mut line)?;
  log::debug!("acknowledged with {line:?}");
  Ok(())
}

/// Pause on the process's own stdin and stdout.
pub fn pause_for_user() -> Result<()> {
  let mut stdin = io::stdin().lock();
  let mut stdout = anstream::stdout();
  wait_for_acknowledgement(&mut stdin, &mut stdout)
}

/// Read a single line byte-by-byte with a size limit.
fn read_line<R: Read>(reader: &mut R, target: &mut String) -> Result<()> {
  loop {
    let mut buf = [0u8; 1];
    match reader.read(&mut buf) {
      Ok(0) => break,
      Ok(_) => {
        let ch = buf[0] as char;
        if ch == '\n' || ch == '\r' {
          break;
        }
        target.push(ch);
        if target.len() > MAX_LINE {
          break;
        }
      }
      Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
      Err(err) => {
        return Err(err).context("failed to read from stdin");
      }
    }
  }
  Ok(())
}
