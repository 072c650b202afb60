//! Keeps the launcher alive while the dashboard handles Ctrl+C.
//!
//! The terminal delivers SIGINT to the whole foreground process group. The
//! dashboard must see it; the launcher must outlive the dashboard. A no-op
//! handler (not `SIG_IGN`) is installed because handlers are reset to the
//! default disposition across `exec`, while ignored signals would stay
//! ignored in the child.

#[cfg(unix)]
mod imp {
  use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

  extern "C" fn swallow_interrupt(_: std::ffi::c_int) {}

  pub struct InterruptShield {
    previous: SigAction,
  }

  impl InterruptShield {
    pub fn install() -> nix::Result<Self> {
      let action = SigAction::new(
        SigHandler::Handler(swallow_interrupt),
        SaFlags::SA_RESTART,
        SigSet::empty(),
      );
      // SAFETY: the handler touches no state, so it is async-signal-safe.
      let previous = unsafe { signal::sigaction(Signal::SIGINT, &action) }?;
      Ok(Self { previous })
    }
  }

  impl Drop for InterruptShield {
    fn drop(&mut self) {
      // SAFETY: restores whatever disposition was active before `install`.
      let _ = unsafe { signal::sigaction(Signal::SIGINT, &self.previous) };
    }
  }
}

#[cfg(not(unix))]
mod imp {
  // The console delivers Ctrl+C to every attached process; nothing to install.
  pub struct InterruptShield;

  impl InterruptShield {
    pub fn install() -> std::io::Result<Self> {
      Ok(Self)
    }
  }
}

pub use imp::InterruptShield;

/// Install the shield, logging instead of failing when the OS refuses.
#[must_use]
pub fn shield() -> Option<InterruptShield> {
  match InterruptShield::install() {
    Ok(guard) => Some(guard),
    Err(err) => {
      log::warn!("could not install interrupt handler: {err}");
      None
    }
  }
}
