use nix::{
    sys::signal::{self, Signal},
    unistd::Pid,
};
use signal_hook::{
    consts::*,
    iterator::{Handle, Signals},
};

use crate::launch::error::Error;

/// Signals passed on to the child.
const FORWARDED: [i32; 4] = [SIGTERM, SIGHUP, SIGUSR1, SIGUSR2];

/// Signals the terminal already sends to the child's process group. We catch
/// them so that we outlive the child and can report its status, but don't
/// send them a second time.
const SWALLOWED: [i32; 2] = [SIGINT, SIGQUIT];

/// Catches signals from the moment it is registered, and passes them on to a
/// child once one is given. Anything caught in between is delivered then.
pub struct SignalForwarder {
    handle: Handle,
    signals: Option<Signals>,
}

impl SignalForwarder {
    pub fn register() -> Result<Self, Error> {
        let signals = Signals::new(FORWARDED.iter().chain(SWALLOWED.iter()))
            .map_err(Error::Signals)?;

        Ok(Self {
            handle: signals.handle(),
            signals: Some(signals),
        })
    }

    /// Starts forwarding to `pid`. Only the first call has any effect.
    pub fn forward_to(&mut self, pid: Pid) {
        let Some(signals) = self.signals.take() else {
            return;
        };

        std::thread::spawn(move || {
            if let Err(e) = Self::listen(signals, pid) {
                tracing::error!(%e, "error returned by signal forwarder");
            }
        });
    }

    #[tracing::instrument(level = "TRACE", skip(signals), err)]
    fn listen(mut signals: Signals, pid: Pid) -> Result<(), Error> {
        for raw in signals.forever() {
            if !FORWARDED.contains(&raw) {
                tracing::debug!(signal = raw, "leaving signal to the process group");
                continue;
            }

            let sig = Signal::try_from(raw).map_err(Error::Signal)?;
            tracing::debug!(?sig, %pid, "forwarding signal");
            signal::kill(pid, Some(sig)).map_err(|e| Error::Kill { e, pid })?;
        }

        Ok(())
    }
}

impl Drop for SignalForwarder {
    fn drop(&mut self) {
        self.handle.close();
    }
}
