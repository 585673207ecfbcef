use std::{
    collections::VecDeque,
    ffi::OsString,
    os::unix::process::ExitStatusExt,
    process::{Child, Command, ExitStatus},
};

use nix::unistd::Pid;

pub use crate::launch::{error::Error, signal::SignalForwarder};

mod error;
mod signal;

/// A command and the arguments to pass it, exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    command: OsString,
    args: Vec<OsString>,
}

impl Launch {
    pub fn new<Command, Args>(command: Command, args: Args) -> Self
    where
        Command: Into<OsString>,
        Args: IntoIterator,
        Args::Item: Into<OsString>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(|arg| arg.into()).collect(),
        }
    }

    /// Splits a full argv into the command and its arguments.
    pub fn from_argv(argv: impl IntoIterator<Item = OsString>) -> Result<Self, Error> {
        let mut argv = argv.into_iter().collect::<VecDeque<_>>();
        let command = argv.pop_front().ok_or(Error::Argv0)?;

        Ok(Self {
            command,
            args: argv.into(),
        })
    }

    pub fn command(&self) -> &OsString {
        &self.command
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Runs the command to completion with inherited stdio.
    ///
    /// Signal handling is in place before the child exists, so nothing sent
    /// to us while it starts up is lost.
    #[tracing::instrument(level = "DEBUG", err)]
    pub fn run(&self) -> Result<ExitStatus, Error> {
        let mut signal_forwarder = SignalForwarder::register()?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .spawn()
            .map_err(|e| Error::Spawn {
                e,
                command: self.command.clone(),
            })?;
        let pid = match child.pid() {
            Ok(pid) => pid,
            Err(e) => {
                reap(&mut child);
                return Err(e);
            }
        };
        tracing::debug!(%pid, "spawned child");

        signal_forwarder.forward_to(pid);
        let status = child.wait().map_err(Error::Wait)?;

        // Stop forwarding signals, since there's no longer a child process.
        drop(signal_forwarder);

        tracing::info!(%status, "child exited");
        Ok(status)
    }
}

trait ChildExt {
    fn pid(&self) -> Result<Pid, Error>;
}

impl ChildExt for Child {
    fn pid(&self) -> Result<Pid, Error> {
        let id = self.id();
        i32::try_from(id)
            .map(Pid::from_raw)
            .map_err(|e| Error::Pid { e, id })
    }
}

/// Kills and waits for a child we can no longer look after.
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::warn!(%e, "killing child");
    }
    if let Err(e) = child.wait() {
        tracing::warn!(%e, "reaping child");
    }
}

/// The code a shell would report for `status`.
///
/// Normal exits keep their code; death by signal `N` becomes `128 + N`.
pub fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        // Unix exit codes are already truncated to a byte by wait(2).
        code as u8
    } else if let Some(signal) = status.signal() {
        128u8.wrapping_add(signal as u8)
    } else {
        1
    }
}
