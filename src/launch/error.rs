use std::{ffi::OsString, num::TryFromIntError};

use nix::{errno::Errno, unistd::Pid};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no command given")]
    Argv0,

    #[error("killing process {pid}: {e}")]
    Kill {
        #[source]
        e: Errno,
        pid: Pid,
    },

    #[error("child process ID {id} out of range: {e}")]
    Pid {
        #[source]
        e: TryFromIntError,
        id: u32,
    },

    #[error("converting raw signal: {0}")]
    Signal(#[source] Errno),

    #[error("creating signals: {0}")]
    Signals(#[source] std::io::Error),

    #[error("cannot run {command:?}: {e}")]
    Spawn {
        #[source]
        e: std::io::Error,
        command: OsString,
    },

    #[error("waiting for child process: {0}")]
    Wait(#[source] std::io::Error),
}
