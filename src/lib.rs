use std::{ffi::OsString, process::ExitStatus};

use anyhow::Context;
use clap::{ArgAction, Parser};

use crate::{
    launch::Launch,
    modifier::{LockState, ModifierController, X11},
};

pub mod launch;
pub mod modifier;

/// Exit code used when caps-run itself fails, rather than the command.
pub const FATAL_EXIT_CODE: u8 = 125;

/// Turns off Caps Lock and runs a command.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Opt {
    /// X display to use instead of `$DISPLAY`.
    #[arg(long, value_name = "NAME")]
    display: Option<String>,

    /// Lock Caps Lock instead of releasing it.
    #[arg(long)]
    lock: bool,

    /// Log more; may be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The command to run and any arguments to pass it.
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    argv: Vec<OsString>,
}

impl Opt {
    pub fn verbosity(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn main(self) -> anyhow::Result<ExitStatus> {
        let Opt {
            display,
            lock,
            argv,
            ..
        } = self;

        run(&X11::new(display), LockState::from(lock), argv)
    }
}

/// Sets Caps Lock to `state`, then runs `argv` and returns its status.
///
/// The command is never started if the display can't be updated.
pub fn run<C>(controller: &C, state: LockState, argv: Vec<OsString>) -> anyhow::Result<ExitStatus>
where
    C: ModifierController,
{
    let launch = Launch::from_argv(argv)?;

    modifier::toggle(controller, state)
        .with_context(|| format!("setting caps lock {state}"))?;

    launch
        .run()
        .with_context(|| format!("launching {:?}", launch.command()))
}
