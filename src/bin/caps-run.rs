use std::process::ExitCode;

use caps_run::{FATAL_EXIT_CODE, Opt, launch};
use clap::Parser;

fn main() -> ExitCode {
    let opt = Opt::parse();

    tracing_subscriber::fmt()
        .with_max_level(opt.verbosity())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match opt.main() {
        Ok(status) => ExitCode::from(launch::exit_code(status)),
        Err(e) => {
            eprintln!("caps-run: {e:#}");
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}
