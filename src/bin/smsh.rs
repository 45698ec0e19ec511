use std::process;

use docopt::Docopt;
use log::{debug, error};
use nix::unistd::Pid;
use serde_derive::Deserialize;

use smsh::errors::Error;
use smsh::Shell;

const USAGE: &str = "
smsh.

Usage:
    smsh [options]
    smsh (-h | --help)
    smsh --version

Options:
    -h --help       Show this screen.
    --version       Show version.
    --log=<path>    Write a debug log to <path>.
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    flag_version: bool,
    flag_log: Option<String>,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if args.flag_version {
        println!("smsh version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Some(ref path) = args.flag_log {
        init_logger(path);
    }
    debug!("{:?}", args);

    let mut shell = Shell::new().unwrap_or_else(|e| display_error_and_exit(&e));
    shell.execute_from_stdin();

    // End of input takes the same terminal transition as the exit built-in.
    shell.exit()
}

fn init_logger(path: &str) {
    let pid = Pid::this();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(path).unwrap())
        .apply()
        .unwrap();
}

fn display_error_and_exit(error: &Error) -> ! {
    error!("failed to create shell: {}", error);
    eprintln!("smsh: {}", error);
    process::exit(1);
}
