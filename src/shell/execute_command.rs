//! Launching external commands.

use std::io;
use std::os::unix::process::CommandExt;
use std::process::{self, Stdio};

use failure::Fail;
use log::debug;
use nix::sys::signal::{self, SigHandler, Signal};

use crate::errors::{Error, ErrorKind, Result};
use crate::parser;

/// Spawns a child for a non-built-in command, resolving `arguments[0]` via
/// the executable search path, and returns its pid.
///
/// Redirection handles are moved onto the child's descriptors 0/1; the
/// parent's copies are closed as soon as the spawn completes, so a long
/// session cannot exhaust its descriptor table. Foreground children get the
/// default SIGINT disposition back before exec; background children keep the
/// shell's inherited "ignore".
pub fn spawn_process(command: parser::Command) -> Result<u32> {
    let parser::Command {
        arguments,
        input,
        output,
        background,
    } = command;

    let mut command = process::Command::new(&arguments[0]);
    command.args(&arguments[1..]);

    if let Some(file) = input {
        command.stdin(Stdio::from(file));
    }
    if let Some(file) = output {
        command.stdout(Stdio::from(file));
    }

    if !background {
        let reset_sigint = || unsafe {
            signal::signal(Signal::SIGINT, SigHandler::SigDfl)
                .map(drop)
                .map_err(|errno| io::Error::from_raw_os_error(errno as i32))
        };
        unsafe {
            command.pre_exec(reset_sigint);
        }
    }

    match command.spawn() {
        Ok(child) => {
            debug!("spawned '{}' with pid {}", arguments[0], child.id());
            Ok(child.id())
        }
        Err(e) => match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                Err(Error::command_not_found(&arguments[0]))
            }
            _ => Err(e.context(ErrorKind::Io).into()),
        },
    }
}
