//! Signal setup, foreground waiting and background reaping.
//!
//! The shell keeps no table of background jobs. Finished children are
//! discovered by polling the OS with a non-blocking `waitpid` once per
//! prompt cycle, and announced as they are found.

use std::fmt;

use failure::{Fail, ResultExt};
use log::debug;
use nix::errno::Errno;
use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::{self, Pid};

use crate::errors::{ErrorKind, Result};

/// Outcome of the most recently completed foreground command.
///
/// This is the shell's single piece of mutable status state; it is owned by
/// the `Shell` and read back by the `status` built-in. Background completions
/// never produce one of these.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobStatus {
    Exited(i32),
    Signaled(i32),
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            JobStatus::Exited(code) => write!(f, "exit value {}", code),
            JobStatus::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}

/// Configures signal dispositions for the shell's own lifetime.
///
/// SIGINT is ignored so that Ctrl-C at the prompt never kills the shell.
/// Children inherit the ignored disposition across exec; the launcher resets
/// it to default for foreground children only, so the same keystroke kills a
/// foreground child but leaves background children running.
pub fn initialize_signals() -> Result<()> {
    unsafe {
        signal::signal(Signal::SIGINT, SigHandler::SigIgn).context(ErrorKind::Nix)?;
    }
    Ok(())
}

/// Blocks until the foreground child `pid` exits or is killed by a signal.
pub fn wait_for_job(pid: u32) -> Result<JobStatus> {
    let pid = Pid::from_raw(pid as i32);
    loop {
        match wait::waitpid(pid, None).context(ErrorKind::Nix)? {
            WaitStatus::Exited(_, code) => return Ok(JobStatus::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => return Ok(JobStatus::Signaled(signal as i32)),
            status => debug!("ignoring wait status {:?} for {}", status, pid),
        }
    }
}

/// Reaps every already-finished background child without blocking,
/// announcing each on stdout. Stops as soon as nothing else has finished.
pub fn reap_background_jobs() -> Result<()> {
    loop {
        match wait::waitpid(None, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => break,
            Ok(WaitStatus::Exited(pid, code)) => {
                println!("background pid {} is done: exit value {}", pid, code);
            }
            Ok(WaitStatus::Signaled(pid, signal, _)) => {
                println!(
                    "background pid {} is done: terminated by signal {}",
                    pid, signal as i32
                );
            }
            Ok(status) => debug!("ignoring wait status {:?}", status),
            Err(e) => return Err(e.context(ErrorKind::Nix).into()),
        }
    }

    Ok(())
}

/// Broadcasts SIGHUP to the shell's entire process group so that outstanding
/// background children terminate with it. The shell ignores the signal first
/// so the broadcast cannot take it down before it exits on its own terms.
pub fn hangup_process_group() {
    unsafe {
        let temp_result = signal::signal(Signal::SIGHUP, SigHandler::SigIgn);
        log_if_err!(temp_result, "failed to ignore SIGHUP");
    }

    // When launched from a job-control shell, our pid is also our process
    // group id; signaling the negated pid reaches every child we forked.
    let group = Pid::from_raw(-unistd::getpid().as_raw());
    let temp_result = signal::kill(group, Signal::SIGHUP);
    log_if_err!(temp_result, "failed to send SIGHUP to process group");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_formats_exit_value() {
        assert_eq!(JobStatus::Exited(0).to_string(), "exit value 0");
        assert_eq!(JobStatus::Exited(1).to_string(), "exit value 1");
    }

    #[test]
    fn status_formats_signal_termination() {
        assert_eq!(JobStatus::Signaled(15).to_string(), "terminated by signal 15");
        assert_eq!(JobStatus::Signaled(9).to_string(), "terminated by signal 9");
    }
}
