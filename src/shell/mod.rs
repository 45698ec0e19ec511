//! Smsh - Shell Module
//!
//! The Shell owns the read-parse-dispatch-reap loop: it prompts, parses one
//! line into a command, routes built-ins to their implementations, launches
//! everything else as a child process, and records the outcome of foreground
//! commands for the `status` built-in.

use std::io::{self, BufRead, Write};
use std::process;

use atty::Stream;
use failure::ResultExt;
use log::{debug, info};

use crate::editor::Editor;
use crate::errors::{ErrorKind, Result};
use crate::parser::{self, Command};
use crate::shell::execute_command::spawn_process;
use crate::shell::job_control::JobStatus;

pub mod builtins;
pub mod execute_command;
pub mod job_control;

const PROMPT: &str = ": ";

pub struct Shell {
    editor: Editor,
    /// Outcome of the most recently completed foreground command.
    last_status: JobStatus,
    is_interactive: bool,
}

impl Shell {
    /// Constructs a new Shell and installs its signal dispositions.
    pub fn new() -> Result<Shell> {
        job_control::initialize_signals()?;

        let shell = Shell {
            editor: Editor::new(),
            last_status: JobStatus::Exited(0),
            is_interactive: atty::is(Stream::Stdin),
        };

        info!("smsh started up");
        Ok(shell)
    }

    pub fn last_status(&self) -> JobStatus {
        self.last_status
    }

    /// Writes the fixed prompt, then reads the next input line.
    /// Returns `None` when end of file is reached.
    fn prompt(&mut self) -> Result<Option<String>> {
        if self.is_interactive {
            return self.editor.readline(PROMPT);
        }

        print!("{}", PROMPT);
        io::stdout().flush().context(ErrorKind::Io)?;

        let mut line = String::new();
        match io::stdin()
            .lock()
            .read_line(&mut line)
            .context(ErrorKind::Io)?
        {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }

    /// Runs commands from stdin until `exit` or end of file.
    pub fn execute_from_stdin(&mut self) {
        loop {
            // Announce already-finished background children before taking
            // new input. The poll never blocks.
            let temp_result = job_control::reap_background_jobs();
            log_if_err!(temp_result, "reap_background_jobs");

            let input = match self.prompt() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                e => {
                    log_if_err!(e, "prompt");
                    continue;
                }
            };

            let temp_result = self.execute_command_string(&input);
            log_if_err!(temp_result, "execute_command_string");
        }
    }

    /// Parses and runs a single command line.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let command = match parser::parse_line(input) {
            Ok(Some(command)) => command,
            // Blank and comment lines are no-ops.
            Ok(None) => return Ok(()),
            Err(e) => {
                if let ErrorKind::RedirectionOpen { background, .. } = *e.kind() {
                    // The command is discarded outright; only a foreground
                    // command's failure overwrites the status line.
                    eprintln!("{}", e);
                    if !background {
                        self.last_status = JobStatus::Exited(1);
                    }
                    return Ok(());
                }

                return Err(e);
            }
        };

        self.execute_command(command)
    }

    fn execute_command(&mut self, command: Command) -> Result<()> {
        if builtins::is_builtin(command.program()) {
            // Built-ins ignore parsed redirections; the handles drop with
            // `command` without ever being wired anywhere.
            let program = command.program().to_string();
            return builtins::run(self, &program, &command.arguments[1..], &mut io::stdout());
        }

        let background = command.background;
        match spawn_process(command) {
            Ok(pid) if background => {
                println!("background pid is {}", pid);
            }
            Ok(pid) => {
                let status = job_control::wait_for_job(pid)?;
                debug!("foreground pid {} finished: {}", pid, status);
                if let JobStatus::Signaled(_) = status {
                    println!("{}", status);
                }
                self.last_status = status;
            }
            Err(e) => {
                if let ErrorKind::CommandNotFound(_) = *e.kind() {
                    eprintln!("{}", e);
                    if !background {
                        self.last_status = JobStatus::Exited(1);
                    }
                } else {
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Exits the shell with code 0, hanging up the whole process group so
    /// background children terminate with it. Outstanding children are not
    /// reaped first; this never returns to the prompt loop.
    pub fn exit(&mut self) -> ! {
        job_control::hangup_process_group();
        info!("smsh has shut down");
        process::exit(0);
    }
}
