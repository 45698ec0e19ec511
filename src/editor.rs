//! Line reading for the interactive prompt.
//!
//! Wraps `rustyline` so the rest of the shell only sees "give me the next
//! line, or `None` at end of file". History lives in memory for the lifetime
//! of the process; it is never written to disk.

use failure::Fail;
use rustyline::{self, error::ReadlineError, Config};

use crate::errors::{ErrorKind, Result};

pub struct Editor {
    internal: rustyline::Editor<()>,
}

impl Editor {
    pub fn new() -> Editor {
        let config = Config::builder().history_ignore_space(true).build();
        Editor {
            internal: rustyline::Editor::with_config(config),
        }
    }

    /// Reads one line, echoing `prompt` first.
    /// Returns `None` when end of file is reached.
    pub fn readline(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.internal.readline(prompt) {
            Ok(line) => {
                self.internal.add_history_entry(line.as_str());
                Ok(Some(line))
            }
            // Ctrl-C abandons the current line and yields a fresh prompt.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.context(ErrorKind::Readline).into()),
        }
    }
}

impl Default for Editor {
    fn default() -> Editor {
        Editor::new()
    }
}
