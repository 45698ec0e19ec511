//! Error module. See the [failure](https://crates.io/crates/failure) crate
//! for details.

use std::fmt;
use std::result;

use failure::{Backtrace, Context, Fail};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    ctx: Context<ErrorKind>,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.ctx.get_context()
    }

    pub(crate) fn command_not_found<T: AsRef<str>>(program: T) -> Error {
        Error::from(ErrorKind::CommandNotFound(program.as_ref().to_string()))
    }

    pub(crate) fn redirection_open<T: AsRef<str>>(file: T, background: bool) -> Error {
        Error::from(ErrorKind::RedirectionOpen {
            file: file.as_ref().to_string(),
            background,
        })
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.ctx.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.ctx.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ctx.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The program image could not be launched (not found, not executable).
    CommandNotFound(String),
    /// A named redirection target could not be opened. `background` records
    /// whether the discarded command carried the background marker, which
    /// decides whether the shell's status line is overwritten.
    RedirectionOpen { file: String, background: bool },
    Io,
    Nix,
    Readline,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::CommandNotFound(ref program) => {
                write!(f, "{}: command could not be executed", program)
            }
            ErrorKind::RedirectionOpen { ref file, .. } => write!(f, "cannot open {}", file),
            ErrorKind::Io => write!(f, "I/O error occurred"),
            ErrorKind::Nix => write!(f, "Nix error occurred"),
            ErrorKind::Readline => write!(f, "Readline error occurred"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::from(Context::new(kind))
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(ctx: Context<ErrorKind>) -> Error {
        Error { ctx }
    }
}
