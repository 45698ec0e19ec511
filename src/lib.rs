//! Smsh - a small interactive shell.
//!
//! The shell reads one line at a time, parses it into a [`parser::Command`]
//! with optional I/O redirection and a trailing background marker, and either
//! runs one of the built-in commands (`cd`, `status`, `exit`) or launches the
//! program as a child process. Foreground children are waited on
//! synchronously; background children are reaped with a non-blocking poll
//! once per prompt cycle.

#[macro_use]
mod macros;

pub mod editor;
pub mod errors;
pub mod parser;
pub mod shell;

pub use crate::shell::Shell;
