//! Smsh built-in commands.
//!
//! Built-ins run inside the shell process itself. They always talk to the
//! terminal: a redirection parsed on a built-in line has no effect, which is
//! an accepted limitation of the shell rather than an oversight.

use std::io::Write;

use self::cd::Cd;
use self::exit::Exit;
use self::status::Status;
use crate::errors::Result;
use crate::shell::Shell;

pub mod prelude {
    pub use std::io::Write;

    pub use failure::ResultExt;

    pub use crate::errors::{ErrorKind, Result};
    pub use crate::shell::Shell;
}

mod cd;
mod exit;
mod status;

const CD_NAME: &str = "cd";
const EXIT_NAME: &str = "exit";
const STATUS_NAME: &str = "status";

/// Represents a built-in command such as cd or status.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// Runs the command with the given arguments in the `shell` environment.
    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], stdout: &mut dyn Write) -> Result<()>;
}

/// Built-in names match exactly and case-sensitively.
pub fn is_builtin<T: AsRef<str>>(program: T) -> bool {
    [CD_NAME, EXIT_NAME, STATUS_NAME].contains(&program.as_ref())
}

/// precondition: program is a builtin.
pub fn run<S1, S2>(
    shell: &mut Shell,
    program: S1,
    args: &[S2],
    stdout: &mut dyn Write,
) -> Result<()>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    debug_assert!(is_builtin(&program));

    match program.as_ref() {
        CD_NAME => Cd::run(shell, args, stdout),
        EXIT_NAME => Exit::run(shell, args, stdout),
        STATUS_NAME => Status::run(shell, args, stdout),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_builtin_surface() {
        assert!(is_builtin("cd"));
        assert!(is_builtin("status"));
        assert!(is_builtin("exit"));
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        assert!(!is_builtin("CD"));
        assert!(!is_builtin("Exit"));
        assert!(!is_builtin("statuses"));
        assert!(!is_builtin("ls"));
    }
}
