use super::prelude::*;
use super::{BuiltinCommand, STATUS_NAME};

pub struct Status;

impl BuiltinCommand for Status {
    const NAME: &'static str = STATUS_NAME;

    fn run<T: AsRef<str>>(shell: &mut Shell, _args: &[T], stdout: &mut dyn Write) -> Result<()> {
        writeln!(stdout, "{}", shell.last_status()).context(ErrorKind::Io)?;
        Ok(())
    }
}
