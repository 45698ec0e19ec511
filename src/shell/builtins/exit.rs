use super::prelude::*;
use super::{BuiltinCommand, EXIT_NAME};

pub struct Exit;

impl BuiltinCommand for Exit {
    const NAME: &'static str = EXIT_NAME;

    fn run<T: AsRef<str>>(shell: &mut Shell, _args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        shell.exit()
    }
}
