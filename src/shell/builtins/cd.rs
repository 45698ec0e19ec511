use std::env;
use std::path::PathBuf;

use log::debug;

use super::prelude::*;
use super::{BuiltinCommand, CD_NAME};

pub struct Cd;

impl BuiltinCommand for Cd {
    const NAME: &'static str = CD_NAME;

    fn run<T: AsRef<str>>(_shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        let dir = match args.first() {
            Some(path) => PathBuf::from(path.as_ref()),
            None => match dirs::home_dir() {
                Some(home) => home,
                None => return Ok(()),
            },
        };

        // A failed chdir is silent: the shell stays where it was and the
        // status line is untouched.
        if let Err(e) = env::set_current_dir(&dir) {
            debug!("cd: {}: {}", dir.display(), e);
        }

        Ok(())
    }
}
