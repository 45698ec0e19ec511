//! Input-line parsing.
//!
//! A line is split into whitespace-separated word tokens, then assembled into
//! a [`Command`]: the trailing `&` background marker is stripped first, then
//! the first `< file` and `> file` pairs. Redirection targets are opened here
//! so that a command whose target cannot be opened is discarded before any
//! dispatch happens.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;

use log::debug;

use crate::errors::{Error, Result};

const NULL_DEVICE: &str = "/dev/null";

/// Permissions for newly created output-redirection targets (rw-r--r--).
const OUTPUT_FILE_MODE: u32 = 0o644;

/// The parsed representation of one input line.
///
/// `input`/`output` of `None` mean the child inherits the shell's own
/// stdin/stdout. The handles are opened close-on-exec (std's default), so a
/// concurrently launched child can never inherit another command's
/// redirection target; wiring them onto descriptors 0/1 at spawn time clears
/// the flag on the duplicate only.
#[derive(Debug)]
pub struct Command {
    /// Ordered arguments; index 0 is the program or built-in name. Never
    /// empty, and never contains `<`, `>`, `&` or a redirection filename.
    pub arguments: Vec<String>,
    pub input: Option<File>,
    pub output: Option<File>,
    pub background: bool,
}

impl Command {
    pub fn program(&self) -> &str {
        &self.arguments[0]
    }
}

/// Parses one raw input line.
///
/// Returns `Ok(None)` for lines that produce no command at all: comment
/// lines (first character `#`), blank lines, and lines that reduce to zero
/// arguments once the background marker is stripped.
pub fn parse_line(input: &str) -> Result<Option<Command>> {
    if input.starts_with('#') {
        return Ok(None);
    }

    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Ok(None);
    }

    let command = build(tokens)?;
    debug!("parsed command: {:?}", command);
    Ok(command)
}

/// Splits a line into owned, non-empty word tokens.
fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_owned).collect()
}

fn build(mut tokens: Vec<String>) -> Result<Option<Command>> {
    let mut command = Command {
        arguments: Vec::new(),
        input: None,
        output: None,
        background: false,
    };

    // The background marker comes off first: a background command with no
    // explicit redirection must neither block on nor pollute the terminal,
    // so both sides start out bound to the null device. Explicit `<`/`>`
    // pairs found below override these bindings.
    if tokens.last().map(String::as_str) == Some("&") {
        tokens.pop();
        command.background = true;
        command.input = Some(open_input(NULL_DEVICE, true)?);
        command.output = Some(open_output(NULL_DEVICE, true)?);
    }

    if let Some(file) = take_redirection_target(&mut tokens, "<", command.background)? {
        command.input = Some(open_input(&file, command.background)?);
    }

    if let Some(file) = take_redirection_target(&mut tokens, ">", command.background)? {
        command.output = Some(open_output(&file, command.background)?);
    }

    if tokens.is_empty() {
        return Ok(None);
    }

    command.arguments = tokens;
    Ok(Some(command))
}

/// Removes the first `marker` token and the filename token after it,
/// returning the filename. Only the first occurrence of each marker is
/// honored; token order beyond that is not validated.
fn take_redirection_target(
    tokens: &mut Vec<String>,
    marker: &str,
    background: bool,
) -> Result<Option<String>> {
    let pos = match tokens.iter().position(|token| token == marker) {
        Some(pos) => pos,
        None => return Ok(None),
    };

    tokens.remove(pos);
    if pos < tokens.len() {
        Ok(Some(tokens.remove(pos)))
    } else {
        // A marker with nothing after it cannot name a target.
        Err(Error::redirection_open("", background))
    }
}

fn open_input(file: &str, background: bool) -> Result<File> {
    File::open(file).map_err(|_| Error::redirection_open(file, background))
}

fn open_output(file: &str, background: bool) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTPUT_FILE_MODE)
        .open(file)
        .map_err(|_| Error::redirection_open(file, background))
}

#[cfg(test)]
mod tests {
    use std::os::unix::io::AsRawFd;
    use std::path::PathBuf;

    use tempdir::TempDir;

    use super::*;
    use crate::errors::ErrorKind;

    fn parse(input: &str) -> Option<Command> {
        parse_line(input).expect("line should parse")
    }

    /// Resolves where an open handle actually points.
    fn fd_target(file: &File) -> PathBuf {
        let fd_path = format!("/proc/self/fd/{}", file.as_raw_fd());
        std::fs::read_link(fd_path).expect("descriptor should resolve")
    }

    #[test]
    fn tokenize_splits_on_whitespace() {
        assert_eq!(tokenize("ls -al  /tmp"), vec!["ls", "-al", "/tmp"]);
        assert_eq!(tokenize("\techo\thi\n"), vec!["echo", "hi"]);
        assert!(tokenize("   \t \n").is_empty());
    }

    #[test]
    fn blank_and_comment_lines_produce_no_command() {
        assert!(parse("").is_none());
        assert!(parse("   \t").is_none());
        assert!(parse("# this is a comment").is_none());
        assert!(parse("#ls").is_none());
    }

    #[test]
    fn comment_marker_must_be_first_character() {
        let command = parse(" # indented").expect("not a comment line");
        assert_eq!(command.arguments, vec!["#", "indented"]);
    }

    #[test]
    fn simple_command_inherits_shell_stdio() {
        let command = parse("echo hello world").unwrap();
        assert_eq!(command.arguments, vec!["echo", "hello", "world"]);
        assert!(command.input.is_none());
        assert!(command.output.is_none());
        assert!(!command.background);
    }

    #[test]
    fn trailing_ampersand_marks_background_and_binds_null_device() {
        let command = parse("sleep 10 &").unwrap();
        assert!(command.background);
        assert_eq!(command.arguments, vec!["sleep", "10"]);
        assert_eq!(
            fd_target(command.input.as_ref().unwrap()),
            PathBuf::from(NULL_DEVICE)
        );
        assert_eq!(
            fd_target(command.output.as_ref().unwrap()),
            PathBuf::from(NULL_DEVICE)
        );
    }

    #[test]
    fn ampersand_not_in_last_position_is_an_ordinary_argument() {
        let command = parse("echo a & b").unwrap();
        assert!(!command.background);
        assert_eq!(command.arguments, vec!["echo", "a", "&", "b"]);
    }

    #[test]
    fn bare_ampersand_produces_no_command() {
        assert!(parse("&").is_none());
    }

    #[test]
    fn input_redirection_is_stripped_and_opened() {
        let dir = TempDir::new("smsh-parser").unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "data").unwrap();

        let line = format!("wc -c < {}", path.display());
        let command = parse(&line).unwrap();
        assert_eq!(command.arguments, vec!["wc", "-c"]);
        assert!(command.input.is_some());
        assert!(command.output.is_none());
    }

    #[test]
    fn output_redirection_creates_the_target() {
        let dir = TempDir::new("smsh-parser").unwrap();
        let path = dir.path().join("out.txt");

        let line = format!("echo hi > {}", path.display());
        let command = parse(&line).unwrap();
        assert_eq!(command.arguments, vec!["echo", "hi"]);
        assert!(command.output.is_some());
        assert!(path.exists());
    }

    #[test]
    fn both_redirections_with_background_marker() {
        let dir = TempDir::new("smsh-parser").unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "data").unwrap();

        let line = format!("sort < {} > {} &", input.display(), output.display());
        let command = parse(&line).unwrap();
        assert!(command.background);
        assert_eq!(command.arguments, vec!["sort"]);
        assert!(command.input.is_some());
        assert!(command.output.is_some());
    }

    #[test]
    fn unopenable_input_target_reports_the_file() {
        let err = parse_line("cat < /no/such/file").unwrap_err();
        match *err.kind() {
            ErrorKind::RedirectionOpen {
                ref file,
                background,
            } => {
                assert_eq!(file, "/no/such/file");
                assert!(!background);
            }
            ref kind => panic!("unexpected error kind: {:?}", kind),
        }
    }

    #[test]
    fn unopenable_target_on_background_command_is_flagged_background() {
        let err = parse_line("cat < /no/such/file &").unwrap_err();
        match *err.kind() {
            ErrorKind::RedirectionOpen { background, .. } => assert!(background),
            ref kind => panic!("unexpected error kind: {:?}", kind),
        }
    }

    #[test]
    fn missing_redirection_filename_is_an_open_failure() {
        let err = parse_line("cat <").unwrap_err();
        match *err.kind() {
            ErrorKind::RedirectionOpen { ref file, .. } => assert!(file.is_empty()),
            ref kind => panic!("unexpected error kind: {:?}", kind),
        }
    }
}
