//! Running the lookup tool and capturing the line it picks.
//!
//! The tool draws its picker on the terminal device, so its standard input is
//! the terminal opened explicitly rather than whatever our own stdin happens to
//! be (a keybinding usually runs us with redirected streams). Standard output
//! is captured; only the first line counts. Standard error is left alone so
//! the tool's own diagnostics reach the user.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use itertools::Itertools;
use log::{debug, info};

use crate::config::{Config, DEFAULT_PROGRAM, DEFAULT_TERMINAL};
use crate::error::{Error, Result};
use crate::options::{ShellOptions, SELECTOR_OPTIONS};

/// Status reported when the tool cannot be found, as a shell would.
pub const NOT_FOUND_STATUS: i32 = 127;
/// Status reported when the tool exists but cannot be executed.
pub const NOT_EXECUTABLE_STATUS: i32 = 126;

/// Outcome of one selector run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// First output line of the tool without its line terminator.
    pub line: Option<String>,
    /// Exit status of the tool itself.
    pub status: i32,
}

impl Selection {
    pub fn new(line: Option<String>, status: i32) -> Self {
        Self { line, status }
    }

    /// A selection that produced no output.
    pub fn empty(status: i32) -> Self {
        Self { line: None, status }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// The captured text, or an empty string when nothing was captured.
    pub fn text(&self) -> &str {
        self.line.as_deref().unwrap_or_default()
    }

    /// Writes the line exactly as captured, followed by a newline.
    ///
    /// The newline is written even when nothing was captured.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to or flushing `out` fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(line) = &self.line {
            out.write_all(line.as_bytes())?;
        }
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// Anything that can produce a [`Selection`] from pass-through arguments.
pub trait SelectionSource {
    /// # Errors
    ///
    /// Returns an error when the selection could not be attempted at all.
    /// A tool that ran and failed is not an error; its status is in the
    /// returned [`Selection`].
    fn select(&self, args: &[String]) -> Result<Selection>;

    /// Selects with [`SELECTOR_OPTIONS`] in effect on `options`.
    ///
    /// The overrides last for this call only; `options` is restored on
    /// return, whether the selection succeeded or not.
    ///
    /// # Errors
    ///
    /// Returns the error from [`SelectionSource::select`].
    fn select_scoped(&self, options: &mut ShellOptions, args: &[String]) -> Result<Selection> {
        let _local = options.localize(SELECTOR_OPTIONS);
        self.select(args)
    }
}

/// Runs the external lookup tool on the terminal device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    program: String,
    terminal: PathBuf,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_TERMINAL)
    }
}

impl From<&Config> for Selector {
    fn from(config: &Config) -> Self {
        Self::new(config.program.clone(), config.terminal.clone())
    }
}

impl Selector {
    pub fn new(program: impl Into<String>, terminal: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            terminal: terminal.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn terminal(&self) -> &Path {
        &self.terminal
    }

    /// Selects and writes the selection to `out`, returning the tool's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection could not be attempted or the
    /// output could not be written.
    pub fn run<W: Write>(&self, args: &[String], out: &mut W) -> Result<i32> {
        let selection = self.select(args)?;
        selection.write_to(out)?;
        Ok(selection.status)
    }

    fn open_terminal(&self) -> Result<File> {
        File::open(&self.terminal)
            .map_err(|e| Error::terminal(&self.terminal.display().to_string(), e))
    }
}

impl SelectionSource for Selector {
    fn select(&self, args: &[String]) -> Result<Selection> {
        let terminal = self.open_terminal()?;

        debug!(
            "Running `{}` with arguments: [{}]",
            self.program,
            args.iter().join(", ")
        );

        let spawn_result = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::from(terminal))
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn();

        let mut child = match spawn_result {
            Ok(child) => child,
            Err(e) => return status_for_spawn_error(&self.program, e),
        };

        // stdout is closed before waiting; wait even if reading failed
        let line = child.stdout.take().map(read_first_line).transpose();
        let exit_status = child
            .wait()
            .map_err(|e| Error::sub_process(&self.program, e))?;
        let line = line
            .map_err(|e| Error::sub_process(&self.program, e))?
            .flatten();

        let status = status_code(exit_status);
        info!(
            "`{}` exited with status {} ({})",
            self.program,
            status,
            if line.is_some() { "line captured" } else { "no output" }
        );

        Ok(Selection::new(line, status))
    }
}

fn status_for_spawn_error(program: &str, e: io::Error) -> Result<Selection> {
    match e.kind() {
        io::ErrorKind::NotFound => {
            debug!("`{program}` was not found: {e}");
            Ok(Selection::empty(NOT_FOUND_STATUS))
        }
        io::ErrorKind::PermissionDenied => {
            debug!("`{program}` could not be executed: {e}");
            Ok(Selection::empty(NOT_EXECUTABLE_STATUS))
        }
        _ => Err(Error::sub_process(program, e)),
    }
}

/// Reads the first line of `reader`.
///
/// The reader is dropped on return, so a tool still writing after its first
/// line sees a closed pipe, the same as a pipeline whose reader exited. Only
/// the line terminator (`\n` or `\r\n`) is removed; the rest of the line is
/// kept byte for byte.
fn read_first_line<R: Read>(reader: R) -> io::Result<Option<String>> {
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();

    if reader.read_until(b'\n', &mut buffer)? == 0 {
        return Ok(None);
    }

    if buffer.last() == Some(&b'\n') {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }

    let line = match String::from_utf8(buffer) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    Ok(Some(line))
}

fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> (Selector, Vec<String>) {
        (
            Selector::new("sh", "/dev/null"),
            vec!["-c".to_string(), script.to_string()],
        )
    }

    #[test]
    fn test_read_first_line_strips_only_terminator() {
        let line = read_first_line("  foo \"bar\" \n".as_bytes()).unwrap();
        assert_eq!(line, Some("  foo \"bar\" ".to_string()));
    }

    #[test]
    fn test_read_first_line_crlf() {
        let line = read_first_line("git log\r\nsecond\r\n".as_bytes()).unwrap();
        assert_eq!(line, Some("git log".to_string()));
    }

    #[test]
    fn test_read_first_line_without_newline() {
        let line = read_first_line("ls -la".as_bytes()).unwrap();
        assert_eq!(line, Some("ls -la".to_string()));
    }

    #[test]
    fn test_read_first_line_empty_input() {
        assert_eq!(read_first_line(io::empty()).unwrap(), None);
    }

    #[test]
    fn test_read_first_line_blank_line_is_a_line() {
        assert_eq!(read_first_line("\n".as_bytes()).unwrap(), Some(String::new()));
    }

    #[test]
    fn test_write_to_with_line() {
        let mut out = Vec::new();
        Selection::new(Some("echo $HOME".to_string()), 0)
            .write_to(&mut out)
            .unwrap();
        assert_eq!(out, b"echo $HOME\n");
    }

    #[test]
    fn test_write_to_without_line() {
        let mut out = Vec::new();
        Selection::empty(1).write_to(&mut out).unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_select_success() {
        let (selector, args) = sh("printf 'X\\n'");
        let selection = selector.select(&args).unwrap();
        assert_eq!(selection, Selection::new(Some("X".to_string()), 0));
        assert!(selection.success());
    }

    #[test]
    fn test_select_failure_status_is_tools_status() {
        let (selector, args) = sh("exit 3");
        let selection = selector.select(&args).unwrap();
        assert_eq!(selection, Selection::empty(3));
    }

    #[test]
    fn test_select_keeps_first_line_only() {
        let (selector, args) = sh("printf 'one\\ntwo\\nthree\\n'");
        let selection = selector.select(&args).unwrap();
        assert_eq!(selection.text(), "one");
        assert_eq!(selection.status, 0);
    }

    #[test]
    fn test_select_failure_after_output_keeps_status() {
        let (selector, args) = sh("printf 'partial\\n'; exit 5");
        let selection = selector.select(&args).unwrap();
        assert_eq!(selection, Selection::new(Some("partial".to_string()), 5));
    }

    #[cfg(unix)]
    #[test]
    fn test_select_signal_status() {
        let (selector, args) = sh("kill -TERM $$");
        let selection = selector.select(&args).unwrap();
        assert_eq!(selection.status, 128 + 15);
    }

    #[cfg(unix)]
    #[test]
    fn test_select_closes_pipe_after_first_line() {
        // `yes` never stops on its own; it must die of the closed pipe
        let (selector, args) = sh("yes pick");
        let selection = selector.select(&args).unwrap();
        assert_eq!(selection, Selection::new(Some("pick".to_string()), 128 + 13));
    }

    #[test]
    fn test_select_scoped_restores_options() {
        use crate::options::{ALIASES, PIPEFAIL};

        let ambient: ShellOptions = [(ALIASES, true)].into_iter().collect();
        let mut options = ambient.clone();

        let (selector, args) = sh("echo ok");
        let selection = selector.select_scoped(&mut options, &args).unwrap();
        assert_eq!(selection.text(), "ok");
        assert_eq!(options, ambient);
        assert_eq!(options.get(PIPEFAIL), None);

        let broken = Selector::new("sh", "/nonexistent/how-shell/tty");
        assert!(broken.select_scoped(&mut options, &[]).is_err());
        assert_eq!(options, ambient);
    }

    #[test]
    fn test_select_program_not_found() {
        let selector = Selector::new("how-shell-test-no-such-program", "/dev/null");
        let selection = selector.select(&[]).unwrap();
        assert_eq!(selection, Selection::empty(NOT_FOUND_STATUS));
    }

    #[test]
    fn test_select_missing_terminal_is_error() {
        let selector = Selector::new("sh", "/nonexistent/how-shell/tty");
        let result = selector.select(&[]);
        assert!(matches!(result, Err(Error::Terminal { .. })));
    }

    #[test]
    fn test_run_writes_and_returns_status() {
        let (selector, args) = sh("printf 'foo \"bar\"\\n'");
        let mut out = Vec::new();
        let status = selector.run(&args, &mut out).unwrap();
        assert_eq!(status, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "foo \"bar\"\n");
    }

    #[test]
    fn test_default_selector() {
        let selector = Selector::default();
        assert_eq!(selector.program(), "how");
        assert_eq!(selector.terminal(), Path::new("/dev/tty"));
    }
}
