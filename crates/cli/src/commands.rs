//! The `select` and `init` subcommands.

use std::env;
use std::io::Write;

use how_shell_core::config::Config;
use how_shell_core::error::Result;
use how_shell_core::selector::Selector;
use how_shell_core::shell::{integration, Shell};
use log::debug;

use crate::cli_args::{Action, Args};

/// Name the snippets fall back to when the executable path is unknown
pub const BINARY_NAME: &str = "how-shell";

/// Runs the requested subcommand, writing its result to `out`.
///
/// Returns the status the process should exit with.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the lookup tool
/// cannot be attempted, or a snippet cannot be rendered.
pub fn execute<W: Write>(args: &Args, out: &mut W) -> Result<i32> {
    let config = Config::load(&args.config_path, args.overrides())?;
    debug!("Resolved config: {config:?}");

    match &args.action {
        Action::Select { arguments, .. } => select(&config, arguments, out),
        Action::Init { shell, .. } => {
            init(*shell, &current_binary(), &config, out)?;
            Ok(0)
        }
    }
}

/// Runs the lookup tool and writes the picked line to `out`.
///
/// # Errors
///
/// Returns an error if the lookup tool cannot be attempted or `out` cannot
/// be written.
pub fn select<W: Write>(config: &Config, arguments: &[String], out: &mut W) -> Result<i32> {
    Selector::from(config).run(arguments, out)
}

/// Writes the integration snippet for `shell` to `out`.
///
/// # Errors
///
/// Returns an error if the keybinding is invalid or `out` cannot be written.
pub fn init<W: Write>(shell: Shell, binary: &str, config: &Config, out: &mut W) -> Result<()> {
    let script = integration::script(shell, binary, config)?;
    out.write_all(script.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn current_binary() -> String {
    env::current_exe()
        .ok()
        .and_then(|path| path.to_str().map(ToString::to_string))
        .unwrap_or_else(|| BINARY_NAME.to_string())
}

/// Maps a status onto what a process can exit with.
pub fn exit_status(status: i32) -> u8 {
    u8::try_from(status).unwrap_or(1)
}
