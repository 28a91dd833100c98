use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use how_shell_cli::cli_args::Args;
use how_shell_cli::commands::{execute, exit_status};
use log::info;

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let mut stdout = stdout().lock();

    match execute(&args, &mut stdout) {
        Ok(status) => {
            info!("Exiting with status {status}");
            ExitCode::from(exit_status(status))
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
