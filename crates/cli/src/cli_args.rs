//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate.

use clap::{Parser, Subcommand};
use how_shell_core::config::Overrides;
use how_shell_core::shell::Shell;

/// Command-line arguments for the how-shell CLI tool.
#[derive(Parser, Debug)] // requires `derive` feature
#[command(name = "how-shell", version, about, term_width = 0)]
pub struct Args {
    /// Path to the configuration file YAML.
    ///
    /// If not provided, defaults to `~/.how-shell/config.yml`.
    #[arg(long, short = 'c', global = true)]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Action {
    /// Run the lookup tool on the terminal and print the line it picks.
    ///
    /// Exits with the lookup tool's own status.
    Select {
        /// Lookup tool to run instead of `how`.
        #[arg(long, short = 'p')]
        program: Option<String>,

        /// Terminal device the lookup tool reads from.
        #[arg(long, short = 't')]
        terminal: Option<String>,

        /// Arguments forwarded unchanged to the lookup tool.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        arguments: Vec<String>,
    },

    /// Print the shell snippet that binds the widget.
    Init {
        /// Shell to render for (`zsh` or `bash`).
        shell: Shell,

        /// Key sequence in caret notation, e.g. `^G`.
        #[arg(long, short = 'k')]
        keybinding: Option<String>,
    },
}

impl Args {
    /// Settings given on the command line, layered over the config file.
    pub fn overrides(&self) -> Overrides {
        match &self.action {
            Action::Select {
                program, terminal, ..
            } => Overrides {
                program: program.clone(),
                terminal: terminal.clone(),
                keybinding: None,
            },
            Action::Init { keybinding, .. } => Overrides {
                keybinding: keybinding.clone(),
                ..Overrides::default()
            },
        }
    }
}
