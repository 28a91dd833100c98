//! Shell integration.
//!
//! The widget itself has to live inside the user's shell, so this module
//! renders the snippet that defines it. The snippet calls back into the
//! `select` subcommand, whose **stdout** carries the selected line and whose
//! exit status is the lookup tool's.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

pub mod escape;
pub mod integration;

/// Shells an integration snippet can be rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Zsh,
    Bash,
}

impl Shell {
    pub const ALL: [Shell; 2] = [Shell::Zsh, Shell::Bash];

    pub fn name(self) -> &'static str {
        match self {
            Shell::Zsh => "zsh",
            Shell::Bash => "bash",
        }
    }
}

impl Display for Shell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shell::ALL
            .into_iter()
            .find(|shell| shell.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownShell(s.to_string()))
    }
}
