//! Configuration for how-shell.
//!
//! Settings come from built-in defaults, then an optional YAML file, then
//! whatever the command line overrides. The file looks like:
//!
//! ```yaml
//! program: ~/bin/how
//! terminal: /dev/tty
//! keybinding: "^G"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.how-shell/config.yml";

/// Lookup tool run by the selector
pub const DEFAULT_PROGRAM: &str = "how";
/// Terminal device the lookup tool reads from
pub const DEFAULT_TERMINAL: &str = "/dev/tty";
/// Key sequence bound to the widget, in caret notation
pub const DEFAULT_KEYBINDING: &str = "^G";

/// Contents of the configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub program: Option<String>,
    pub terminal: Option<String>,
    pub keybinding: Option<String>,
}

/// Values given on the command line, which win over the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub program: Option<String>,
    pub terminal: Option<String>,
    pub keybinding: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub program: String,
    pub terminal: PathBuf,
    pub keybinding: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            terminal: PathBuf::from(DEFAULT_TERMINAL),
            keybinding: DEFAULT_KEYBINDING.to_string(),
        }
    }
}

impl Config {
    /// Layers `file` and then `overrides` on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting program name is empty.
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self> {
        let defaults = Self::default();

        let program = overrides
            .program
            .or(file.program)
            .map_or(defaults.program, |program| expand(&program));
        if program.trim().is_empty() {
            return Err(Error::EmptyProgram);
        }

        let terminal = overrides
            .terminal
            .or(file.terminal)
            .map_or(defaults.terminal, |terminal| PathBuf::from(expand(&terminal)));

        let keybinding = overrides
            .keybinding
            .or(file.keybinding)
            .unwrap_or(defaults.keybinding);

        Ok(Self {
            program,
            terminal,
            keybinding,
        })
    }

    /// Loads the file at `config_path_arg` (or the default path) and applies
    /// `overrides`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// explicitly given file does not exist.
    pub fn load(config_path_arg: &Option<String>, overrides: Overrides) -> Result<Self> {
        let config_path = get_config_path(config_path_arg);
        debug!("Config path: `{}`", config_path);

        let file = match read_config_file(&config_path, config_path_arg.is_some())? {
            Some(file) => file,
            None => ConfigFile::default(),
        };

        Self::resolve(file, overrides)
    }
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    expand(config_path)
}

/// Reads and parses the configuration file.
///
/// A file that does not exist is `None` unless `required` is set.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened or contains
/// invalid YAML, or if it is `required` and missing.
pub fn read_config_file(path: &str, required: bool) -> Result<Option<ConfigFile>> {
    if !required && !Path::new(path).exists() {
        debug!("No config file at `{path}`, using defaults");
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| Error::io_error("config".to_string(), path.to_string(), e))?;

    if contents.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }

    serde_yaml::from_str(&contents).map(Some).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            path.to_string(),
            e,
        )
    })
}

fn expand(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}
