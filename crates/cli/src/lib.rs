//! How Shell CLI Library
//!
//! This crate provides the `how-shell` binary. It exposes the selector to
//! shell snippets and renders those snippets.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`commands`]: The `select` and `init` subcommands
//!
//! # Examples
//!
//! ```bash
//! # Add the widget to zsh (in ~/.zshrc)
//! eval "$(how-shell init zsh)"
//!
//! # Bind a different key in bash (in ~/.bashrc)
//! eval "$(how-shell init bash --keybinding '^X^H')"
//!
//! # Run the lookup tool by hand, forwarding arguments to it
//! how-shell select -- docker
//! ```

pub mod cli_args;
pub mod commands;
