//! How Shell Core Library
//!
//! This crate provides the core functionality for how-shell, which binds a key
//! in an interactive shell to the `how` lookup tool and inserts the command it
//! picks at the cursor.
//!
//! # Key Features
//!
//! - **Selector**: Run the lookup tool on the terminal device and capture one line
//! - **Widget**: Splice the captured line into an edit buffer and redraw
//! - **Option Scoping**: Apply shell option overrides for the length of a call
//! - **Shell Integration**: Render zsh and bash snippets that bind the widget
//! - **Configuration**: Defaults, an optional YAML file and command-line overrides
//!
//! # Examples
//!
//! Inserting a selection into an in-memory edit line:
//!
//! ```no_run
//! use how_shell_core::selector::Selector;
//! use how_shell_core::widget::{insert_selection, LineBuffer, LineEditor};
//!
//! let mut line = LineBuffer::new("sudo ", "");
//! let status = insert_selection(&mut line, &Selector::default())?;
//! println!("{} (status {status})", line.left_buffer());
//! # Ok::<(), how_shell_core::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod selector;
pub mod shell;
pub mod widget;
