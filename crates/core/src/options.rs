//! Shell option state and scoped overrides.
//!
//! A [`LocalOptions`] guard snapshots the whole option set when it is created
//! and puts the snapshot back when it is dropped, so anything changed inside
//! the scope (the requested overrides or later toggles) is undone on every
//! exit path.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use log::trace;

/// Status of a pipeline is the last non-zero status of its members.
pub const PIPEFAIL: &str = "pipefail";
/// Alias expansion of command words.
pub const ALIASES: &str = "aliases";

/// Overrides applied for the duration of a selector call.
pub const SELECTOR_OPTIONS: &[(&str, bool)] = &[(PIPEFAIL, true), (ALIASES, false)];

/// Named boolean options of an interactive shell session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOptions {
    values: BTreeMap<String, bool>,
}

impl ShellOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `name`, or `None` if it has never been set.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Whether `name` is on. Unset options are off.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// Sets `name` and returns its previous value.
    pub fn set(&mut self, name: &str, value: bool) -> Option<bool> {
        self.values.insert(name.to_string(), value)
    }

    /// Removes `name` and returns its previous value.
    pub fn unset(&mut self, name: &str) -> Option<bool> {
        self.values.remove(name)
    }

    /// Applies `overrides` until the returned guard is dropped.
    pub fn localize(&mut self, overrides: &[(&str, bool)]) -> LocalOptions<'_> {
        let saved = self.values.clone();
        for (name, value) in overrides {
            trace!("Localizing option `{name}` = {value}");
            self.set(name, *value);
        }

        LocalOptions {
            options: self,
            saved,
        }
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for ShellOptions {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// Guard returned by [`ShellOptions::localize`].
#[derive(Debug)]
pub struct LocalOptions<'a> {
    options: &'a mut ShellOptions,
    saved: BTreeMap<String, bool>,
}

impl Deref for LocalOptions<'_> {
    type Target = ShellOptions;

    fn deref(&self) -> &Self::Target {
        self.options
    }
}

impl DerefMut for LocalOptions<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.options
    }
}

impl Drop for LocalOptions<'_> {
    fn drop(&mut self) {
        trace!("Restoring {} shell option(s)", self.saved.len());
        self.options.values = std::mem::take(&mut self.saved);
    }
}
