//! The keybinding handler that inserts a selection into the edit line.

use log::debug;

use crate::error::Result;
use crate::options::ShellOptions;
use crate::selector::SelectionSource;

/// Handle on the editing session the widget runs in.
pub trait LineEditor {
    /// Text left of the cursor.
    fn left_buffer(&self) -> &str;

    /// Text right of the cursor.
    fn right_buffer(&self) -> &str;

    fn set_left_buffer(&mut self, left: String);

    /// Redraws the prompt and the edit line.
    fn reset_prompt(&mut self);

    fn options_mut(&mut self) -> &mut ShellOptions;
}

/// An edit line held in memory, split at the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    left: String,
    right: String,
    options: ShellOptions,
    redraws: usize,
}

impl LineBuffer {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: ShellOptions) -> Self {
        self.options = options;
        self
    }

    /// The whole line.
    pub fn line(&self) -> String {
        format!("{}{}", self.left, self.right)
    }

    /// Byte offset of the cursor in [`LineBuffer::line`].
    pub fn cursor(&self) -> usize {
        self.left.len()
    }

    pub fn options(&self) -> &ShellOptions {
        &self.options
    }

    /// How many times the prompt has been redrawn.
    pub fn redraws(&self) -> usize {
        self.redraws
    }
}

impl LineEditor for LineBuffer {
    fn left_buffer(&self) -> &str {
        &self.left
    }

    fn right_buffer(&self) -> &str {
        &self.right
    }

    fn set_left_buffer(&mut self, left: String) {
        self.left = left;
    }

    fn reset_prompt(&mut self) {
        self.redraws += 1;
    }

    fn options_mut(&mut self) -> &mut ShellOptions {
        &mut self.options
    }
}

/// Runs `source` and appends its selection to the left of the cursor.
///
/// The source runs with [`crate::options::SELECTOR_OPTIONS`] in effect on the editor's
/// options; they are restored before the buffer is touched. The prompt is
/// redrawn exactly once whatever the outcome, and the selection's status is
/// returned unchanged.
///
/// # Errors
///
/// Returns the source's error, in which case the buffer is left as it was.
pub fn insert_selection<E, S>(editor: &mut E, source: &S) -> Result<i32>
where
    E: LineEditor + ?Sized,
    S: SelectionSource + ?Sized,
{
    let result = source.select_scoped(editor.options_mut(), &[]);

    let selection = match result {
        Ok(selection) => selection,
        Err(e) => {
            editor.reset_prompt();
            return Err(e);
        }
    };

    // Command substitution drops trailing newlines
    let text = selection.text().trim_end_matches('\n');
    if text.is_empty() {
        debug!("Nothing to insert (status {})", selection.status);
    } else {
        let left = format!("{}{}", editor.left_buffer(), text);
        editor.set_left_buffer(left);
    }

    if !selection.success() {
        debug!("Selector exited with status {}", selection.status);
    }

    editor.reset_prompt();
    Ok(selection.status)
}
