//! Renders the widget snippets users source from their shell rc file.

use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::shell::escape::escape;
use crate::shell::Shell;

/// Renders the integration snippet for `shell`.
///
/// `binary` is how the snippet invokes this program, usually the absolute
/// path of the running executable.
///
/// # Errors
///
/// Returns an error if the configured keybinding is not usable.
pub fn script(shell: Shell, binary: &str, config: &Config) -> Result<String> {
    debug!("Rendering {shell} integration for `{binary}`");
    match shell {
        Shell::Zsh => zsh_script(binary, config),
        Shell::Bash => bash_script(binary, config),
    }
}

/// Checks that `key` can be embedded in a binding command.
///
/// # Errors
///
/// Returns [`Error::InvalidKeybinding`] for empty sequences, quotes, line
/// breaks and a trailing `^` with nothing to control.
pub fn validate_keybinding(key: &str) -> Result<()> {
    let invalid = |reason| Err(Error::InvalidKeybinding(key.to_string(), reason));

    if key.is_empty() {
        return invalid("keybinding may not be empty");
    }
    if key.contains(['\'', '"']) {
        return invalid("keybinding may not contain quotes");
    }
    if key.contains(['\n', '\r']) {
        return invalid("keybinding may not contain line breaks");
    }
    if key.ends_with('^') && !key.ends_with("^^") {
        return invalid("`^` must be followed by a character");
    }

    Ok(())
}

/// Translates caret notation (`^G`, `^X^H`, `^[h`) to readline notation
/// (`\C-g`, `\C-x\C-h`, `\eh`). Anything else is kept as written.
///
/// # Errors
///
/// Returns an error if the keybinding is invalid.
pub fn readline_key_sequence(key: &str) -> Result<String> {
    validate_keybinding(key)?;

    let mut sequence = String::with_capacity(key.len() * 2);
    let mut chars = key.chars();
    while let Some(ch) = chars.next() {
        if ch != '^' {
            sequence.push(ch);
            continue;
        }

        match chars.next() {
            Some('[') => sequence.push_str("\\e"),
            Some(control) => {
                sequence.push_str("\\C-");
                sequence.push(control.to_ascii_lowercase());
            }
            None => sequence.push('^'),
        }
    }

    Ok(sequence)
}

fn select_command(binary: &str, config: &Config) -> String {
    format!(
        "command {} select --program {} --terminal {} --",
        escape(binary),
        escape(&config.program),
        escape(config.terminal.to_string_lossy()),
    )
}

/// Returns the zsh snippet users should add to their `.zshrc`.
///
/// # Errors
///
/// Returns an error if the configured keybinding is not usable.
pub fn zsh_script(binary: &str, config: &Config) -> Result<String> {
    validate_keybinding(&config.keybinding)?;
    let select = select_command(binary, config);
    let key = &config.keybinding;
    let program = &config.program;

    Ok(format!(
        r#"
# ── how-shell: insert a `{program}` lookup at the cursor ──────────────
# Press {key} to pick a command; it is appended left of the cursor.
__how_shell_select() {{
    setopt localoptions pipefail no_aliases 2>/dev/null
    {select} "$@"
}}

__how_shell_widget() {{
    LBUFFER="${{LBUFFER}}$(__how_shell_select)"
    local ret=$?
    zle reset-prompt
    return $ret
}}

zle -N __how_shell_widget
bindkey '{key}' __how_shell_widget
"#
    ))
}

/// Returns the bash snippet users should add to their `.bashrc`.
///
/// # Errors
///
/// Returns an error if the configured keybinding is not usable.
pub fn bash_script(binary: &str, config: &Config) -> Result<String> {
    let key = readline_key_sequence(&config.keybinding)?;
    let select = select_command(binary, config);
    let program = &config.program;
    let caret = &config.keybinding;

    Ok(format!(
        r#"
# ── how-shell: insert a `{program}` lookup at the cursor ──────────────
# Press {caret} to pick a command; it is inserted at the cursor.
__how_shell_widget() {{
    local selected ret
    selected="$({select})"
    ret=$?
    READLINE_LINE="${{READLINE_LINE:0:$READLINE_POINT}}${{selected}}${{READLINE_LINE:$READLINE_POINT}}"
    READLINE_POINT=$(( READLINE_POINT + ${{#selected}} ))
    return $ret
}}

bind -x '"{key}": __how_shell_widget'
"#
    ))
}
