//! POSIX single-quote escaping for values baked into generated scripts.

/// Quotes `value` for a POSIX shell unless it is a non-empty run of
/// characters that need no quoting.
pub fn escape<S: AsRef<str>>(value: S) -> String {
    let value = value.as_ref();
    if !value.is_empty() && value.chars().all(is_bare) {
        return value.to_string();
    }

    // Inside single quotes only `'` is special: close, quote it, reopen
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

fn is_bare(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "_-./:@%+=".contains(ch)
}
