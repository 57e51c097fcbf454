//! Argument quoting and splitting for the handoff command line.
//!
//! A double quote toggles "inside a literal value"; outside of quotes the
//! input is split on spaces. Quotes are never part of a token. Values
//! containing `"` cannot be represented.

/// Wrap `value` in double quotes for passing across the process boundary.
#[must_use]
pub fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

/// Split a raw argument string into tokens, honouring quoted values.
///
/// Runs of unquoted spaces never produce empty tokens. An empty quoted
/// value (`""`) is dropped as well.
#[must_use]
pub fn split_command_line(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
