// Bracket-string formatting
//
// Lays out a tree written with doubled parentheses: every even-numbered open
// parenthesis starts a nesting level, odd ones are literal text.

use crate::record::INDENT_UNIT;
use crate::traits::{Error, Result};

/// Format a doubled-parenthesis tree string into an indented layout.
///
/// Parentheses alternate meaning by a running open count: when the count
/// reaches an even number the `(` opens a structural level (newline and
/// indent after it), when odd it is copied verbatim. Closing parentheses
/// mirror the rule. A space not followed by a parenthesis breaks the line,
/// and the continuation line carries one extra leading space.
///
/// # Errors
///
/// * [`Error::UnbalancedParens`] if a `)` has no matching `(`
/// * [`Error::UnclosedParens`] if the input ends with parentheses open
pub fn format_bracket_tree(text: &str) -> Result<String> {
    let mut formatted = String::with_capacity(text.len() * 2);
    let mut level = 0usize;
    let mut open = 0usize;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        match ch {
            '(' => {
                open += 1;
                if open % 2 == 0 {
                    if prev.is_some_and(|p| p != '(' && p != ' ') {
                        formatted.push('\n');
                        push_indent(&mut formatted, level);
                    }
                    formatted.push('(');
                    formatted.push('\n');
                    level += 1;
                    push_indent(&mut formatted, level);
                } else {
                    formatted.push('(');
                }
            }
            ')' => {
                if open == 0 {
                    return Err(Error::UnbalancedParens { offset });
                }
                if open % 2 == 0 {
                    level -= 1;
                    formatted.push('\n');
                    push_indent(&mut formatted, level);
                }
                formatted.push(')');
                open -= 1;
            }
            ' ' if next != Some('(') && next != Some(')') => {
                formatted.push(' ');
                formatted.push_str("\n ");
                push_indent(&mut formatted, level);
            }
            other => formatted.push(other),
        }
        prev = Some(ch);
    }

    if open != 0 {
        return Err(Error::UnclosedParens { open });
    }

    tracing::trace!(input = text.len(), output = formatted.len(), "formatted bracket tree");
    Ok(formatted)
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT_UNIT);
    }
}
