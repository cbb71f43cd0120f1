use std::io::{self, Write};

use crate::error::{Error, ParseError, RunError};

/// Pretty-print an [`Error`] to stderr, with caret positioning for parse errors.
/// If `program` is `Some("bf")`, prefix messages with "bf: ..."
pub fn print_error(program: Option<&str>, code: &str, err: &Error) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    match err {
        Error::Parse(ParseError::UnmatchedBracket {
            kind,
            offset,
            line,
            column,
            ..
        }) => {
            let msg = prefix_program(&format!(
                "Parse error: unmatched bracket {kind} at line {line}, column {column}"
            ));
            print_error_with_context(&msg, code, *offset);
        }
        Error::Run(RunError::Io { ip, source }) => {
            eprintln!(
                "{}",
                prefix_program(&format!("I/O error at instruction {ip}: {source}"))
            );
        }
        other => eprintln!("{}", prefix_program(&other.to_string())),
    }
    let _ = io::stderr().flush();
}

/// Print a concise error followed by a window of the source with a caret
/// under char offset `pos`. Newlines in the window are shown as spaces so the
/// caret stays aligned.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    eprintln!("{prefix}");
    let (window, caret) = context_window(code, pos);
    eprintln!("  {window}");
    eprintln!("  {caret}");
    let _ = io::stderr().flush();
}

fn context_window(code: &str, pos: usize) -> (String, String) {
    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let window: String = code
        .chars()
        .skip(start_char)
        .take(end_char.saturating_sub(start_char))
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    let mut underline = " ".repeat(pos.saturating_sub(start_char));
    underline.push('^');
    (window, underline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_at_offset() {
        let (window, caret) = context_window("++\n+]", 4);
        assert_eq!(window, "++ +]");
        assert_eq!(caret, "    ^");
    }

    #[test]
    fn window_is_clipped_around_long_sources() {
        let code = "+".repeat(100) + "]" + &"-".repeat(100);
        let (window, caret) = context_window(&code, 100);
        assert_eq!(window.chars().count(), 65);
        assert_eq!(caret.len(), 33);
        assert_eq!(window.chars().nth(32), Some(']'));
    }

    #[test]
    fn multibyte_characters_count_as_one_column() {
        let (window, caret) = context_window("é[", 1);
        assert_eq!(window, "é[");
        assert_eq!(caret, " ^");
    }
}
