//! Input highlighting for the REPL.

use std::borrow::Cow;

use necroshell_command::CommandRegistry;

const RESET: &str = "\x1b[0m";
const KNOWN_COMMAND: &str = "\x1b[1;32m"; // bold green
const UNKNOWN_COMMAND: &str = "\x1b[31m"; // red
const FLAG: &str = "\x1b[36m"; // cyan
const QUOTED: &str = "\x1b[33m"; // yellow
const NUMBER: &str = "\x1b[35m"; // magenta

/// Colors a partial command line by token role.
pub struct ShellHighlighter;

impl ShellHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Highlights a line. The first word is colored by whether it names a
    /// registered command.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, registry: &CommandRegistry) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut rest = line;
        let mut first = true;

        while !rest.is_empty() {
            let gap = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
            result.push_str(&rest[..gap]);
            rest = &rest[gap..];
            if rest.is_empty() {
                break;
            }

            let end = word_end(rest);
            let word = &rest[..end];
            rest = &rest[end..];

            let color = if first {
                if registry.exists(word) {
                    KNOWN_COMMAND
                } else {
                    UNKNOWN_COMMAND
                }
            } else if word.starts_with('"') || word.starts_with('\'') {
                QUOTED
            } else if word.starts_with("--") || is_short_flag(word) {
                FLAG
            } else if word.parse::<f64>().is_ok() {
                NUMBER
            } else {
                ""
            };
            first = false;

            if color.is_empty() {
                result.push_str(word);
            } else {
                result.push_str(color);
                result.push_str(word);
                result.push_str(RESET);
            }
        }

        Cow::Owned(result)
    }
}

impl Default for ShellHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_short_flag(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next() == Some('-') && chars.next().is_some_and(char::is_alphabetic) && chars.next().is_none()
}

/// Byte offset where the word at the start of `text` ends, honoring quotes
/// and backslash escapes. An unclosed quote runs to the end of the text.
fn word_end(text: &str) -> usize {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"') | None, '\\') => escaped = true,
            (None, '"' | '\'') => quote = Some(c),
            (None, c) if c.is_whitespace() => return i,
            _ => {}
        }
    }
    text.len()
}
