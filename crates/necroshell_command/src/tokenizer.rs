//! Input tokenization.
//!
//! Splits a raw input line into tokens with a flat six-state machine:
//!
//! ```text
//! Initial ──char──▶ InToken ──ws──▶ Initial
//!    │ ' "  \          │ ' "  \
//!    ▼                 ▼
//! InSingleQuote   InDoubleQuote ──\──▶ EscapeInDoubleQuote
//!                      Escape ──any──▶ InToken
//! ```
//!
//! - Unquoted whitespace separates tokens; runs of whitespace collapse.
//! - Single quotes are literal until the closing quote.
//! - Double quotes process backslash escapes.
//! - Quoted and unquoted segments concatenate: `foo"bar baz"` is one token.

use thiserror::Error;

/// A token from player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The unquoted, unescaped text.
    pub value: String,
    /// Whether any part of the token came from inside quotes.
    pub is_quoted: bool,
}

impl Token {
    /// Creates a token that was not quoted.
    #[must_use]
    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_quoted: false,
        }
    }

    /// Creates a token that came (at least partly) from inside quotes.
    #[must_use]
    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_quoted: true,
        }
    }

    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Lexical errors. Any of these aborts tokenization of the whole line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// Input ended inside a single- or double-quoted section.
    #[error("unclosed quote")]
    UnclosedQuote,
    /// Input ended directly after a backslash.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// A token buffer could not be grown.
    #[error("memory allocation failed")]
    OutOfMemory,
    /// A command was required but the line held no tokens.
    #[error("empty input")]
    EmptyInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Initial,
    InToken,
    InSingleQuote,
    InDoubleQuote,
    Escape,
    EscapeInDoubleQuote,
}

/// Maps the character after a backslash. Unknown escapes pass through.
fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        // '\\', '"', '\'' and everything else map to themselves
        other => other,
    }
}

/// Tokenizer state while walking one line.
struct Machine {
    state: State,
    buffer: String,
    quoted: bool,
    tokens: Vec<Token>,
}

impl Machine {
    fn new() -> Self {
        Self {
            state: State::Initial,
            buffer: String::new(),
            quoted: false,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, ch: char) -> Result<(), TokenizeError> {
        self.buffer
            .try_reserve(ch.len_utf8())
            .map_err(|_| TokenizeError::OutOfMemory)?;
        self.buffer.push(ch);
        Ok(())
    }

    fn emit(&mut self) -> Result<(), TokenizeError> {
        self.tokens
            .try_reserve(1)
            .map_err(|_| TokenizeError::OutOfMemory)?;
        self.tokens.push(Token {
            value: std::mem::take(&mut self.buffer),
            is_quoted: self.quoted,
        });
        self.quoted = false;
        Ok(())
    }

    fn step(&mut self, ch: char) -> Result<(), TokenizeError> {
        self.state = match self.state {
            State::Initial => match ch {
                c if c.is_whitespace() => State::Initial,
                '"' => {
                    self.quoted = true;
                    State::InDoubleQuote
                }
                '\'' => {
                    self.quoted = true;
                    State::InSingleQuote
                }
                '\\' => State::Escape,
                c => {
                    self.push(c)?;
                    State::InToken
                }
            },
            State::InToken => match ch {
                c if c.is_whitespace() => {
                    self.emit()?;
                    State::Initial
                }
                '"' => {
                    self.quoted = true;
                    State::InDoubleQuote
                }
                '\'' => {
                    self.quoted = true;
                    State::InSingleQuote
                }
                '\\' => State::Escape,
                c => {
                    self.push(c)?;
                    State::InToken
                }
            },
            State::InSingleQuote => match ch {
                '\'' => State::InToken,
                c => {
                    self.push(c)?;
                    State::InSingleQuote
                }
            },
            State::InDoubleQuote => match ch {
                '"' => State::InToken,
                '\\' => State::EscapeInDoubleQuote,
                c => {
                    self.push(c)?;
                    State::InDoubleQuote
                }
            },
            State::Escape => {
                self.push(unescape(ch))?;
                State::InToken
            }
            State::EscapeInDoubleQuote => {
                self.push(unescape(ch))?;
                State::InDoubleQuote
            }
        };
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Token>, TokenizeError> {
        match self.state {
            State::InSingleQuote | State::InDoubleQuote => Err(TokenizeError::UnclosedQuote),
            State::Escape | State::EscapeInDoubleQuote => Err(TokenizeError::InvalidEscape),
            State::InToken => {
                self.emit()?;
                Ok(self.tokens)
            }
            State::Initial => Ok(self.tokens),
        }
    }
}

/// Tokenizes player input.
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenizes a raw input line.
    ///
    /// Empty or whitespace-only input yields an empty token list. A quoted
    /// empty string (`""`) yields an empty token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::UnclosedQuote`] if the line ends inside
    /// quotes, [`TokenizeError::InvalidEscape`] if it ends right after a
    /// backslash, and [`TokenizeError::OutOfMemory`] if a buffer cannot grow.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
        let mut machine = Machine::new();
        for ch in input.chars() {
            machine.step(ch)?;
        }
        machine.finish()
    }

    /// Tokenizes a line that must contain at least one token.
    ///
    /// # Errors
    ///
    /// Same as [`Tokenizer::tokenize`], plus [`TokenizeError::EmptyInput`]
    /// when the line is blank.
    pub fn tokenize_nonempty(input: &str) -> Result<Vec<Token>, TokenizeError> {
        let tokens = Self::tokenize(input)?;
        if tokens.is_empty() {
            return Err(TokenizeError::EmptyInput);
        }
        Ok(tokens)
    }
}
