//! Error types for the Necromancer's Shell.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Lexical and structural command errors live next to the tokenizer and
//! parser. This type covers everything around them: file persistence,
//! configuration, the terminal, and invalid construction parameters.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for shell infrastructure operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an I/O error tied to a file path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Creates an invalid capacity error.
    #[must_use]
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::new(ErrorKind::InvalidCapacity(capacity))
    }

    /// Creates a terminal error.
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// Configuration could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// A fixed-capacity structure was requested with an unusable capacity.
    #[error("invalid capacity: {0}")]
    InvalidCapacity(usize),

    /// The line editor failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was running.
    pub operation: Option<String>,
    /// The input line being processed, if any.
    pub input: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the input line.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "while {operation}")?;
        }
        if let Some(input) = &self.input {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "(input: {input:?})")?;
        }
        Ok(())
    }
}

/// Result type alias using the shell [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
