//! Command parsing.
//!
//! Turns a token list into a [`ParsedCommand`] by looking up the command in
//! the registry and applying its flag schema and argument bounds.
//!
//! Flag syntax:
//! - `--name` refers to a flag by long name.
//! - `-c` refers to a flag by short alias. A single dash followed by exactly
//!   one letter is always treated as a flag reference; other dash tokens
//!   such as `-5` or `-` are positional unless they match a declared alias.
//! - Quoted tokens are never flags, so `say "--loud"` passes `--loud` as an
//!   argument.
//! - Non-boolean flags consume the next token as their value. Boolean flags
//!   consume nothing.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::registry::{ArgumentType, CommandInfo, CommandRegistry};
use crate::tokenizer::{Token, TokenizeError, Tokenizer};

// =============================================================================
// Values
// =============================================================================

/// A typed flag value.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentValue {
    /// Text.
    String(String),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Switch state.
    Bool(bool),
}

impl ArgumentValue {
    /// Parses `text` as the given type.
    ///
    /// Numbers must consume the whole text. Booleans accept `true`, `yes`,
    /// `1`, `false`, `no`, and `0`.
    #[must_use]
    pub fn parse(text: &str, value_type: ArgumentType) -> Option<Self> {
        match value_type {
            ArgumentType::String => Some(Self::String(text.to_string())),
            ArgumentType::Int => text.parse().ok().map(Self::Int),
            ArgumentType::Float => text.parse().ok().map(Self::Float),
            ArgumentType::Bool => match text {
                "true" | "yes" | "1" => Some(Self::Bool(true)),
                "false" | "no" | "0" => Some(Self::Bool(false)),
                _ => None,
            },
        }
    }

    /// Returns the type of this value.
    #[must_use]
    pub const fn value_type(&self) -> ArgumentType {
        match self {
            Self::String(_) => ArgumentType::String,
            Self::Int(_) => ArgumentType::Int,
            Self::Float(_) => ArgumentType::Float,
            Self::Bool(_) => ArgumentType::Bool,
        }
    }

    /// Returns the text if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an int value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number if this is a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the state if this is a bool value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

// =============================================================================
// Parsed Command
// =============================================================================

/// A validated command ready for execution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedCommand {
    /// The registered command name.
    pub command_name: String,
    /// Positional arguments in input order.
    pub positional_args: Vec<String>,
    /// Flag values keyed by long flag name.
    pub flags: HashMap<String, ArgumentValue>,
    /// The line this was parsed from, when parsed from a line.
    pub raw_input: Option<String>,
}

impl ParsedCommand {
    /// Creates a command with no arguments or flags.
    #[must_use]
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            ..Self::default()
        }
    }

    /// Returns positional argument `index`.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.positional_args.get(index).map(String::as_str)
    }

    /// Returns the number of positional arguments.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.positional_args.len()
    }

    /// Returns a flag value by long name.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&ArgumentValue> {
        self.flags.get(name)
    }

    /// Returns true if the flag was given.
    #[must_use]
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Returns a boolean flag, `false` when absent.
    #[must_use]
    pub fn flag_enabled(&self, name: &str) -> bool {
        self.flag(name)
            .and_then(ArgumentValue::as_bool)
            .unwrap_or(false)
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Structural errors found while matching tokens against a command schema.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No tokens to parse.
    #[error("empty command")]
    EmptyCommand,

    /// The first token names no registered command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A flag the command does not declare.
    #[error("unknown flag '{flag}' for command '{command}'")]
    UnknownFlag {
        /// The command being parsed.
        command: String,
        /// The flag as written.
        flag: String,
    },

    /// A non-boolean flag was the last token.
    #[error("flag --{flag} requires a {expected} value")]
    MissingFlagValue {
        /// Long flag name.
        flag: String,
        /// Declared type.
        expected: ArgumentType,
    },

    /// A flag value did not parse as the declared type.
    #[error("invalid value '{value}' for flag --{flag}: expected {expected}")]
    InvalidFlagValue {
        /// Long flag name.
        flag: String,
        /// Declared type.
        expected: ArgumentType,
        /// The offending text.
        value: String,
    },

    /// A required flag was not given.
    #[error("missing required flag --{0}")]
    MissingRequiredFlag(String),

    /// Positional argument count out of bounds.
    #[error(
        "wrong number of arguments for '{command}': expected {}, got {actual}",
        describe_bounds(.min, .max)
    )]
    ArgumentCountError {
        /// The command being parsed.
        command: String,
        /// Declared minimum.
        min: usize,
        /// Declared maximum, zero for unbounded.
        max: usize,
        /// Number given.
        actual: usize,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)] // thiserror passes fields by reference
fn describe_bounds(min: &usize, max: &usize) -> String {
    match (*min, *max) {
        (min, 0) => format!("at least {min}"),
        (min, max) if min == max => format!("exactly {min}"),
        (min, max) => format!("{min} to {max}"),
    }
}

/// Any failure turning a line into a [`ParsedCommand`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The line could not be tokenized.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// The tokens did not match a command.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

// =============================================================================
// Parser
// =============================================================================

/// How a token refers to a flag.
enum FlagRef<'t> {
    Long(&'t str),
    Short(char),
}

fn flag_reference<'t>(token: &'t Token, info: &CommandInfo) -> Option<FlagRef<'t>> {
    if token.is_quoted {
        return None;
    }
    if let Some(name) = token.value.strip_prefix("--") {
        return Some(FlagRef::Long(name));
    }
    let rest = token.value.strip_prefix('-')?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() || info.find_short_flag(c).is_some() => {
            Some(FlagRef::Short(c))
        }
        _ => None,
    }
}

/// Parses tokens against a command registry.
pub struct CommandParser;

impl CommandParser {
    /// Parses a token list.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the command is unknown, a flag is unknown
    /// or malformed, a required flag is missing, or the positional argument
    /// count is out of bounds.
    pub fn parse(tokens: &[Token], registry: &CommandRegistry) -> Result<ParsedCommand, ParseError> {
        let (head, rest) = tokens.split_first().ok_or(ParseError::EmptyCommand)?;
        let info = registry
            .get(&head.value)
            .ok_or_else(|| ParseError::UnknownCommand(head.value.clone()))?;

        let mut parsed = ParsedCommand::new(info.name.clone());
        let mut iter = rest.iter();

        while let Some(token) = iter.next() {
            let Some(reference) = flag_reference(token, info) else {
                parsed.positional_args.push(token.value.clone());
                continue;
            };

            let definition = match reference {
                FlagRef::Long(name) => info.find_flag(name),
                FlagRef::Short(c) => info.find_short_flag(c),
            }
            .ok_or_else(|| ParseError::UnknownFlag {
                command: info.name.clone(),
                flag: token.value.clone(),
            })?;

            let value = if definition.value_type == ArgumentType::Bool {
                ArgumentValue::Bool(true)
            } else {
                let raw = iter.next().ok_or_else(|| ParseError::MissingFlagValue {
                    flag: definition.name.clone(),
                    expected: definition.value_type,
                })?;
                ArgumentValue::parse(&raw.value, definition.value_type).ok_or_else(|| {
                    ParseError::InvalidFlagValue {
                        flag: definition.name.clone(),
                        expected: definition.value_type,
                        value: raw.value.clone(),
                    }
                })?
            };

            parsed.flags.insert(definition.name.clone(), value);
        }

        if let Some(missing) = info
            .flags
            .iter()
            .find(|f| f.required && !parsed.flags.contains_key(&f.name))
        {
            return Err(ParseError::MissingRequiredFlag(missing.name.clone()));
        }

        if !info.accepts_arg_count(parsed.positional_args.len()) {
            return Err(ParseError::ArgumentCountError {
                command: info.name.clone(),
                min: info.min_args,
                max: info.max_args,
                actual: parsed.positional_args.len(),
            });
        }

        Ok(parsed)
    }

    /// Tokenizes and parses a raw line, keeping the line in
    /// [`ParsedCommand::raw_input`].
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::EmptyInput`] for a blank line, any other
    /// tokenizer error, or a [`ParseError`].
    pub fn parse_line(input: &str, registry: &CommandRegistry) -> Result<ParsedCommand, CommandError> {
        let tokens = Tokenizer::tokenize_nonempty(input)?;
        let mut parsed = Self::parse(&tokens, registry)?;
        parsed.raw_input = Some(input.to_string());
        Ok(parsed)
    }
}
