//! Command interpreter core for the Necromancer's Shell.
//!
//! This crate turns a raw line of player input like `raise zombie --count 3`
//! into a validated command, routes it to a registered handler, and returns
//! a structured result.
//!
//! # Architecture
//!
//! ```text
//! "raise zombie --count 3"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["raise", "zombie", "--count", "3"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   PARSER        │  → raise { args: ["zombie"], flags: {count: Int(3)} }
//! │  (+ REGISTRY)   │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   EXECUTOR      │  → handler(parsed) → CommandResult
//! └─────────────────┘
//! ```
//!
//! [`Autocomplete`] and [`CommandHistory`] work on the raw or partial line
//! alongside this pipeline.
//!
//! # Modules
//!
//! - [`tokenizer`] - Quote and escape aware line splitting
//! - [`registry`] - Command metadata, flag schemas, and handler bindings
//! - [`parser`] - Typed flag and positional argument parsing
//! - [`executor`] - Handler dispatch and result construction
//! - [`autocomplete`] - Prefix completion for commands, flags, and custom words
//! - [`history`] - Bounded, persisted input history

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod autocomplete;
pub mod executor;
pub mod history;
pub mod parser;
pub mod registry;
pub mod tokenizer;


// Re-export main types for convenience
pub use autocomplete::{Autocomplete, CompletionContext};
pub use executor::{CommandContext, CommandResult, ExecutionStatus, Executor};
pub use history::CommandHistory;
pub use parser::{ArgumentValue, CommandError, CommandParser, ParseError, ParsedCommand};
pub use registry::{ArgumentType, CommandHandler, CommandInfo, CommandRegistry, FlagDefinition};
pub use tokenizer::{Token, TokenizeError, Tokenizer};
