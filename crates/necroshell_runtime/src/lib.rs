//! Interpreter session, REPL, and CLI for the Necromancer's Shell.
//!
//! This crate provides:
//! - [`Interpreter`] - A session owning the registry, completion, and history
//! - [`ShellConfig`] - Session configuration, loadable from TOML
//! - [`builtins`] - `help`, `quit`, `exit`, `clear`, `history`, and `log`
//! - [`Repl`] - Interactive loop over a swappable [`LineEditor`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtins;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod repl;
pub mod session;

pub use config::ShellConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use session::Interpreter;
