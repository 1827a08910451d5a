//! Necromancer's Shell - interactive command interpreter
//!
//! This crate re-exports all layers of the shell for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: necroshell_runtime    - Session, built-ins, REPL, CLI
//! Layer 1: necroshell_command    - Tokenizer, registry, parser, executor,
//!                                  autocomplete, history
//! Layer 0: necroshell_foundation - Error types, prefix trie
//! ```

pub use necroshell_command as command;
pub use necroshell_foundation as foundation;
pub use necroshell_runtime as runtime;
