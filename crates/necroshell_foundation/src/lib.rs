//! Core error types and collections for the Necromancer's Shell.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context, shared by every layer
//! - [`Trie`] - Prefix tree used for command and entity-name completion

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod trie;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use trie::Trie;
