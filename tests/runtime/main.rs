//! Integration tests for Layer 2: Runtime
//!
//! Tests sessions, configuration, and built-in commands end to end.

mod builtins_tests;
mod session_tests;
