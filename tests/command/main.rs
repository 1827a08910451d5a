//! Integration tests for Layer 1: Command pipeline
//!
//! Tests the tokenizer, registry, parser, executor, autocomplete, and
//! history working together the way a shell session drives them.

mod autocomplete_tests;
mod history_tests;
mod parser_tests;

use necroshell_command::{
    ArgumentType, CommandInfo, CommandRegistry, CommandResult, FlagDefinition,
};

/// A registry shaped like a small game: `status`, `raise`, `bind`, `heal`.
pub fn game_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(
        &CommandInfo::new("status", |cmd, _| {
            if cmd.flag_enabled("verbose") {
                CommandResult::success("Souls: 12\nMinions: 3\nCorruption: 4%")
            } else {
                CommandResult::success("Souls: 12")
            }
        })
        .with_description("Show your current state")
        .with_flag(FlagDefinition::switch("verbose").with_short('v')),
    );
    registry.register(
        &CommandInfo::new("raise", |cmd, _| {
            let count = cmd.flag("count").and_then(|v| v.as_int()).unwrap_or(1);
            let kind = cmd.arg(0).unwrap_or("zombie");
            CommandResult::success(format!("Raised {count} {kind}(s)"))
        })
        .with_description("Raise the dead")
        .with_flag(FlagDefinition::new("count", ArgumentType::Int).with_short('n'))
        .with_flag(FlagDefinition::new("power", ArgumentType::Float))
        .with_args(1, 1),
    );
    registry.register(
        &CommandInfo::new("bind", |cmd, _| {
            CommandResult::success(format!("Bound {} to {}", cmd.arg(0).unwrap_or(""), cmd.arg(1).unwrap_or("")))
        })
        .with_description("Bind a soul to a vessel")
        .with_flag(FlagDefinition::new("ritual", ArgumentType::String).required())
        .with_args(2, 0),
    );
    registry.register(
        &CommandInfo::new("heal", |_, _| CommandResult::success("Mended"))
            .with_description("Mend a minion"),
    );
    registry.register(
        &CommandInfo::new("help", |_, _| CommandResult::success("help text"))
            .with_description("Display help information"),
    );
    registry
}
