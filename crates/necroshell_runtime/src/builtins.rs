//! Built-in commands registered in every session.

use std::fmt::Write as _;

use log::LevelFilter;
use necroshell_command::{
    ArgumentType, CommandContext, CommandInfo, CommandRegistry, CommandResult, ExecutionStatus,
    FlagDefinition, ParsedCommand,
};

/// Message shown by `quit` and `exit`.
pub const FAREWELL: &str = "\nFarewell, Necromancer. The shadows await your return...\n";

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Returns every built-in command.
#[must_use]
pub fn builtin_commands() -> Vec<CommandInfo> {
    vec![
        help_command(),
        quit_command("quit"),
        quit_command("exit"),
        clear_command(),
        history_command(),
        log_command(),
    ]
}

/// Registers every built-in command. Returns how many were newly added.
pub fn register_builtins(registry: &mut CommandRegistry) -> usize {
    builtin_commands()
        .iter()
        .filter(|info| registry.register(info))
        .count()
}

// =============================================================================
// help
// =============================================================================

fn help_command() -> CommandInfo {
    CommandInfo::new("help", help)
        .with_description("Display help information")
        .with_usage("help [command] [--verbose]")
        .with_help_text(
            "Shows help for all commands or a specific command.\n\
             Without arguments, lists all available commands.\n\
             With a command name, shows detailed help for that command.",
        )
        .with_flag(
            FlagDefinition::switch("verbose")
                .with_short('v')
                .with_description("Include usage lines in the command list"),
        )
        .with_args(0, 1)
}

fn help(cmd: &ParsedCommand, ctx: &CommandContext<'_>) -> CommandResult {
    match cmd.arg(0) {
        Some(name) => match ctx.registry.get(name) {
            Some(info) => CommandResult::success(describe_command(info)),
            None => CommandResult::error(
                ExecutionStatus::CommandFailed,
                format!("Unknown command: {name}"),
            ),
        },
        None => CommandResult::success(list_commands(ctx.registry, cmd.flag_enabled("verbose"))),
    }
}

fn list_commands(registry: &CommandRegistry, verbose: bool) -> String {
    let mut out = String::from("\n=== Necromancer's Shell - Command Help ===\n\nAvailable commands:\n\n");
    for info in registry.iter_sorted().into_iter().filter(|c| !c.hidden) {
        let description = if info.description.is_empty() {
            "No description"
        } else {
            info.description.as_str()
        };
        let _ = writeln!(out, "  {:<12} - {description}", info.name);
        if verbose && !info.usage.is_empty() {
            let _ = writeln!(out, "  {:<12}   usage: {}", "", info.usage);
        }
    }
    out.push_str("\nType 'help <command>' for detailed information on a specific command.\n");
    out
}

/// Renders the detailed help page for one command.
#[must_use]
pub fn describe_command(info: &CommandInfo) -> String {
    let mut out = String::new();
    let _ = write!(out, "\n=== {} ===\n\n", info.name);
    let description = if info.description.is_empty() {
        "No description"
    } else {
        info.description.as_str()
    };
    let _ = write!(out, "Description: {description}\n\n");
    let usage = if info.usage.is_empty() {
        info.name.as_str()
    } else {
        info.usage.as_str()
    };
    let _ = write!(out, "Usage: {usage}\n\n");

    if !info.help_text.is_empty() {
        let _ = write!(out, "{}\n\n", info.help_text);
    }

    if !info.flags.is_empty() {
        out.push_str("Options:\n");
        for flag in &info.flags {
            out.push_str("  ");
            if let Some(short) = flag.short_name {
                let _ = write!(out, "-{short}, ");
            }
            let _ = write!(out, "--{}", flag.name);
            if flag.value_type != ArgumentType::Bool {
                let _ = write!(out, " <{}>", flag.value_type);
            }
            if flag.required {
                out.push_str(" (required)");
            }
            out.push('\n');
            if !flag.description.is_empty() {
                let _ = writeln!(out, "      {}", flag.description);
            }
        }
        out.push('\n');
    }

    if info.min_args > 0 || info.max_args > 0 {
        out.push_str("Arguments:\n");
        let _ = writeln!(out, "  Minimum: {}", info.min_args);
        if info.max_args > 0 {
            let _ = writeln!(out, "  Maximum: {}", info.max_args);
        } else {
            out.push_str("  Maximum: unlimited\n");
        }
    }
    out
}

// =============================================================================
// quit / exit / clear
// =============================================================================

fn quit_command(name: &str) -> CommandInfo {
    CommandInfo::new(name, |_, _| CommandResult::exit(FAREWELL))
        .with_description("Exit the shell")
        .with_usage(name)
        .with_help_text("Exits the shell, saving history.")
}

fn clear_command() -> CommandInfo {
    CommandInfo::new("clear", |cmd, _| {
        if cmd.arg_count() > 0 {
            return CommandResult::error(ExecutionStatus::InvalidCommand, "clear takes no arguments");
        }
        CommandResult::success(CLEAR_SCREEN)
    })
    .with_description("Clear the terminal screen")
    .with_usage("clear")
    .with_help_text("Clears the terminal screen using ANSI escape codes.")
}

// =============================================================================
// history
// =============================================================================

fn history_command() -> CommandInfo {
    CommandInfo::new("history", history)
        .with_description("Show previously entered commands")
        .with_usage("history [count] [--search <pattern>]")
        .with_help_text(
            "Lists recent commands, most recent last.\n\
             With a count, shows only that many entries.\n\
             With --search, lists entries containing the pattern, most recent first.",
        )
        .with_flag(
            FlagDefinition::new("search", ArgumentType::String)
                .with_short('s')
                .with_description("Only show entries containing this text"),
        )
        .with_args(0, 1)
}

fn history(cmd: &ParsedCommand, ctx: &CommandContext<'_>) -> CommandResult {
    let Some(history) = ctx.history else {
        return CommandResult::error(ExecutionStatus::NotImplemented, "History is not available");
    };

    if let Some(pattern) = cmd.flag("search").and_then(|v| v.as_str()) {
        let matches = history.search(pattern);
        if matches.is_empty() {
            return CommandResult::success(format!("No history entries match '{pattern}'"));
        }
        let mut out = String::new();
        for line in matches {
            let _ = writeln!(out, "  {line}");
        }
        return CommandResult::success(out);
    }

    let count = match cmd.arg(0) {
        Some(text) => match text.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                return CommandResult::error(
                    ExecutionStatus::InvalidCommand,
                    format!("Invalid count: {text}"),
                );
            }
        },
        None => history.len(),
    };

    let shown = count.min(history.len());
    let mut out = String::new();
    for index in (0..shown).rev() {
        if let Some(line) = history.get(index) {
            let _ = writeln!(out, "  {:>4}  {line}", history.len() - index);
        }
    }
    CommandResult::success(out)
}

// =============================================================================
// log
// =============================================================================

fn log_command() -> CommandInfo {
    CommandInfo::new("log", log_level)
        .with_description("Show or change the log level")
        .with_usage("log [level]")
        .with_help_text(
            "Changes the logging level for this session.\n\
             Levels: off, error, warn, info, debug, trace\n\
             Without arguments, shows the current level.",
        )
        .with_args(0, 1)
}

fn log_level(cmd: &ParsedCommand, _ctx: &CommandContext<'_>) -> CommandResult {
    let Some(text) = cmd.arg(0) else {
        return CommandResult::success(format!("Log level: {}", log::max_level()));
    };
    match text.parse::<LevelFilter>() {
        Ok(level) => {
            log::set_max_level(level);
            log::info!("log level set to {level}");
            CommandResult::success(format!("Log level set to {level}"))
        }
        Err(_) => CommandResult::error(
            ExecutionStatus::InvalidCommand,
            format!("Unknown log level: {text}"),
        ),
    }
}
