//! Command registry.
//!
//! Every command the shell understands is described by a [`CommandInfo`]:
//! its name, help strings, flag schema, positional argument bounds, and the
//! handler that runs it. The registry owns its entries; registering a
//! command stores an independent copy of the caller's description.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::executor::{CommandContext, CommandResult};
use crate::parser::ParsedCommand;

// =============================================================================
// Flag Schema
// =============================================================================

/// The type a flag value is parsed as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    /// Any text.
    String,
    /// A signed 64-bit integer.
    Int,
    /// A floating point number.
    Float,
    /// A switch. Present means `true`; no value is consumed.
    Bool,
}

impl ArgumentType {
    /// Lowercase name used in help and error text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of one flag a command accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagDefinition {
    /// Long name, used as `--name` and as the key in parsed flags.
    pub name: String,
    /// Optional single-character alias, used as `-c`.
    pub short_name: Option<char>,
    /// Value type.
    pub value_type: ArgumentType,
    /// Whether parsing fails when the flag is absent.
    pub required: bool,
    /// One-line description for help output.
    pub description: String,
}

impl FlagDefinition {
    /// Creates an optional flag with no short alias.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ArgumentType) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            value_type,
            required: false,
            description: String::new(),
        }
    }

    /// Creates a boolean switch.
    #[must_use]
    pub fn switch(name: impl Into<String>) -> Self {
        Self::new(name, ArgumentType::Bool)
    }

    /// Sets the short alias.
    #[must_use]
    pub fn with_short(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self
    }

    /// Marks the flag as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the help description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Behavior bound to a command name.
///
/// Handlers report failure through [`CommandResult::error`]; the executor
/// never inspects how a result was produced.
pub trait CommandHandler {
    /// Runs the command.
    fn execute(&self, cmd: &ParsedCommand, ctx: &CommandContext<'_>) -> CommandResult;
}

impl<F> CommandHandler for F
where
    F: Fn(&ParsedCommand, &CommandContext<'_>) -> CommandResult,
{
    fn execute(&self, cmd: &ParsedCommand, ctx: &CommandContext<'_>) -> CommandResult {
        self(cmd, ctx)
    }
}

// =============================================================================
// Command Metadata
// =============================================================================

/// Everything the shell knows about one command.
#[derive(Clone)]
pub struct CommandInfo {
    /// Unique command name.
    pub name: String,
    /// One-line summary.
    pub description: String,
    /// Usage line, e.g. `raise <corpse> [--count <n>]`.
    pub usage: String,
    /// Longer help text.
    pub help_text: String,
    /// The handler.
    pub handler: Rc<dyn CommandHandler>,
    /// Accepted flags, in declaration order.
    pub flags: Vec<FlagDefinition>,
    /// Minimum number of positional arguments.
    pub min_args: usize,
    /// Maximum number of positional arguments. Zero means unbounded.
    pub max_args: usize,
    /// Hidden commands are executable but left out of help listings.
    pub hidden: bool,
}

impl CommandInfo {
    /// Creates a command from a closure handler.
    ///
    /// ```
    /// use necroshell_command::{CommandInfo, CommandResult};
    ///
    /// let info = CommandInfo::new("wail", |_, _| CommandResult::success("OoOoo"))
    ///     .with_description("Let out a mournful wail");
    /// assert_eq!(info.name, "wail");
    /// ```
    #[must_use]
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ParsedCommand, &CommandContext<'_>) -> CommandResult + 'static,
    {
        Self::with_handler(name, Rc::new(handler))
    }

    /// Creates a command from a shared handler object.
    #[must_use]
    pub fn with_handler(name: impl Into<String>, handler: Rc<dyn CommandHandler>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            usage: String::new(),
            help_text: String::new(),
            handler,
            flags: Vec::new(),
            min_args: 0,
            max_args: 0,
            hidden: false,
        }
    }

    /// Sets the one-line description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the usage line.
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the long help text.
    #[must_use]
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    /// Adds a flag.
    #[must_use]
    pub fn with_flag(mut self, flag: FlagDefinition) -> Self {
        self.flags.push(flag);
        self
    }

    /// Sets the positional argument bounds. A `max` of zero is unbounded.
    #[must_use]
    pub fn with_args(mut self, min: usize, max: usize) -> Self {
        self.min_args = min;
        self.max_args = max;
        self
    }

    /// Hides the command from help listings.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Looks up a flag by long name.
    #[must_use]
    pub fn find_flag(&self, name: &str) -> Option<&FlagDefinition> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Looks up a flag by short alias.
    #[must_use]
    pub fn find_short_flag(&self, short: char) -> Option<&FlagDefinition> {
        self.flags.iter().find(|f| f.short_name == Some(short))
    }

    /// Returns true if `count` positional arguments are within bounds.
    #[must_use]
    pub fn accepts_arg_count(&self, count: usize) -> bool {
        count >= self.min_args && (self.max_args == 0 || count <= self.max_args)
    }
}

impl fmt::Debug for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInfo")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("flags", &self.flags)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Name-keyed store of command descriptions.
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandInfo>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a copy of `info`.
    ///
    /// Returns `false` without changing anything if the name is empty or
    /// already taken. Later changes to `info` do not affect the stored copy.
    pub fn register(&mut self, info: &CommandInfo) -> bool {
        if info.name.is_empty() {
            log::warn!("refusing to register a command with an empty name");
            return false;
        }
        if self.commands.contains_key(&info.name) {
            log::warn!("command '{}' is already registered", info.name);
            return false;
        }
        self.commands.insert(info.name.clone(), info.clone());
        log::debug!("registered command '{}'", info.name);
        true
    }

    /// Removes a command. Returns `false` if it was not registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.commands.remove(name).is_some();
        if removed {
            log::debug!("unregistered command '{name}'");
        }
        removed
    }

    /// Looks up a command by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandInfo> {
        self.commands.get(name)
    }

    /// Returns true if a command with this name is registered.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns every registered name, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates commands in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.values()
    }

    /// Returns commands sorted by name.
    #[must_use]
    pub fn iter_sorted(&self) -> Vec<&CommandInfo> {
        let mut commands: Vec<&CommandInfo> = self.commands.values().collect();
        commands.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        commands
    }
}
