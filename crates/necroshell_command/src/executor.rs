//! Command execution.
//!
//! The executor looks up the handler for a parsed command, runs it, and
//! normalizes whatever it returns into a consistent [`CommandResult`].

use std::fmt;

use crate::history::CommandHistory;
use crate::parser::ParsedCommand;
use crate::registry::CommandRegistry;

// =============================================================================
// Status
// =============================================================================

/// Outcome category of a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    /// The command did what was asked.
    Success,
    /// The command ran but failed.
    CommandFailed,
    /// The command does not exist or was used incorrectly.
    InvalidCommand,
    /// The player may not run this command.
    PermissionDenied,
    /// The command exists but has no behavior yet.
    NotImplemented,
    /// Something went wrong inside the shell.
    Internal,
}

impl ExecutionStatus {
    /// Human-readable status text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::CommandFailed => "Command failed",
            Self::InvalidCommand => "Invalid command",
            Self::PermissionDenied => "Permission denied",
            Self::NotImplemented => "Not implemented",
            Self::Internal => "Internal error",
        }
    }

    /// Numeric code, used as the exit code of failed results.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::CommandFailed => 1,
            Self::InvalidCommand => 2,
            Self::PermissionDenied => 3,
            Self::NotImplemented => 4,
            Self::Internal => 5,
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Result
// =============================================================================

/// What a command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Outcome category.
    pub status: ExecutionStatus,
    /// Shorthand for `status == Success`.
    pub success: bool,
    /// Text to show the player.
    pub output: Option<String>,
    /// Failure description.
    pub error_message: Option<String>,
    /// Zero on success, the status code otherwise unless a handler chose one.
    pub exit_code: i32,
    /// Asks the surrounding loop to stop.
    pub should_exit: bool,
}

impl CommandResult {
    /// A successful result with output.
    #[must_use]
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::success_empty()
        }
    }

    /// A successful result with no output.
    #[must_use]
    pub fn success_empty() -> Self {
        Self {
            status: ExecutionStatus::Success,
            success: true,
            output: None,
            error_message: None,
            exit_code: 0,
            should_exit: false,
        }
    }

    /// A failed result.
    #[must_use]
    pub fn error(status: ExecutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            success: status == ExecutionStatus::Success,
            output: None,
            error_message: Some(message.into()),
            exit_code: status.code(),
            should_exit: false,
        }
    }

    /// A successful result that ends the session.
    #[must_use]
    pub fn exit(output: impl Into<String>) -> Self {
        Self {
            should_exit: true,
            ..Self::success(output)
        }
    }

    /// Sets an explicit exit code.
    #[must_use]
    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    /// Returns the text to display: the output on success, the error
    /// message otherwise.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        if self.success {
            self.output.as_deref()
        } else {
            self.error_message.as_deref().or(self.output.as_deref())
        }
    }

    /// Makes the fields agree with `status`.
    fn normalized(mut self) -> Self {
        self.success = self.status == ExecutionStatus::Success;
        if !self.success {
            if self.exit_code == 0 {
                self.exit_code = self.status.code();
            }
            if self.error_message.is_none() {
                self.error_message = Some(self.status.as_str().to_string());
            }
        }
        self
    }
}

// =============================================================================
// Executor
// =============================================================================

/// Read-only view of the shell handed to every handler.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    /// All registered commands.
    pub registry: &'a CommandRegistry,
    /// Input history, when the caller keeps one.
    pub history: Option<&'a CommandHistory>,
}

impl<'a> CommandContext<'a> {
    /// A context with only a registry.
    #[must_use]
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self {
            registry,
            history: None,
        }
    }

    /// Attaches history.
    #[must_use]
    pub fn with_history(mut self, history: &'a CommandHistory) -> Self {
        self.history = Some(history);
        self
    }
}

/// Dispatches parsed commands to their handlers.
pub struct Executor<'a> {
    context: CommandContext<'a>,
}

impl<'a> Executor<'a> {
    /// Creates an executor over a registry.
    #[must_use]
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self {
            context: CommandContext::new(registry),
        }
    }

    /// Makes history visible to handlers.
    #[must_use]
    pub fn with_history(mut self, history: &'a CommandHistory) -> Self {
        self.context = self.context.with_history(history);
        self
    }

    /// Runs a parsed command.
    ///
    /// An unregistered command yields an [`ExecutionStatus::InvalidCommand`]
    /// result. Handler results are normalized so that `success`,
    /// `exit_code`, and `error_message` agree with `status`.
    #[must_use]
    pub fn execute(&self, cmd: &ParsedCommand) -> CommandResult {
        let Some(info) = self.context.registry.get(&cmd.command_name) else {
            log::debug!("no handler for '{}'", cmd.command_name);
            return CommandResult::error(
                ExecutionStatus::InvalidCommand,
                format!("Unknown command: {}", cmd.command_name),
            );
        };

        log::trace!(
            "executing '{}' with {} argument(s)",
            cmd.command_name,
            cmd.arg_count()
        );
        let result = info.handler.execute(cmd, &self.context).normalized();
        if !result.success {
            log::debug!("'{}' finished with status {}", cmd.command_name, result.status);
        }
        result
    }
}
