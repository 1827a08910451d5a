//! Interpreter session.
//!
//! The [`Interpreter`] ties the command pipeline together for one player
//! session: it owns the registry, the completion index, and the history,
//! keeps the completion index in step with the registry, and turns raw
//! lines into [`CommandResult`]s.

use necroshell_command::{
    Autocomplete, CommandError, CommandHistory, CommandInfo, CommandParser, CommandRegistry,
    CommandResult, ExecutionStatus, Executor, ParsedCommand,
};
use necroshell_foundation::Result;

use crate::builtins;
use crate::config::ShellConfig;

/// One interactive session.
pub struct Interpreter {
    config: ShellConfig,
    registry: CommandRegistry,
    autocomplete: Autocomplete,
    history: CommandHistory,
    /// Bumped whenever completion candidates may have changed.
    completion_epoch: u64,
}

impl Interpreter {
    /// Creates a session with the built-in commands registered.
    ///
    /// History is loaded from the configured file when persistence is
    /// enabled. A history file that cannot be read is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns a config error if `config` is invalid.
    pub fn new(config: ShellConfig) -> Result<Self> {
        config.validate()?;
        let history = CommandHistory::new(config.history_capacity)?;

        let mut interpreter = Self {
            config,
            registry: CommandRegistry::new(),
            autocomplete: Autocomplete::new(),
            history,
            completion_epoch: 0,
        };

        let added = builtins::register_builtins(&mut interpreter.registry);
        interpreter.autocomplete.rebuild(&interpreter.registry);

        if let Some(path) = interpreter.config.history_path() {
            match interpreter.history.load(&path) {
                Ok(count) => log::debug!("restored {count} history lines"),
                Err(e) => log::warn!("could not load history: {e}"),
            }
        }

        log::info!("session started with {added} built-in commands");
        Ok(interpreter)
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Returns the command registry.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Returns the completion index.
    #[must_use]
    pub fn autocomplete(&self) -> &Autocomplete {
        &self.autocomplete
    }

    /// Returns the input history.
    #[must_use]
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Returns the input history mutably.
    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }

    /// A counter that changes whenever the registry or custom completion
    /// words change.
    #[must_use]
    pub fn completion_epoch(&self) -> u64 {
        self.completion_epoch
    }

    // =========================================================================
    // Commands and completion words
    // =========================================================================

    /// Registers a command and refreshes completion.
    ///
    /// Returns `false` if the name is empty or taken.
    pub fn register_command(&mut self, info: &CommandInfo) -> bool {
        if !self.registry.register(info) {
            return false;
        }
        self.autocomplete.rebuild(&self.registry);
        self.completion_epoch += 1;
        log::info!("registered command '{}'", info.name);
        true
    }

    /// Removes a command and refreshes completion.
    ///
    /// Returns `false` if the command was not registered.
    pub fn unregister_command(&mut self, name: &str) -> bool {
        if !self.registry.unregister(name) {
            return false;
        }
        self.autocomplete.rebuild(&self.registry);
        self.completion_epoch += 1;
        log::info!("unregistered command '{name}'");
        true
    }

    /// Adds a custom completion word, such as the name of a minion.
    pub fn add_completion(&mut self, word: &str) -> bool {
        let added = self.autocomplete.add_entry(word);
        if added {
            self.completion_epoch += 1;
        }
        added
    }

    /// Removes a custom completion word.
    pub fn remove_completion(&mut self, word: &str) -> bool {
        let removed = self.autocomplete.remove_entry(word);
        if removed {
            self.completion_epoch += 1;
        }
        removed
    }

    /// Removes every custom completion word.
    pub fn clear_completions(&mut self) {
        self.autocomplete.clear_custom_entries();
        self.completion_epoch += 1;
    }

    /// Returns completion candidates for a partial line.
    #[must_use]
    pub fn complete(&self, partial: &str) -> Vec<String> {
        self.autocomplete.completions(&self.registry, partial)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Parses a line against the session's registry.
    ///
    /// # Errors
    ///
    /// Returns the tokenizer or parser error.
    pub fn parse_line(&self, line: &str) -> std::result::Result<ParsedCommand, CommandError> {
        CommandParser::parse_line(line, &self.registry)
    }

    /// Runs a line without recording it.
    ///
    /// A blank line is an empty success. A line that fails to tokenize or
    /// parse yields a [`ExecutionStatus::CommandFailed`] result and runs no
    /// handler.
    #[must_use]
    pub fn execute(&self, line: &str) -> CommandResult {
        if line.trim().is_empty() {
            return CommandResult::success_empty();
        }

        let parsed = match self.parse_line(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("rejected {line:?}: {e}");
                return CommandResult::error(
                    ExecutionStatus::CommandFailed,
                    format!("Parse error: {e}"),
                );
            }
        };

        Executor::new(&self.registry)
            .with_history(&self.history)
            .execute(&parsed)
    }

    /// Records a line in history, then runs it. Blank lines are not
    /// recorded.
    pub fn submit(&mut self, line: &str) -> CommandResult {
        if !line.trim().is_empty() {
            self.history.add(line);
        }
        self.execute(line)
    }

    /// Saves history when persistence is enabled.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the history file cannot be written.
    pub fn shutdown(&mut self) -> Result<()> {
        if let Some(path) = self.config.history_path() {
            self.history.save(&path)?;
        }
        log::info!("session ended");
        Ok(())
    }
}
