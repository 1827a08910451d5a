//! Configuration for an interpreter session.
//!
//! Loadable from TOML:
//!
//! ```toml
//! history_capacity = 500
//! history_file = "/home/thessara/.necro_history"
//! prompt = "necro> "
//! log_level = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use necroshell_command::CommandHistory;
use necroshell_foundation::{Error, ErrorContext, Result};
use serde::Deserialize;

/// Default number of remembered lines.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Maximum number of remembered lines.
    pub history_capacity: usize,

    /// History file. `None` uses [`CommandHistory::default_path`].
    pub history_file: Option<PathBuf>,

    /// Load history at start-up and save it at shutdown.
    pub persist_history: bool,

    /// Interactive prompt.
    pub prompt: String,

    /// Print the welcome banner.
    pub show_banner: bool,

    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_file: None,
            persist_history: true,
            prompt: "> ".to_string(),
            show_banner: true,
            log_level: "warn".to_string(),
        }
    }
}

impl ShellConfig {
    /// A configuration that never touches the filesystem and prints no
    /// banner. Suited to tests and one-shot commands.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            persist_history: false,
            show_banner: false,
            ..Self::default()
        }
    }

    /// The default configuration with debug logging.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }

    /// Builder method to set history capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Builder method to set the history file.
    #[must_use]
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }

    /// Builder method to enable/disable history persistence.
    #[must_use]
    pub fn with_persist_history(mut self, persist: bool) -> Self {
        self.persist_history = persist;
        self
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to enable/disable the banner.
    #[must_use]
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Builder method to set the default log filter.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// The file history is persisted to, or `None` when persistence is off.
    #[must_use]
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.persist_history {
            return None;
        }
        Some(
            self.history_file
                .clone()
                .unwrap_or_else(CommandHistory::default_path),
        )
    }

    /// Parses [`ShellConfig::log_level`].
    ///
    /// # Errors
    ///
    /// Returns a config error for an unknown level name.
    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| Error::config(format!("unknown log level '{}'", self.log_level)))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns a config error if the history capacity is zero or the log
    /// level is unknown.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::config("history_capacity must be greater than zero"));
        }
        self.log_level_filter()?;
        Ok(())
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns a config error for malformed TOML, unknown keys, or invalid
    /// values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a config error
    /// as for [`ShellConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text).map_err(|e| {
            e.with_context(
                ErrorContext::new().with_operation(format!("loading {}", path.display())),
            )
        })
    }
}
