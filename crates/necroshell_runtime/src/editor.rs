//! Line editor abstraction for the REPL.
//!
//! The REPL talks to a [`LineEditor`] so it can run against rustyline in a
//! terminal or a scripted editor in tests.

use std::borrow::Cow;

use necroshell_command::{Autocomplete, CommandRegistry};
use necroshell_foundation::{Error, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

use crate::highlight::ShellHighlighter;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to the editor's recall buffer.
    fn add_history(&mut self, line: &str);

    /// Replace the commands and words used for tab completion.
    fn set_completion_source(&mut self, registry: CommandRegistry, autocomplete: Autocomplete);
}

// =============================================================================
// Rustyline Helper
// =============================================================================

/// Tab completion over a snapshot of the session's commands and words.
#[derive(Default)]
struct ShellCompleter {
    registry: CommandRegistry,
    autocomplete: Autocomplete,
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let word = Autocomplete::last_word(head);
        let start = pos - word.len();

        let candidates = self
            .autocomplete
            .completions(&self.registry, head)
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();

        Ok((start, candidates))
    }
}

/// Helper for rustyline that provides completion, hints, and highlighting.
#[derive(Helper, Completer, Hinter, Validator)]
struct ShellHelper {
    #[rustyline(Completer)]
    completer: ShellCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    highlighter: ShellHighlighter,
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, &self.completer.registry)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;35m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

// =============================================================================
// Rustyline Editor
// =============================================================================

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor remembering up to
    /// `history_size` lines.
    ///
    /// # Errors
    ///
    /// Returns a terminal error if rustyline cannot be initialized.
    pub fn new(history_size: usize) -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(history_size)
            .map_err(|e| Error::terminal(e.to_string()))?
            .build();

        let helper = ShellHelper {
            completer: ShellCompleter::default(),
            hinter: HistoryHinter::new(),
            highlighter: ShellHighlighter::new(),
        };

        let mut editor =
            Editor::with_config(config).map_err(|e| Error::terminal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::terminal(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            log::debug!("rustyline rejected history entry: {e}");
        }
    }

    fn set_completion_source(&mut self, registry: CommandRegistry, autocomplete: Autocomplete) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer = ShellCompleter {
                registry,
                autocomplete,
            };
        }
    }
}
