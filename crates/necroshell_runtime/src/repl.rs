//! The interactive read-execute-print loop.

use std::io::{self, Write};

use necroshell_command::CommandResult;
use necroshell_foundation::Result;

use crate::builtins::FAREWELL;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Interpreter;

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The command session.
    interpreter: Interpreter,

    /// Completion epoch last pushed to the editor.
    synced_epoch: Option<u64>,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL on a rustyline editor, seeded with the session's
    /// existing history.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(interpreter: Interpreter) -> Result<Self> {
        let mut editor = RustylineEditor::new(interpreter.config().history_capacity)?;
        for line in interpreter.history().iter_oldest_first() {
            editor.add_history(line);
        }
        Ok(Self::with_editor(editor, interpreter))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(editor: E, interpreter: Interpreter) -> Self {
        Self {
            editor,
            interpreter,
            synced_epoch: None,
        }
    }

    /// Returns the session.
    #[must_use]
    pub const fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Returns the session mutably, e.g. to register game commands.
    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Consumes the REPL, returning the session.
    #[must_use]
    pub fn into_interpreter(self) -> Interpreter {
        self.interpreter
    }

    /// Runs until EOF or a command asks to exit, then shuts the session
    /// down. Returns the exit code of the command that ended the loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    pub fn run(&mut self) -> Result<i32> {
        if self.interpreter.config().show_banner {
            print_banner();
        }

        let exit_code = self.read_loop();

        if let Err(e) = self.interpreter.shutdown() {
            log::warn!("could not save history: {e}");
        }
        exit_code
    }

    fn read_loop(&mut self) -> Result<i32> {
        loop {
            self.sync_completion();
            let prompt = self.interpreter.config().prompt.clone();

            match self.editor.read_line(&prompt)? {
                ReadResult::Line(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history(&line);
                    }
                    let result = self.interpreter.submit(&line);
                    print_result(&result);
                    if result.should_exit {
                        return Ok(result.exit_code);
                    }
                }
                ReadResult::Interrupted => println!(),
                ReadResult::Eof => {
                    print!("{FAREWELL}");
                    let _ = io::stdout().flush();
                    return Ok(0);
                }
            }
        }
    }

    /// Pushes fresh completion data to the editor when the session's
    /// commands or words changed.
    fn sync_completion(&mut self) {
        let epoch = self.interpreter.completion_epoch();
        if self.synced_epoch == Some(epoch) {
            return;
        }
        self.editor.set_completion_source(
            self.interpreter.registry().clone(),
            self.interpreter.autocomplete().clone(),
        );
        self.synced_epoch = Some(epoch);
    }
}

/// Prints output to stdout or the error to stderr.
pub fn print_result(result: &CommandResult) {
    if result.success {
        if let Some(output) = &result.output {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            let _ = io::stdout().flush();
        }
    } else if let Some(message) = result.message() {
        eprintln!("\x1b[31mError: {message}\x1b[0m");
    }
}

fn print_banner() {
    println!("\x1b[1;35m");
    println!("  _  _                                            _      ");
    println!(" | \\| |___ __ _ _ ___ _ __  __ _ _ _  __ ___ _ _ ( )___ ");
    println!(" | .` / -_) _| '_/ _ \\ '  \\/ _` | ' \\/ _/ -_) '_||/(_-< ");
    println!(" |_|\\_\\___\\__|_| \\___/_|_|_\\__,_|_||_\\__\\___|_|    /__/ ");
    println!("                     S H E L L                          ");
    println!("\x1b[0m");
    println!("Necromancer's Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for a list of commands. Use Ctrl+D to exit.\n");
    let _ = io::stdout().flush();
}
