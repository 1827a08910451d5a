//! Tab completion.
//!
//! Completion works on the partial line the player has typed so far. The
//! last word is completed according to where it sits:
//!
//! | Input              | Context    | Candidates                       |
//! |--------------------|------------|----------------------------------|
//! | `he`               | command    | command names and custom entries |
//! | `status --ve`      | flag       | `--name` for the command's flags |
//! | `raise zo`         | argument   | none                             |
//!
//! Argument completion is left to callers; this index offers nothing there.

use necroshell_foundation::Trie;

use crate::registry::CommandRegistry;
use crate::tokenizer::Tokenizer;

/// Where in the line the word being completed sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionContext {
    /// Completing the command name.
    Command,
    /// Completing a flag of the named command.
    Flag {
        /// The command whose flags are offered.
        command: String,
    },
    /// Completing a positional argument. No candidates are offered.
    Argument,
}

/// Completion index over command names plus caller-supplied words.
#[derive(Clone, Debug, Default)]
pub struct Autocomplete {
    commands: Trie,
    custom: Trie,
}

impl Autocomplete {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index holding every command in `registry`.
    #[must_use]
    pub fn from_registry(registry: &CommandRegistry) -> Self {
        let mut autocomplete = Self::new();
        autocomplete.rebuild(registry);
        autocomplete
    }

    /// Replaces the command-name index with the registry's current names.
    /// Custom entries are kept.
    pub fn rebuild(&mut self, registry: &CommandRegistry) {
        self.commands.clear();
        self.commands.extend(registry.iter().map(|info| info.name.as_str()));
        log::debug!("completion index rebuilt with {} command(s)", self.commands.len());
    }

    /// Adds a custom completion word. Returns `false` if it was already known.
    pub fn add_entry(&mut self, word: &str) -> bool {
        self.custom.insert(word)
    }

    /// Removes a custom completion word. Returns `false` if it was unknown.
    pub fn remove_entry(&mut self, word: &str) -> bool {
        self.custom.remove(word)
    }

    /// Removes every custom word.
    pub fn clear_custom_entries(&mut self) {
        self.custom.clear();
    }

    /// Returns the number of custom words.
    #[must_use]
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// Returns the number of indexed command names.
    #[must_use]
    pub fn command_len(&self) -> usize {
        self.commands.len()
    }

    /// Classifies the last word of `input`.
    ///
    /// A line that fails to tokenize (an open quote, say) is treated as a
    /// command context.
    #[must_use]
    pub fn context_of(input: &str) -> CompletionContext {
        let Ok(tokens) = Tokenizer::tokenize(input) else {
            return CompletionContext::Command;
        };
        let trailing_space = input.ends_with(char::is_whitespace);

        match tokens.as_slice() {
            [] => CompletionContext::Command,
            [_] if !trailing_space => CompletionContext::Command,
            [first, .., last] if !trailing_space && last.value.starts_with('-') => {
                CompletionContext::Flag {
                    command: first.value.clone(),
                }
            }
            _ => CompletionContext::Argument,
        }
    }

    /// Returns the word being completed: the last whitespace-separated
    /// word, or empty after trailing whitespace.
    #[must_use]
    pub fn last_word(input: &str) -> &str {
        if input.ends_with(char::is_whitespace) {
            return "";
        }
        input.split_whitespace().next_back().unwrap_or("")
    }

    /// Returns completion candidates for the partial line `input`.
    #[must_use]
    pub fn completions(&self, registry: &CommandRegistry, input: &str) -> Vec<String> {
        let context = Self::context_of(input);
        self.completions_in_context(registry, &context, Self::last_word(input))
    }

    /// Returns candidates for `word` in an explicit context.
    ///
    /// Command candidates are sorted and free of duplicates. Flag
    /// candidates follow the command's declaration order. The argument
    /// context yields nothing.
    #[must_use]
    pub fn completions_in_context(
        &self,
        registry: &CommandRegistry,
        context: &CompletionContext,
        word: &str,
    ) -> Vec<String> {
        match context {
            CompletionContext::Command => {
                let mut out = self.commands.words_with_prefix(word);
                out.extend(self.custom.words_with_prefix(word));
                out.sort_unstable();
                out.dedup();
                out
            }
            CompletionContext::Flag { command } => {
                let Some(info) = registry.get(command) else {
                    return Vec::new();
                };
                let prefix = word.trim_start_matches('-');
                info.flags
                    .iter()
                    .filter(|flag| flag.name.starts_with(prefix))
                    .map(|flag| format!("--{}", flag.name))
                    .collect()
            }
            CompletionContext::Argument => Vec::new(),
        }
    }
}
