//! Integration tests for autocomplete

use necroshell_command::{Autocomplete, CompletionContext};

use crate::game_registry;

#[test]
fn command_prefix() {
    let registry = game_registry();
    let ac = Autocomplete::from_registry(&registry);
    assert_eq!(ac.completions(&registry, "he"), vec!["heal", "help"]);
    assert_eq!(ac.completions(&registry, "st"), vec!["status"]);
    assert!(ac.completions(&registry, "zz").is_empty());
}

#[test]
fn empty_input_lists_all_commands() {
    let registry = game_registry();
    let ac = Autocomplete::from_registry(&registry);
    assert_eq!(
        ac.completions(&registry, ""),
        vec!["bind", "heal", "help", "raise", "status"]
    );
}

#[test]
fn flag_completion_for_command() {
    let registry = game_registry();
    let ac = Autocomplete::from_registry(&registry);
    assert_eq!(ac.completions(&registry, "raise --"), vec!["--count", "--power"]);
    assert_eq!(ac.completions(&registry, "raise --p"), vec!["--power"]);
    assert!(ac.completions(&registry, "dance --").is_empty());
}

#[test]
fn argument_position_has_no_candidates() {
    let registry = game_registry();
    let mut ac = Autocomplete::from_registry(&registry);
    ac.add_entry("zombie");
    ac.add_entry("skeleton");

    assert!(ac.completions(&registry, "raise z").is_empty());
    assert!(ac.completions(&registry, "raise ").is_empty());
    assert!(ac.completions(&registry, "bind zombie s").is_empty());
}

#[test]
fn custom_words_also_complete_as_commands() {
    let registry = game_registry();
    let mut ac = Autocomplete::from_registry(&registry);
    ac.add_entry("help");
    ac.add_entry("hex");
    assert_eq!(ac.completions(&registry, "he"), vec!["heal", "help", "hex"]);
}

#[test]
fn rebuild_follows_registry() {
    let mut registry = game_registry();
    let mut ac = Autocomplete::from_registry(&registry);
    ac.add_entry("zombie");
    registry.unregister("heal");
    ac.rebuild(&registry);
    assert_eq!(ac.completions(&registry, "he"), vec!["help"]);
    assert_eq!(ac.custom_len(), 1);
    assert_eq!(ac.command_len(), registry.len());

    ac.clear_custom_entries();
    assert_eq!(ac.custom_len(), 0);
}

#[test]
fn contexts() {
    assert_eq!(Autocomplete::context_of(""), CompletionContext::Command);
    assert_eq!(Autocomplete::context_of("rai"), CompletionContext::Command);
    assert_eq!(
        Autocomplete::context_of("raise --c"),
        CompletionContext::Flag {
            command: "raise".to_string()
        }
    );
    assert_eq!(Autocomplete::context_of("raise "), CompletionContext::Argument);
    assert_eq!(Autocomplete::context_of("raise gh"), CompletionContext::Argument);
}

#[test]
fn last_word() {
    assert_eq!(Autocomplete::last_word("raise gh"), "gh");
    assert_eq!(Autocomplete::last_word("raise "), "");
    assert_eq!(Autocomplete::last_word(""), "");
}
