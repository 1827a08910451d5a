//! Integration tests for the argument and flag parser

use necroshell_command::{
    ArgumentType, ArgumentValue, CommandError, CommandInfo, CommandParser, CommandRegistry,
    CommandResult, ParseError, Token, TokenizeError,
};

use crate::game_registry;

// =============================================================================
// Successful parses
// =============================================================================

#[test]
fn bool_flag_consumes_no_value() {
    let registry = game_registry();
    let cmd = CommandParser::parse_line("status --verbose", &registry).unwrap();
    assert_eq!(cmd.command_name, "status");
    assert!(cmd.flag_enabled("verbose"));
    assert_eq!(cmd.arg_count(), 0);
    assert_eq!(cmd.raw_input.as_deref(), Some("status --verbose"));
}

#[test]
fn short_flag_alias() {
    let registry = game_registry();
    let cmd = CommandParser::parse_line("raise -n 3 skeleton", &registry).unwrap();
    assert_eq!(cmd.flag("count"), Some(&ArgumentValue::Int(3)));
    assert_eq!(cmd.arg(0), Some("skeleton"));
}

#[test]
fn typed_flag_values() {
    let registry = game_registry();
    let cmd = CommandParser::parse_line("raise ghoul --power 2.5 --count 7", &registry).unwrap();
    assert_eq!(cmd.flag("power").and_then(ArgumentValue::as_float), Some(2.5));
    assert_eq!(cmd.flag("count").and_then(ArgumentValue::as_int), Some(7));
}

#[test]
fn quoted_dash_is_positional() {
    let registry = game_registry();
    let cmd = CommandParser::parse_line("raise \"--count\"", &registry).unwrap();
    assert_eq!(cmd.arg(0), Some("--count"));
    assert!(!cmd.has_flag("count"));
}

#[test]
fn negative_number_is_positional() {
    let registry = game_registry();
    let cmd = CommandParser::parse_line("raise -5", &registry).unwrap();
    assert_eq!(cmd.arg(0), Some("-5"));
}

#[test]
fn bind_with_required_flag_and_two_args() {
    let registry = game_registry();
    let cmd = CommandParser::parse_line("bind wraith lantern --ritual \"dark pact\"", &registry)
        .unwrap();
    assert_eq!(cmd.positional_args, vec!["wraith", "lantern"]);
    assert_eq!(cmd.flag("ritual").and_then(ArgumentValue::as_str), Some("dark pact"));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn unknown_command() {
    let registry = game_registry();
    let err = CommandParser::parse_line("dance", &registry).unwrap_err();
    assert!(matches!(err, CommandError::Parse(ParseError::UnknownCommand(ref n)) if n == "dance"));
    assert_eq!(err.to_string(), "unknown command: dance");
}

#[test]
fn unknown_flag() {
    let registry = game_registry();
    let err = CommandParser::parse_line("status --loud", &registry).unwrap_err();
    assert!(matches!(err, CommandError::Parse(ParseError::UnknownFlag { .. })));
}

#[test]
fn flag_missing_value() {
    let registry = game_registry();
    let err = CommandParser::parse_line("raise ghoul --count", &registry).unwrap_err();
    assert!(matches!(
        err,
        CommandError::Parse(ParseError::MissingFlagValue { expected: ArgumentType::Int, .. })
    ));
}

#[test]
fn flag_wrong_type() {
    let registry = game_registry();
    let err = CommandParser::parse_line("raise ghoul --count many", &registry).unwrap_err();
    match err {
        CommandError::Parse(ParseError::InvalidFlagValue { flag, value, .. }) => {
            assert_eq!(flag, "count");
            assert_eq!(value, "many");
        }
        other => panic!("expected InvalidFlagValue, got {other:?}"),
    }
}

#[test]
fn bind_with_one_arg_fails_count() {
    let registry = game_registry();
    let err = CommandParser::parse_line("bind wraith --ritual pact", &registry).unwrap_err();
    match err {
        CommandError::Parse(ParseError::ArgumentCountError { min, max, actual, .. }) => {
            assert_eq!((min, max, actual), (2, 0, 1));
        }
        other => panic!("expected ArgumentCountError, got {other:?}"),
    }
}

#[test]
fn too_few_arguments_from_tokens() {
    let mut registry = CommandRegistry::new();
    registry.register(
        &CommandInfo::new("bind", |_, _| CommandResult::success_empty()).with_args(2, 0),
    );

    let tokens = [Token::bare("bind"), Token::bare("7")];
    let err = CommandParser::parse(&tokens, &registry).unwrap_err();
    assert_eq!(
        err,
        ParseError::ArgumentCountError {
            command: "bind".to_string(),
            min: 2,
            max: 0,
            actual: 1,
        }
    );

    let tokens = [Token::bare("bind"), Token::bare("7"), Token::bare("8")];
    assert_eq!(CommandParser::parse(&tokens, &registry).unwrap().arg_count(), 2);
}

#[test]
fn missing_required_flag_checked_first() {
    let registry = game_registry();
    let err = CommandParser::parse_line("bind wraith", &registry).unwrap_err();
    assert!(matches!(
        err,
        CommandError::Parse(ParseError::MissingRequiredFlag(ref f)) if f == "ritual"
    ));
}

#[test]
fn tokenizer_errors_pass_through() {
    let registry = game_registry();
    assert_eq!(
        CommandParser::parse_line("raise 'bones", &registry).unwrap_err(),
        CommandError::Tokenize(TokenizeError::UnclosedQuote)
    );
    assert_eq!(
        CommandParser::parse_line("   ", &registry).unwrap_err(),
        CommandError::Tokenize(TokenizeError::EmptyInput)
    );
}

#[test]
fn empty_token_list() {
    let registry = game_registry();
    assert_eq!(CommandParser::parse(&[], &registry), Err(ParseError::EmptyCommand));
}
