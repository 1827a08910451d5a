//! Integration tests for built-in commands, run through a session

use necroshell_command::{CommandInfo, CommandResult, ExecutionStatus};
use necroshell_runtime::builtins::{CLEAR_SCREEN, FAREWELL};
use necroshell_runtime::{Interpreter, ShellConfig};

fn session() -> Interpreter {
    Interpreter::new(ShellConfig::ephemeral()).unwrap()
}

#[test]
fn help_lists_builtins() {
    let output = session().execute("help").output.unwrap();
    assert!(output.contains("=== Necromancer's Shell - Command Help ==="));
    for name in ["clear", "exit", "help", "history", "log", "quit"] {
        assert!(output.contains(&format!("  {name:<12} - ")), "missing {name}");
    }
}

#[test]
fn help_hides_hidden_commands() {
    let mut interp = session();
    interp.register_command(
        &CommandInfo::new("whisper", |_, _| CommandResult::success_empty()).hidden(),
    );
    assert!(!interp.execute("help").output.unwrap().contains("whisper"));
    assert!(interp.execute("help whisper").success);
}

#[test]
fn help_for_one_command() {
    let output = session().execute("help history").output.unwrap();
    assert!(output.contains("=== history ==="));
    assert!(output.contains("Usage: history [count] [--search <pattern>]"));
    assert!(output.contains("-s, --search <string>"));
}

#[test]
fn help_for_unknown_command() {
    let result = session().execute("help dance");
    assert_eq!(result.status, ExecutionStatus::CommandFailed);
    assert_eq!(result.error_message.as_deref(), Some("Unknown command: dance"));
}

#[test]
fn help_takes_one_argument() {
    let result = session().execute("help quit exit");
    assert!(!result.success);
    assert!(result.error_message.unwrap().starts_with("Parse error: wrong number of arguments"));
}

#[test]
fn quit_and_exit_end_session() {
    let interp = session();
    for line in ["quit", "exit"] {
        let result = interp.execute(line);
        assert!(result.success);
        assert!(result.should_exit);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.output.as_deref(), Some(FAREWELL));
    }
}

#[test]
fn clear_screen() {
    assert_eq!(session().execute("clear").output.as_deref(), Some(CLEAR_SCREEN));
}

#[test]
fn history_shows_submitted_lines() {
    let mut interp = session();
    interp.submit("help");
    interp.submit("clear");
    let output = interp.submit("history").output.unwrap();
    assert_eq!(output, "     1  help\n     2  clear\n     3  history\n");

    let last_two = interp.submit("history 2").output.unwrap();
    assert_eq!(last_two, "     3  history\n     4  history 2\n");
}

#[test]
fn history_search() {
    let mut interp = session();
    interp.submit("help");
    interp.submit("clear");
    interp.submit("help quit");
    let output = interp.execute("history --search help").output.unwrap();
    assert_eq!(output, "  help quit\n  help\n");

    let none = interp.execute("history -s banish").output.unwrap();
    assert_eq!(none, "No history entries match 'banish'");
}

#[test]
fn history_bad_count() {
    let result = session().execute("history many");
    assert_eq!(result.status, ExecutionStatus::InvalidCommand);
}
