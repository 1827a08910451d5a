//! Integration tests for interpreter sessions

use necroshell_command::{
    ArgumentType, CommandInfo, CommandResult, ExecutionStatus, FlagDefinition,
};
use necroshell_runtime::{Interpreter, ShellConfig};
use tempfile::TempDir;

fn session() -> Interpreter {
    Interpreter::new(ShellConfig::ephemeral()).unwrap()
}

fn raise_command() -> CommandInfo {
    CommandInfo::new("raise", |cmd, _| {
        let count = cmd.flag("count").and_then(|v| v.as_int()).unwrap_or(1);
        CommandResult::success(format!("Raised {count} {}", cmd.arg(0).unwrap_or("zombie")))
    })
    .with_description("Raise the dead")
    .with_flag(FlagDefinition::new("count", ArgumentType::Int).with_short('n'))
    .with_args(0, 1)
}

#[test]
fn game_commands_run_alongside_builtins() {
    let mut interp = session();
    assert!(interp.register_command(&raise_command()));
    assert_eq!(
        interp.execute("raise -n 2 \"bone golem\"").output.as_deref(),
        Some("Raised 2 bone golem")
    );
    assert!(interp.execute("help raise").output.unwrap().contains("--count <int>"));
}

#[test]
fn completion_tracks_registered_commands() {
    let mut interp = session();
    assert_eq!(interp.complete("he"), vec!["help"]);
    interp.register_command(&CommandInfo::new("heal", |_, _| CommandResult::success_empty()));
    assert_eq!(interp.complete("he"), vec!["heal", "help"]);
    assert_eq!(interp.complete("history --"), vec!["--search"]);
}

#[test]
fn failures_are_results() {
    let interp = session();
    let result = interp.execute("help --loud");
    assert_eq!(result.status, ExecutionStatus::CommandFailed);
    assert!(result.error_message.unwrap().starts_with("Parse error:"));
}

#[test]
fn history_persists_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history");
    let config = ShellConfig::ephemeral()
        .with_persist_history(true)
        .with_history_file(&path);

    let mut first = Interpreter::new(config.clone()).unwrap();
    first.submit("help");
    first.submit("history");
    first.shutdown().unwrap();

    let second = Interpreter::new(config).unwrap();
    assert_eq!(
        second.history().iter_oldest_first().collect::<Vec<_>>(),
        vec!["help", "history"]
    );
}

#[test]
fn persisted_history_respects_capacity() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history");
    std::fs::write(&path, "a\nb\nc\nd\n").unwrap();

    let config = ShellConfig::ephemeral()
        .with_persist_history(true)
        .with_history_file(&path)
        .with_history_capacity(3);
    let interp = Interpreter::new(config).unwrap();
    assert_eq!(interp.history().iter().collect::<Vec<_>>(), vec!["d", "c", "b"]);
}

#[test]
fn blank_submissions_are_not_recorded() {
    let mut interp = session();
    interp.submit("   ");
    interp.submit("\t");
    interp.submit("help");
    assert_eq!(interp.history().iter().collect::<Vec<_>>(), vec!["help"]);
}

#[test]
fn ephemeral_shutdown_writes_nothing() {
    let mut interp = session();
    interp.submit("help");
    interp.shutdown().unwrap();
}
