//! Integration tests for command history

use necroshell_command::CommandHistory;
use necroshell_foundation::ErrorKind;
use tempfile::TempDir;

#[test]
fn capacity_three_evicts_oldest() {
    let mut history = CommandHistory::new(3).unwrap();
    for line in ["a", "b", "c", "d"] {
        history.add(line);
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.iter().collect::<Vec<_>>(), vec!["d", "c", "b"]);
    assert_eq!(history.iter_oldest_first().collect::<Vec<_>>(), vec!["b", "c", "d"]);
}

#[test]
fn zero_capacity_rejected() {
    let err = CommandHistory::new(0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidCapacity(0)));
}

#[test]
fn skips_empty_and_repeated_lines() {
    let mut history = CommandHistory::new(10).unwrap();
    assert!(history.add("help"));
    assert!(!history.add("help"));
    assert!(!history.add(""));
    assert!(history.add("status"));
    assert!(history.add("help"));
    assert_eq!(history.len(), 3);
}

#[test]
fn search_most_recent_first() {
    let mut history = CommandHistory::new(10).unwrap();
    for line in ["help", "status", "help raise", "raise ghoul"] {
        history.add(line);
    }
    assert_eq!(history.search("help"), vec!["help raise", "help"]);
    assert!(history.search("HELP").is_empty());
}

#[test]
fn search_over_mixed_entries() {
    let mut history = CommandHistory::new(10).unwrap();
    for line in ["help status", "status", "quit", "help"] {
        history.add(line);
    }
    assert_eq!(history.search("help"), vec!["help", "help status"]);
}

#[test]
fn get_out_of_range_is_none() {
    let mut history = CommandHistory::new(3).unwrap();
    history.add("help");
    assert_eq!(history.get(1), None);
    assert_eq!(history.get(usize::MAX), None);
}

#[test]
fn save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history");

    let mut history = CommandHistory::new(10).unwrap();
    for line in ["raise ghoul", "bind a b --ritual x", "status"] {
        history.add(line);
    }
    history.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "raise ghoul\nbind a b --ritual x\nstatus\n");

    let mut restored = CommandHistory::new(10).unwrap();
    assert_eq!(restored.load(&path).unwrap(), 3);
    assert_eq!(restored.get(0), Some("status"));
    assert_eq!(restored.get(2), Some("raise ghoul"));
}

#[test]
fn load_respects_capacity() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history");
    std::fs::write(&path, "one\ntwo\nthree\nfour\n").unwrap();

    let mut history = CommandHistory::new(2).unwrap();
    assert_eq!(history.load(&path).unwrap(), 4);
    assert_eq!(history.iter_oldest_first().collect::<Vec<_>>(), vec!["three", "four"]);
}

#[test]
fn load_skips_invalid_utf8_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history");
    std::fs::write(&path, b"status\n\xff\xfe bones\nhelp\r\n").unwrap();

    let mut history = CommandHistory::new(10).unwrap();
    assert_eq!(history.load(&path).unwrap(), 2);
    assert_eq!(history.iter_oldest_first().collect::<Vec<_>>(), vec!["status", "help"]);
}

#[test]
fn failed_load_leaves_history_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut history = CommandHistory::new(10).unwrap();
    history.add("status");

    // A directory opens on Unix but fails on the first read.
    let err = history.load(dir.path()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io { .. }));
    assert_eq!(history.iter().collect::<Vec<_>>(), vec!["status"]);
}

#[test]
fn load_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let mut history = CommandHistory::new(5).unwrap();
    assert_eq!(history.load(&dir.path().join("absent")).unwrap(), 0);
    assert!(history.is_empty());
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no").join("such").join("history");
    let history = CommandHistory::new(5).unwrap();
    let err = history.save(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io { .. }));
}

#[cfg(unix)]
#[test]
fn saved_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history");
    let mut history = CommandHistory::new(5).unwrap();
    history.add("status");
    history.save(&path).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn saving_over_existing_file_makes_it_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history");
    std::fs::write(&path, "old\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let mut history = CommandHistory::new(5).unwrap();
    history.add("status");
    history.save(&path).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "status\n");
}
