//! Command history.
//!
//! A fixed-capacity ring of previously entered lines. When full, adding a
//! line evicts the oldest. Index 0 is always the most recent line.
//!
//! History persists to a plain text file with one line per entry, oldest
//! first. On Unix the file is restricted to its owner.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use necroshell_foundation::{Error, Result};

/// File name used by [`CommandHistory::default_path`].
pub const HISTORY_FILE_NAME: &str = ".necromancers_shell_history";

/// Bounded input history.
#[derive(Clone, Debug)]
pub struct CommandHistory {
    /// Entries, oldest first.
    entries: VecDeque<String>,
    capacity: usize,
}

impl CommandHistory {
    /// Creates an empty history holding at most `capacity` lines.
    ///
    /// # Errors
    ///
    /// Returns an invalid capacity error when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_capacity(capacity));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        })
    }

    /// Records a line.
    ///
    /// Empty lines and lines equal to the most recent entry are skipped.
    /// Skipping is not an error; the return value only reports whether a
    /// new entry was stored.
    pub fn add(&mut self, line: &str) -> bool {
        if line.is_empty() || self.get(0) == Some(line) {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
        true
    }

    /// Returns the entry `index` steps back; 0 is the most recent.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        let position = self.entries.len().checked_sub(index)?.checked_sub(1)?;
        self.entries.get(position).map(String::as_str)
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates entries from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().map(String::as_str)
    }

    /// Iterates entries from oldest to most recent.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Returns every entry containing `pattern`, most recent first.
    /// Matching is case-sensitive.
    #[must_use]
    pub fn search(&self, pattern: &str) -> Vec<&str> {
        self.iter().filter(|line| line.contains(pattern)).collect()
    }

    /// Writes every entry to `path`, oldest first, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.write_to(path).map_err(|e| Error::io(path, e))?;
        restrict_permissions(path).map_err(|e| Error::io(path, e))?;
        log::debug!("saved {} history entries to {}", self.len(), path.display());
        Ok(())
    }

    fn write_to(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(create_private(path)?);
        for line in self.iter_oldest_first() {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }

    /// Replays the lines of `path` through [`CommandHistory::add`].
    ///
    /// A missing file is not an error. Lines that are not valid UTF-8 are
    /// logged and skipped. Returns the number of lines replayed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read. The
    /// history is left unchanged in that case.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no history file at {}", path.display());
                return Ok(0);
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        let mut loaded = self.clone();
        let mut count = 0;
        for (number, raw) in BufReader::new(file).split(b'\n').enumerate() {
            let mut raw = raw.map_err(|e| Error::io(path, e))?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            match String::from_utf8(raw) {
                Ok(line) => {
                    loaded.add(&line);
                    count += 1;
                }
                Err(_) => log::warn!(
                    "skipping line {} of {}: not valid UTF-8",
                    number + 1,
                    path.display()
                ),
            }
        }
        *self = loaded;
        log::debug!("loaded {count} history lines from {}", path.display());
        Ok(count)
    }

    /// Returns the default history file location.
    ///
    /// Uses `$HOME`, then `%USERPROFILE%`, then `%HOMEDRIVE%%HOMEPATH%`, and
    /// falls back to the current directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        home_dir().map_or_else(|| PathBuf::from(HISTORY_FILE_NAME), |home| home.join(HISTORY_FILE_NAME))
    }
}

fn home_dir() -> Option<PathBuf> {
    let non_empty = |key: &str| std::env::var_os(key).filter(|v| !v.is_empty());

    if let Some(home) = non_empty("HOME").or_else(|| non_empty("USERPROFILE")) {
        return Some(PathBuf::from(home));
    }
    let drive = non_empty("HOMEDRIVE")?;
    let path = non_empty("HOMEPATH")?;
    let mut home = PathBuf::from(drive);
    home.push(path);
    Some(home)
}

/// Creates or truncates `path`. On Unix a new file is owner-only from the
/// moment it exists.
#[cfg(unix)]
fn create_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> io::Result<File> {
    File::create(path)
}

// An existing file keeps its old mode through `create_private`.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
