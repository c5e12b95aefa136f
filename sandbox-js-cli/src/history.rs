use std::fs;
use std::path::PathBuf;

/// Maximum number of retained entries, oldest first.
const CAP: usize = 1000;

/// Interactive-mode input history, persisted as a JSON array of strings at
/// `$HOME/.sandbox-js/history.json`.
///
/// History I/O is best-effort: a missing or corrupt file loads as empty, and
/// save failures are ignored.
pub struct History {
  entries: Vec<String>,
  path: Option<PathBuf>,
}

impl History {
  pub fn load() -> History {
    let path = default_path();
    let entries = path
      .as_ref()
      .and_then(|path| fs::read_to_string(path).ok())
      .and_then(|text| serde_json::from_str::<Vec<String>>(&text).ok())
      .unwrap_or_default();
    History { entries, path }
  }

  #[cfg(test)]
  fn in_memory(entries: Vec<String>) -> History {
    History {
      entries,
      path: None,
    }
  }

  /// Append a line, dropping it when it duplicates the immediately preceding
  /// entry, and trimming to the cap from the front.
  pub fn push(&mut self, line: &str) {
    if self.entries.last().map(String::as_str) == Some(line) {
      return;
    }
    self.entries.push(line.to_string());
    if self.entries.len() > CAP {
      let excess = self.entries.len() - CAP;
      self.entries.drain(..excess);
    }
  }

  pub fn save(&self) {
    let Some(path) = &self.path else {
      return;
    };
    if let Some(dir) = path.parent() {
      if fs::create_dir_all(dir).is_err() {
        return;
      }
    }
    if let Ok(json) = serde_json::to_string_pretty(&self.entries) {
      let _ = fs::write(path, json);
    }
  }

  pub fn entries(&self) -> &[String] {
    &self.entries
  }
}

fn default_path() -> Option<PathBuf> {
  let home = std::env::var_os("HOME")?;
  Some(PathBuf::from(home).join(".sandbox-js").join("history.json"))
}

#[cfg(test)]
mod tests {
  use super::{History, CAP};

  #[test]
  fn collapses_adjacent_duplicates() {
    let mut history = History::in_memory(vec![]);
    history.push("a");
    history.push("a");
    history.push("b");
    history.push("a");
    assert_eq!(history.entries(), ["a", "b", "a"]);
  }

  #[test]
  fn caps_oldest_first() {
    let mut history = History::in_memory(vec![]);
    for i in 0..(CAP + 5) {
      history.push(&i.to_string());
    }
    assert_eq!(history.entries().len(), CAP);
    assert_eq!(history.entries()[0], "5");
  }
}
