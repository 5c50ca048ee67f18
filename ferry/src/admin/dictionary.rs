//! Custom analyzer dictionary editor
//!
//! The analyzer's custom word file is a plain newline-delimited text file.
//! The gateway only maintains the file; shipping it to the engine hosts and
//! reloading the analyzer happen outside this process.

use crate::config::DictionaryConfig;
use crate::response::Envelope;
use crate::Result;
use serde_json::json;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

pub struct DictionaryEditor {
    path: PathBuf,
}

impl DictionaryEditor {
    pub fn new(config: &DictionaryConfig) -> Self {
        Self {
            path: PathBuf::from(&config.path),
        }
    }

    /// Current dictionary words; a missing file is an empty dictionary
    pub fn list(&self) -> Envelope {
        match self.read_words() {
            Ok(words) => Envelope::ok(json!(words)),
            Err(err) => Envelope::fail(err.to_string()),
        }
    }

    /// Append words, skipping any already present
    ///
    /// `input` is one word or a comma-separated list. When every word is
    /// already in the file nothing is written and the call fails; otherwise
    /// the new words are appended and the refreshed list is returned.
    pub fn add(&self, input: &str) -> Envelope {
        let candidates: Vec<&str> = input
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .collect();
        if candidates.is_empty() {
            return Envelope::fail("empty key_word");
        }

        let existing = match self.read_words() {
            Ok(words) => words,
            Err(err) => return Envelope::fail(err.to_string()),
        };
        let fresh: Vec<&str> = candidates
            .iter()
            .filter(|w| !existing.iter().any(|e| e == *w))
            .copied()
            .collect();
        if fresh.is_empty() {
            return Envelope::fail_with(
                format!("already in dictionary: {input}"),
                json!(existing),
            );
        }

        if let Err(err) = self.append(&fresh) {
            return Envelope::fail(err.to_string());
        }
        info!(words = fresh.len(), path = %self.path.display(), "dictionary updated");

        match self.read_words() {
            Ok(words) => Envelope::ok(json!(words)),
            Err(err) => Envelope::fail(err.to_string()),
        }
    }

    fn read_words(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .map(str::to_string)
            .filter(|l| !l.is_empty())
            .collect())
    }

    fn append(&self, words: &[&str]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        for word in words {
            writeln!(file, "{word}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(dir: &tempfile::TempDir) -> DictionaryEditor {
        DictionaryEditor::new(&DictionaryConfig {
            path: dir
                .path()
                .join("es_ik_custom.txt")
                .to_string_lossy()
                .into_owned(),
        })
    }

    #[test]
    fn test_list_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let env = editor(&dir).list();
        assert!(env.is_ok());
        assert_eq!(env.data, json!([]));
    }

    #[test]
    fn test_add_creates_file_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let editor = editor(&dir);

        let env = editor.add("携程");
        assert!(env.is_ok());
        assert_eq!(env.data, json!(["携程"]));

        let env = editor.list();
        assert_eq!(env.data, json!(["携程"]));
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let editor = editor(&dir);
        editor.add("亲子酒店");

        let env = editor.add("亲子酒店");
        assert_eq!(env.code, -1);
        assert!(env.message.contains("already in dictionary"));
        // the list is unchanged
        assert_eq!(editor.list().data, json!(["亲子酒店"]));
    }

    #[test]
    fn test_add_comma_separated_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let editor = editor(&dir);
        editor.add("one");

        let env = editor.add("one,two,three");
        assert!(env.is_ok());
        assert_eq!(env.data, json!(["one", "two", "three"]));
    }

    #[test]
    fn test_add_empty_input_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let editor = editor(&dir);
        assert_eq!(editor.add("").code, -1);
        assert_eq!(editor.add(" , ,").code, -1);
    }
}
