//! Word list loading.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use cubi_core::error::{CubiError, Result};

/// Ordered, immutable list of distinct words.
///
/// Lines are trimmed, blank lines skipped, and repeated words kept only at
/// their first position, so every index names a different word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Builds a list from any sequence of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_owned())
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    /// Parses a line-delimited word list.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    /// Reads a line-delimited word list.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self::from_words(lines))
    }

    /// Loads a line-delimited word list file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| CubiError::WordListError(format!("{}: {}", path.display(), e)))?;
        let list = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), words = list.len(), "Loaded word list");
        Ok(list)
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the list holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the words in file order.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Number of distinct identifiers of `n` words, if it fits in a `u128`.
    ///
    /// Draw order is kept in the identifier, so this counts arrangements
    /// `m! / (m - n)!` rather than subsets.
    pub fn identifier_space(&self, n: usize) -> Option<u128> {
        let m = self.words.len();
        if n > m {
            return Some(0);
        }
        (0..n).try_fold(1u128, |acc, i| acc.checked_mul((m - i) as u128))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_trims_and_skips_blank() {
        let list = WordList::parse("alpha\n  bravo \n\n\r\ncharlie\r\n");
        assert_eq!(list.as_slice(), ["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_parse_dedupes_keeping_order() {
        let list = WordList::parse("bravo\nalpha\nbravo\ncharlie\nalpha\n");
        assert_eq!(list.as_slice(), ["bravo", "alpha", "charlie"]);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nbravo\ncharlie").unwrap();

        let list = WordList::from_path(file.path()).unwrap();
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_from_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = WordList::from_path(dir.path().join("wordlist"));
        assert!(matches!(result, Err(CubiError::WordListError(_))));
    }

    #[test]
    fn test_identifier_space() {
        let list = WordList::parse("a\nb\nc\nd\n");
        assert_eq!(list.identifier_space(0), Some(1));
        assert_eq!(list.identifier_space(2), Some(12));
        assert_eq!(list.identifier_space(4), Some(24));
        assert_eq!(list.identifier_space(5), Some(0));
    }
}
