//! Dictionary storage for libenglish-core.
//!
//! The dictionary is an immutable, ordered collection of known words loaded
//! once from a line-oriented word list. It is shared process-wide behind an
//! `Arc` and never mutated after load, so the matcher can scan it without
//! locking.
//!
//! Storage is a contiguous `Vec<String>`; only forward iteration in stored
//! order is ever needed, and the matcher relies on that order for its
//! bounded early-exit scan.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// Immutable ordered word list.
///
/// Words are stored verbatim as they appeared in the source, one per line,
/// with only the trailing line terminator removed. No case folding or other
/// normalization is applied at load time; matching policy lives in the
/// matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Build a dictionary from an iterator of words, preserving order.
    ///
    /// Empty and oversize entries are skipped, same as in `load`.
    pub fn from_words<I, S>(words: I, max_word_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .map(Into::into)
            .filter(|w| !w.is_empty() && w.len() <= max_word_len)
            .collect();
        Self { words }
    }

    /// Load a dictionary from a line-oriented word list.
    ///
    /// Each line is trimmed of its trailing `\n`/`\r\n` and otherwise used
    /// verbatim. Lines that are empty after trimming, or longer than
    /// `max_word_len` bytes, are skipped silently. An unreadable source is
    /// fatal: without a dictionary the engine cannot initialize.
    pub fn load<P: AsRef<Path>>(path: P, max_word_len: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open dictionary {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut words = Vec::new();
        let mut skipped = 0usize;
        for line in reader.lines() {
            let line = line
                .with_context(|| format!("failed to read dictionary {}", path.display()))?;
            let word = line.trim_end_matches(['\r', '\n']);
            if word.is_empty() || word.len() > max_word_len {
                skipped += 1;
                continue;
            }
            words.push(word.to_string());
        }
        if skipped > 0 {
            debug!(skipped, "skipped malformed dictionary lines");
        }
        debug!(words = words.len(), path = %path.display(), "dictionary loaded");
        Ok(Self { words })
    }

    /// Save the dictionary to a compiled bincode image.
    ///
    /// Loading the image with `load_bincode` skips re-parsing the word list
    /// on subsequent starts.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)
            .with_context(|| format!("failed to serialize dictionary to {}", path.display()))?;
        Ok(())
    }

    /// Load a dictionary from a bincode image produced by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open dictionary image {}", path.display()))?;
        let reader = BufReader::new(file);
        let dict: Self = bincode::deserialize_from(reader)
            .with_context(|| format!("failed to deserialize dictionary image {}", path.display()))?;
        Ok(dict)
    }

    /// Small built-in word list for smoke-testing and demos.
    pub fn load_demo() -> Self {
        Self::from_words(
            [
                "a", "an", "and", "apple", "apply", "application", "banana", "cat", "car",
                "care", "carpet", "dog", "door", "hello", "help", "world", "word", "work",
            ],
            64,
        )
    }

    /// Iterate over the words in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
