//! libenglish-core
//!
//! Editing buffer, approximate word matcher, and keystroke session engine
//! for incremental English text entry: as the user types, the engine keeps
//! a cursor-aware buffer of the in-progress word and, on request, offers
//! ranked completions and corrections from a static dictionary, committing
//! a final string when the user accepts a candidate or ends the word.
//!
//! Public API:
//! - `Dictionary` - immutable ordered word list, loaded once
//! - `InputBuffer` - bounded edit buffer with cursor tracking
//! - `Matcher` - fuzzy filtering and ranking over the dictionary
//! - `Engine` / `KeyEvent` / `Outcome` - per-keystroke orchestration
//! - `SessionContext` - state handed to the host for rendering
//! - `Config` - thresholds and limits, TOML-backed

use serde::{Deserialize, Serialize};

pub mod dictionary;
pub use dictionary::Dictionary;

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod candidate;
pub use candidate::{Candidate, CandidateList};

pub mod distance;
pub use distance::{normalized, sift3};

pub mod matcher;
pub use matcher::Matcher;

pub mod session;
pub use session::{EditSession, Mode};

pub mod context;
pub use context::SessionContext;

pub mod engine;
pub use engine::{Engine, KeyEvent, Outcome};

/// Configuration for matching and session behavior.
///
/// The defaults reproduce the tuning the matcher was calibrated with; the
/// `distance_threshold` only makes sense together with the
/// average-length normalization in `distance::normalized`, so change them
/// as a pair.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Maximum word length in characters; the buffer rejects insertions
    /// beyond this and the dictionary loader skips longer lines.
    pub max_word_len: usize,

    /// Buffers of this many characters or fewer use the exact
    /// case-insensitive prefix rule instead of fuzzy distance.
    pub short_word_len: usize,

    /// Candidate cap: the dictionary scan stops once this many words have
    /// been accepted.
    pub candidate_limit: usize,

    /// Candidates shown per page. With the default equal to
    /// `candidate_limit` everything fits on one page; a smaller value
    /// spreads the list across pages reachable with PageUp/PageDown.
    pub page_size: usize,

    /// Normalized distance below which a word qualifies as a candidate.
    pub distance_threshold: f32,

    /// Resynchronization window of the alignment distance.
    pub max_offset: usize,

    /// Maximum length difference (in characters) between buffer and word
    /// before the word is rejected without a distance computation.
    pub length_window: usize,

    /// Minimum buffered characters before the toggle key may enter
    /// suggestion mode.
    pub min_suggest_len: usize,

    /// Maximum number of entries in the buffer -> candidates cache.
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_word_len: 64,
            short_word_len: 4,
            candidate_limit: 10,
            page_size: 10,
            distance_threshold: 0.4,
            max_offset: 2,
            length_window: 2,
            min_suggest_len: 3,
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_tuning() {
        let config = Config::default();
        assert_eq!(config.max_word_len, 64);
        assert_eq!(config.short_word_len, 4);
        assert_eq!(config.candidate_limit, 10);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.distance_threshold, 0.4);
        assert_eq!(config.max_offset, 2);
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = Config::default();
        config.distance_threshold = 0.33;
        config.candidate_limit = 5;
        let text = config.to_toml_string().unwrap();
        let loaded = Config::from_toml_str(&text).unwrap();
        assert_eq!(loaded.distance_threshold, 0.33);
        assert_eq!(loaded.candidate_limit, 5);
        assert_eq!(loaded.max_word_len, 64);
    }

    #[test]
    fn load_toml_missing_file_fails() {
        let missing = std::env::temp_dir().join("libenglish_no_such_config.toml");
        assert!(Config::load_toml(missing).is_err());
    }
}
