//! Candidate matching against the dictionary.
//!
//! The matcher turns the current buffer into a bounded, ranked candidate
//! list. Inclusion is decided per word before paying for a distance
//! computation:
//!
//! 1. Short buffers (at most `short_word_len` chars) require an exact
//!    case-insensitive prefix match. Edit distance is unstable on short
//!    strings, so no fuzziness applies there.
//! 2. Longer buffers first reject words whose length differs by more than
//!    `length_window`, then accept on normalized distance below
//!    `distance_threshold`.
//!
//! The scan walks the dictionary in stored order and stops as soon as
//! `candidate_limit` words have been accepted. This is a bounded early-exit
//! scan, not a global top-K: a later word that would outscore an already
//! accepted one is never considered once the cap is hit. The retained
//! candidates are then sorted closest-first.

use crate::candidate::Candidate;
use crate::distance;
use crate::{Config, Dictionary};
use lru::LruCache;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

/// Matching engine over a shared dictionary.
///
/// Results are memoized in an LRU cache keyed by the buffer text; the
/// dictionary is immutable for the process lifetime, so entries never need
/// invalidation.
pub struct Matcher {
    dictionary: Arc<Dictionary>,
    config: Config,
    cache: RefCell<LruCache<String, Vec<Candidate>>>,
    cache_hits: RefCell<usize>,
    cache_misses: RefCell<usize>,
}

impl Matcher {
    /// Create a matcher over the given dictionary.
    pub fn new(dictionary: Arc<Dictionary>, config: Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size)
            .unwrap_or_else(|| NonZeroUsize::new(1000).unwrap());
        Self {
            dictionary,
            config,
            cache: RefCell::new(LruCache::new(capacity)),
            cache_hits: RefCell::new(0),
            cache_misses: RefCell::new(0),
        }
    }

    /// The shared dictionary this matcher scans.
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// The matching configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Produce the ranked candidate list for the current buffer.
    ///
    /// Returns at most `candidate_limit` candidates, closest first. An
    /// empty buffer has no candidates.
    pub fn candidates(&self, buffer: &str) -> Vec<Candidate> {
        if buffer.is_empty() {
            return Vec::new();
        }

        if let Some(cached) = self.cache.borrow_mut().get(buffer) {
            *self.cache_hits.borrow_mut() += 1;
            return cached.clone();
        }
        *self.cache_misses.borrow_mut() += 1;

        let result = self.scan(buffer);
        self.cache
            .borrow_mut()
            .put(buffer.to_string(), result.clone());
        result
    }

    fn scan(&self, buffer: &str) -> Vec<Candidate> {
        let buffer_chars = buffer.chars().count();
        let short = buffer_chars <= self.config.short_word_len;
        let capitalized = buffer.chars().next().is_some_and(char::is_uppercase);
        let buffer_lower = buffer.to_lowercase();

        let mut accepted: Vec<Candidate> = Vec::with_capacity(self.config.candidate_limit);
        let mut scanned = 0usize;
        for word in self.dictionary.iter() {
            scanned += 1;
            let dist = if short {
                if !starts_with_ignore_case(word, buffer) {
                    continue;
                }
                0.0
            } else {
                let word_chars = word.chars().count();
                if word_chars.abs_diff(buffer_chars) > self.config.length_window {
                    continue;
                }
                let d = distance::normalized(
                    &buffer_lower,
                    &word.to_lowercase(),
                    self.config.max_offset,
                );
                if d >= self.config.distance_threshold {
                    continue;
                }
                d
            };

            let text = if capitalized {
                capitalize(word)
            } else {
                word.to_string()
            };
            accepted.push(Candidate::new(text, dist));
            if accepted.len() == self.config.candidate_limit {
                break;
            }
        }

        // Short-buffer candidates are all exact prefixes with distance 0;
        // there is nothing meaningful to order them by.
        if !short {
            accepted.sort_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        debug!(
            buffer,
            scanned,
            accepted = accepted.len(),
            "candidate scan"
        );
        accepted
    }

    /// Cache statistics as a `(hits, misses)` tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        (*self.cache_hits.borrow(), *self.cache_misses.borrow())
    }

    /// Drop all cached results and reset the counters.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        *self.cache_hits.borrow_mut() = 0;
        *self.cache_misses.borrow_mut() = 0;
    }
}

/// Capitalize the first character of a word.
///
/// Used to transfer the buffer's leading uppercase onto a chosen candidate
/// before it is offered or committed.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn starts_with_ignore_case(word: &str, prefix: &str) -> bool {
    let mut word_chars = word.chars().flat_map(char::to_lowercase);
    for p in prefix.chars().flat_map(char::to_lowercase) {
        match word_chars.next() {
            Some(w) if w == p => {}
            _ => return false,
        }
    }
    true
}
