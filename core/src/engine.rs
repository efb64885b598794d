//! Keystroke engine: per-event dispatch, mode transitions, commits.
//!
//! The engine is the per-keystroke orchestrator. The host decodes platform
//! key codes into `KeyEvent`s and feeds them in one at a time; the engine
//! mutates the session, consults the matcher when suggestions are wanted,
//! and returns an `Outcome` telling the host what happened. It is a plain
//! state-transition function over `(session, event)`; the host owns the
//! event loop, rendering, and process lifecycle.

use crate::context::SessionContext;
use crate::matcher::Matcher;
use crate::session::{EditSession, Mode};
use crate::{Config, Dictionary};
use std::sync::Arc;
use tracing::debug;

/// Abstract key event supplied by the host.
///
/// The host is responsible for classifying raw platform key codes into
/// these logical events; the engine never sees key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Printable character input.
    Char(char),
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Candidate cursor up.
    Up,
    /// Candidate cursor down.
    Down,
    /// Candidate page up.
    PageUp,
    /// Candidate page down.
    PageDown,
    /// Suggestion toggle (Tab).
    Toggle,
    /// Cancel the current word (Escape).
    Escape,
    /// Enter/Return.
    Enter,
    /// Digit key; selects a candidate while suggesting, otherwise inserts
    /// the digit. 1-9 select the first nine candidates, 0 the tenth.
    Number(u8),
}

/// What a processed key event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Key not consumed; the host should handle it unmodified.
    PassThrough,
    /// Buffer or candidates changed; nothing committed yet.
    Redisplay,
    /// The carried text is final output; the session has been reset.
    Commit(String),
    /// The current word was discarded; session reset, nothing emitted.
    ClearAndReset,
}

/// Per-session keystroke engine.
///
/// Owns the session state and a matcher over the shared dictionary. One
/// event is processed to completion before the next is accepted; there is
/// no cross-session state.
pub struct Engine {
    matcher: Matcher,
    session: EditSession,
    context: SessionContext,
}

impl Engine {
    /// Create an engine over the given dictionary and configuration.
    pub fn new(dictionary: Arc<Dictionary>, config: Config) -> Self {
        let session = EditSession::new(config.max_word_len, config.page_size);
        Self {
            matcher: Matcher::new(dictionary, config),
            session,
            context: SessionContext::new(),
        }
    }

    /// Create an engine with the default configuration.
    pub fn with_defaults(dictionary: Arc<Dictionary>) -> Self {
        Self::new(dictionary, Config::default())
    }

    /// Get the context for reading engine state after an event.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Get a mutable reference to the context (e.g. to consume commits).
    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    /// Get the session state.
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Get the matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Reset to an empty `Editing` session.
    pub fn reset(&mut self) {
        self.session.clear();
        self.context.clear();
    }

    /// Process one key event and return the outcome.
    ///
    /// The context is synced for rendering on every consumed event; on
    /// `Outcome::Commit` the committed text is also available in
    /// `context().commit_text` until the host takes it.
    pub fn process_key(&mut self, key: KeyEvent) -> Outcome {
        self.context.commit_text.clear();

        // Digits arriving as characters behave exactly like Number keys:
        // selection while suggesting, ordinary input otherwise.
        let key = match key {
            KeyEvent::Char(ch) if ch.is_ascii_digit() => {
                KeyEvent::Number(ch as u8 - b'0')
            }
            other => other,
        };

        debug!(buf = %self.session.buffer().text(), ?key, "key event");

        let outcome = self.dispatch(key);
        if outcome != Outcome::PassThrough {
            self.session.sync_to_context(&mut self.context);
        }
        outcome
    }

    fn dispatch(&mut self, key: KeyEvent) -> Outcome {
        let buffer_empty = self.session.buffer().is_empty();
        match key {
            KeyEvent::Number(n)
                if self.session.mode() == Mode::Suggesting
                    && !self.session.candidates().is_empty() =>
            {
                let index = if n == 0 { 9 } else { (n - 1) as usize };
                // The matcher already applied the capitalization rule when
                // it collected the candidate.
                let selected = self
                    .session
                    .candidates_mut()
                    .select_by_index(index)
                    .map(|c| c.text.clone());
                match selected {
                    Some(word) => self.commit(format!("{word} ")),
                    None => Outcome::Redisplay,
                }
            }
            KeyEvent::Number(n) => self.insert((b'0' + n) as char),
            KeyEvent::Char(ch) if is_word_char(ch) => self.insert(ch),
            KeyEvent::Toggle => {
                if buffer_empty {
                    return Outcome::PassThrough;
                }
                match self.session.mode() {
                    Mode::Suggesting => self.session.set_mode(Mode::Editing),
                    Mode::Editing => {
                        if self.session.buffer().char_count()
                            >= self.matcher.config().min_suggest_len
                        {
                            self.enter_suggesting();
                        }
                        // Below the threshold the toggle lands back in
                        // Editing; the key is still consumed.
                    }
                }
                Outcome::Redisplay
            }
            KeyEvent::Left => {
                if buffer_empty {
                    return Outcome::PassThrough;
                }
                self.session.buffer_mut().move_left();
                self.session.set_mode(Mode::Editing);
                Outcome::Redisplay
            }
            KeyEvent::Right => {
                if buffer_empty {
                    return Outcome::PassThrough;
                }
                self.session.buffer_mut().move_right();
                self.session.set_mode(Mode::Editing);
                Outcome::Redisplay
            }
            KeyEvent::Backspace => {
                if buffer_empty {
                    return Outcome::PassThrough;
                }
                self.session.buffer_mut().delete_before();
                self.session.set_mode(Mode::Editing);
                if self.session.buffer().is_empty() {
                    self.session.clear();
                    Outcome::ClearAndReset
                } else {
                    Outcome::Redisplay
                }
            }
            KeyEvent::Delete => {
                if buffer_empty {
                    return Outcome::PassThrough;
                }
                self.session.buffer_mut().delete_after();
                self.session.set_mode(Mode::Editing);
                if self.session.buffer().is_empty() {
                    self.session.clear();
                    Outcome::ClearAndReset
                } else {
                    Outcome::Redisplay
                }
            }
            KeyEvent::Up | KeyEvent::Down | KeyEvent::PageUp | KeyEvent::PageDown => {
                if self.session.mode() != Mode::Suggesting
                    || self.session.candidates().is_empty()
                {
                    return Outcome::PassThrough;
                }
                let candidates = self.session.candidates_mut();
                match key {
                    KeyEvent::Up => candidates.cursor_up(),
                    KeyEvent::Down => candidates.cursor_down(),
                    KeyEvent::PageUp => candidates.page_up(),
                    KeyEvent::PageDown => candidates.page_down(),
                    _ => unreachable!(),
                };
                Outcome::Redisplay
            }
            KeyEvent::Escape => {
                if buffer_empty {
                    return Outcome::PassThrough;
                }
                self.session.clear();
                Outcome::ClearAndReset
            }
            KeyEvent::Enter => {
                if buffer_empty {
                    return Outcome::PassThrough;
                }
                let text = self.session.buffer().text().to_string();
                self.commit(text)
            }
            KeyEvent::Char(ch) => {
                // Any other printable character ends the word: it is
                // appended to the output and the buffer is committed.
                if buffer_empty {
                    return Outcome::PassThrough;
                }
                let text = format!("{}{}", self.session.buffer().text(), ch);
                self.commit(text)
            }
        }
    }

    /// Insert a word character at the cursor. Typing always drops back to
    /// `Editing`; a full buffer refuses the character but the key is still
    /// consumed.
    fn insert(&mut self, ch: char) -> Outcome {
        self.session.buffer_mut().insert_char(ch);
        self.session.set_mode(Mode::Editing);
        Outcome::Redisplay
    }

    fn enter_suggesting(&mut self) {
        let found = self.matcher.candidates(self.session.buffer().text());
        self.session.candidates_mut().set_candidates(found);
        self.session.set_mode(Mode::Suggesting);
    }

    fn commit(&mut self, text: String) -> Outcome {
        debug!(text = %text, "commit");
        self.context.commit_text = text.clone();
        self.session.clear();
        Outcome::Commit(text)
    }
}

/// In-word characters: letters, digits, hyphen, apostrophe.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '\''
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(words: &[&str]) -> Engine {
        let dict = Arc::new(Dictionary::from_words(words.iter().copied(), 64));
        Engine::with_defaults(dict)
    }

    fn type_str(engine: &mut Engine, s: &str) {
        for ch in s.chars() {
            engine.process_key(KeyEvent::Char(ch));
        }
    }

    #[test]
    fn typing_composes_buffer() {
        let mut engine = engine_with(&["hello"]);
        type_str(&mut engine, "hel");
        assert_eq!(engine.session().buffer().text(), "hel");
        assert_eq!(engine.context().preedit_text, "hel");
        assert_eq!(engine.context().preedit_cursor, 3);
    }

    #[test]
    fn space_commits_buffer_with_separator() {
        let mut engine = engine_with(&["hello"]);
        type_str(&mut engine, "hello");
        let outcome = engine.process_key(KeyEvent::Char(' '));
        assert_eq!(outcome, Outcome::Commit("hello ".to_string()));
        assert_eq!(engine.session().mode(), Mode::Editing);
        assert!(engine.session().buffer().is_empty());
        assert_eq!(engine.context().commit_text, "hello ");
        assert!(engine.context().preedit_text.is_empty());
    }

    #[test]
    fn enter_commits_buffer_as_is() {
        let mut engine = engine_with(&["hello"]);
        type_str(&mut engine, "hello");
        let outcome = engine.process_key(KeyEvent::Enter);
        assert_eq!(outcome, Outcome::Commit("hello".to_string()));
    }

    #[test]
    fn punctuation_terminates_the_word() {
        let mut engine = engine_with(&["hello"]);
        type_str(&mut engine, "well");
        let outcome = engine.process_key(KeyEvent::Char('.'));
        assert_eq!(outcome, Outcome::Commit("well.".to_string()));
    }

    #[test]
    fn hyphen_and_apostrophe_are_word_chars() {
        let mut engine = engine_with(&[]);
        type_str(&mut engine, "don't");
        assert_eq!(engine.session().buffer().text(), "don't");
        type_str(&mut engine, "-");
        assert_eq!(engine.session().buffer().text(), "don't-");
    }

    #[test]
    fn empty_buffer_passes_keys_through() {
        let mut engine = engine_with(&["hello"]);
        for key in [
            KeyEvent::Char(' '),
            KeyEvent::Enter,
            KeyEvent::Escape,
            KeyEvent::Backspace,
            KeyEvent::Delete,
            KeyEvent::Left,
            KeyEvent::Right,
            KeyEvent::Toggle,
            KeyEvent::Char('.'),
        ] {
            assert_eq!(engine.process_key(key), Outcome::PassThrough, "{key:?}");
        }
    }

    #[test]
    fn toggle_enters_suggesting_above_threshold() {
        let mut engine = engine_with(&["apple", "apply", "ape"]);
        type_str(&mut engine, "appl");
        let outcome = engine.process_key(KeyEvent::Toggle);
        assert_eq!(outcome, Outcome::Redisplay);
        assert_eq!(engine.session().mode(), Mode::Suggesting);
        assert_eq!(engine.context().candidates, vec!["apple ", "apply "]);
    }

    #[test]
    fn toggle_below_threshold_stays_editing() {
        let mut engine = engine_with(&["apple"]);
        type_str(&mut engine, "ap");
        let outcome = engine.process_key(KeyEvent::Toggle);
        assert_eq!(outcome, Outcome::Redisplay);
        assert_eq!(engine.session().mode(), Mode::Editing);
        assert!(engine.session().candidates().is_empty());
    }

    #[test]
    fn toggle_flips_back_to_editing() {
        let mut engine = engine_with(&["apple"]);
        type_str(&mut engine, "appl");
        engine.process_key(KeyEvent::Toggle);
        assert_eq!(engine.session().mode(), Mode::Suggesting);
        engine.process_key(KeyEvent::Toggle);
        assert_eq!(engine.session().mode(), Mode::Editing);
        assert!(engine.session().candidates().is_empty());
    }

    #[test]
    fn typing_while_suggesting_returns_to_editing() {
        let mut engine = engine_with(&["apple"]);
        type_str(&mut engine, "appl");
        engine.process_key(KeyEvent::Toggle);
        assert_eq!(engine.session().mode(), Mode::Suggesting);
        engine.process_key(KeyEvent::Char('e'));
        assert_eq!(engine.session().mode(), Mode::Editing);
        assert_eq!(engine.session().buffer().text(), "apple");
        assert!(engine.session().candidates().is_empty());
    }

    #[test]
    fn digit_selects_candidate_while_suggesting() {
        let mut engine = engine_with(&["apple", "apply"]);
        type_str(&mut engine, "appl");
        engine.process_key(KeyEvent::Toggle);
        let outcome = engine.process_key(KeyEvent::Char('2'));
        assert_eq!(outcome, Outcome::Commit("apply ".to_string()));
        assert!(engine.session().buffer().is_empty());
        assert_eq!(engine.session().mode(), Mode::Editing);
    }

    #[test]
    fn digit_out_of_range_is_consumed_without_commit() {
        let mut engine = engine_with(&["apple"]);
        type_str(&mut engine, "appl");
        engine.process_key(KeyEvent::Toggle);
        let outcome = engine.process_key(KeyEvent::Number(9));
        assert_eq!(outcome, Outcome::Redisplay);
        assert!(!engine.context().has_commit());
    }

    #[test]
    fn digit_inserts_while_editing() {
        let mut engine = engine_with(&[]);
        type_str(&mut engine, "b2");
        assert_eq!(engine.session().buffer().text(), "b2");
    }

    #[test]
    fn capitalized_buffer_commits_capitalized_candidate() {
        let mut engine = engine_with(&["apple"]);
        type_str(&mut engine, "Appl");
        engine.process_key(KeyEvent::Toggle);
        let outcome = engine.process_key(KeyEvent::Number(1));
        assert_eq!(outcome, Outcome::Commit("Apple ".to_string()));
    }

    #[test]
    fn escape_discards_the_word() {
        let mut engine = engine_with(&["hello"]);
        type_str(&mut engine, "hel");
        let outcome = engine.process_key(KeyEvent::Escape);
        assert_eq!(outcome, Outcome::ClearAndReset);
        assert!(engine.session().buffer().is_empty());
        assert_eq!(engine.session().mode(), Mode::Editing);
        assert!(!engine.context().has_commit());
    }

    #[test]
    fn backspace_to_empty_resets() {
        let mut engine = engine_with(&["hi"]);
        type_str(&mut engine, "h");
        let outcome = engine.process_key(KeyEvent::Backspace);
        assert_eq!(outcome, Outcome::ClearAndReset);
        assert!(engine.session().buffer().is_empty());
    }

    #[test]
    fn cursor_moves_edit_in_place() {
        let mut engine = engine_with(&[]);
        type_str(&mut engine, "wrd");
        engine.process_key(KeyEvent::Left);
        engine.process_key(KeyEvent::Left);
        engine.process_key(KeyEvent::Char('o'));
        assert_eq!(engine.session().buffer().text(), "word");
        let outcome = engine.process_key(KeyEvent::Char(' '));
        assert_eq!(outcome, Outcome::Commit("word ".to_string()));
    }

    #[test]
    fn buffer_overflow_is_rejected_but_consumed() {
        let mut config = Config::default();
        config.max_word_len = 4;
        let dict = Arc::new(Dictionary::from_words(["aaaa"], 64));
        let mut engine = Engine::new(dict, config);
        type_str(&mut engine, "aaaaaa");
        assert_eq!(engine.session().buffer().text(), "aaaa");
        let outcome = engine.process_key(KeyEvent::Char('a'));
        assert_eq!(outcome, Outcome::Redisplay);
        assert_eq!(engine.session().buffer().text(), "aaaa");
    }

    #[test]
    fn candidate_pages_follow_configured_page_size() {
        let mut config = Config::default();
        config.page_size = 2;
        let dict = Arc::new(Dictionary::from_words(
            ["cata", "catb", "catc", "catd"],
            64,
        ));
        let mut engine = Engine::new(dict, config);
        type_str(&mut engine, "cat");
        engine.process_key(KeyEvent::Toggle);
        assert_eq!(engine.context().candidates, vec!["cata ", "catb "]);

        assert_eq!(engine.process_key(KeyEvent::PageDown), Outcome::Redisplay);
        assert_eq!(engine.context().candidates, vec!["catc ", "catd "]);

        // Digit selection is relative to the visible page.
        let outcome = engine.process_key(KeyEvent::Number(2));
        assert_eq!(outcome, Outcome::Commit("catd ".to_string()));
    }

    #[test]
    fn candidate_navigation_moves_cursor() {
        let mut engine = engine_with(&["apple", "apply", "appls"]);
        type_str(&mut engine, "appl");
        engine.process_key(KeyEvent::Toggle);
        assert_eq!(engine.context().candidate_cursor, 0);
        engine.process_key(KeyEvent::Down);
        assert_eq!(engine.context().candidate_cursor, 1);
        engine.process_key(KeyEvent::Up);
        assert_eq!(engine.context().candidate_cursor, 0);
    }

    #[test]
    fn navigation_passes_through_while_editing() {
        let mut engine = engine_with(&["apple"]);
        type_str(&mut engine, "appl");
        assert_eq!(engine.process_key(KeyEvent::Down), Outcome::PassThrough);
        assert_eq!(engine.process_key(KeyEvent::PageDown), Outcome::PassThrough);
    }
}
