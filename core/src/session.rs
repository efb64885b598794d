//! Per-word session state.
//!
//! `EditSession` combines the edit buffer, the candidate list, and the
//! mode flag into the state that one session owns across key events. The
//! session is purely state; the transition logic lives in the engine so
//! every mode change goes through one dispatch function.

use crate::candidate::CandidateList;
use crate::context::SessionContext;
use crate::input_buffer::InputBuffer;

/// Input mode of a session.
///
/// Two states, memoryless beyond the current buffer: no history of past
/// words is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Raw character input composes the buffer.
    #[default]
    Editing,
    /// The candidate list is being browsed.
    Suggesting,
}

/// Session state for one in-progress word.
#[derive(Debug, Clone)]
pub struct EditSession {
    buffer: InputBuffer,
    candidates: CandidateList,
    mode: Mode,
}

impl EditSession {
    /// Create an empty session in `Editing` mode.
    ///
    /// `max_word_chars` bounds the buffer; `page_size` sets how many
    /// candidates a page holds.
    pub fn new(max_word_chars: usize, page_size: usize) -> Self {
        Self {
            buffer: InputBuffer::new(max_word_chars),
            candidates: CandidateList::with_page_size(page_size),
            mode: Mode::Editing,
        }
    }

    /// Get the edit buffer.
    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Get a mutable reference to the edit buffer.
    pub fn buffer_mut(&mut self) -> &mut InputBuffer {
        &mut self.buffer
    }

    /// Get the candidate list.
    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Get a mutable reference to the candidate list.
    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }

    /// Get the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Set the mode. Leaving `Suggesting` drops the candidate list, which
    /// is only meaningful while it is being browsed.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Editing && self.mode == Mode::Suggesting {
            self.candidates.clear();
        }
        self.mode = mode;
    }

    /// Clear all session state back to an empty `Editing` session.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.candidates.clear();
        self.mode = Mode::Editing;
    }

    /// Publish session state to a context for host rendering.
    ///
    /// Candidate display strings carry a trailing space, the separator the
    /// host inserts after an accepted word.
    pub fn sync_to_context(&self, context: &mut SessionContext) {
        context.preedit_text.clear();
        context.candidates.clear();

        context.preedit_text.push_str(self.buffer.text());
        context.preedit_cursor = self.buffer.cursor_chars();
        context.candidates = self
            .candidates
            .current_page_candidates()
            .iter()
            .map(|c| format!("{} ", c.text))
            .collect();
        context.candidate_cursor = self.candidates.cursor();
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(64, 10)
    }
}
