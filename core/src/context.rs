//! Session context for host communication.
//!
//! `SessionContext` is a plain data container with public fields. After
//! each processed key event the host reads these fields to render the
//! preedit fragment, the caret, and the candidate list, and to consume any
//! committed text. No callbacks, no traits; the host reads and writes
//! fields directly.

/// State handed to the host after each key event.
///
/// - `preedit_text`: the in-progress buffer as displayed
/// - `preedit_cursor`: caret position within the preedit, in characters
/// - `commit_text`: finalized text to insert into the target application
/// - `candidates`: display strings for the current candidate page
/// - `candidate_cursor`: highlighted candidate index within the page
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub preedit_text: String,
    pub preedit_cursor: usize,
    pub commit_text: String,
    pub candidates: Vec<String>,
    pub candidate_cursor: usize,
}

impl SessionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the visible state. `commit_text` is left alone so the host
    /// can consume it first.
    pub fn clear(&mut self) {
        self.preedit_text.clear();
        self.preedit_cursor = 0;
        self.candidates.clear();
        self.candidate_cursor = 0;
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    /// Check if there is text to commit.
    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }

    /// Check if there is anything visible to render.
    pub fn has_visible_state(&self) -> bool {
        !self.preedit_text.is_empty() || !self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_preserves_commit_text() {
        let mut context = SessionContext::new();
        context.preedit_text = "wor".to_string();
        context.commit_text = "word ".to_string();
        context.clear();
        assert!(context.preedit_text.is_empty());
        assert!(context.has_commit());
        assert_eq!(context.take_commit(), "word ");
        assert!(!context.has_commit());
    }
}
