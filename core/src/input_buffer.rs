//! Edit buffer with cursor tracking.
//!
//! The buffer owns the in-progress, not-yet-committed word and the cursor
//! position within it. All mutations keep the invariant
//! `0 <= cursor <= text.len()` with the cursor on a char boundary.
//!
//! The buffer is bounded: insertion beyond `max_chars` is rejected rather
//! than growing without limit. Boundary violations (backspace at start,
//! move past either end) are not errors; they return `false` so the caller
//! can decide whether to consume the key.

/// Bounded edit buffer tracking text and cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize, // Byte offset, always on a char boundary
    max_chars: usize,
}

impl InputBuffer {
    /// Create an empty buffer holding at most `max_chars` characters.
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            max_chars: max_chars.max(1),
        }
    }

    /// Get the buffered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the cursor position as a byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the cursor position as a character offset, for host caret
    /// rendering.
    pub fn cursor_chars(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Length of the buffer in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Maximum number of characters the buffer will accept.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Clear the buffer and reset the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor and advance the cursor past it.
    /// Returns false, leaving the buffer untouched, when the buffer is
    /// already at capacity.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.char_count() >= self.max_chars {
            return false;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        true
    }

    /// Delete the character before the cursor (backspace).
    /// Returns true if a character was deleted.
    pub fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let mut prev = self.cursor - 1;
        while !self.text.is_char_boundary(prev) {
            prev -= 1;
        }
        self.text.remove(prev);
        self.cursor = prev;
        true
    }

    /// Delete the character at the cursor without moving it (delete key).
    /// Returns true if a character was deleted.
    pub fn delete_after(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    /// Move the cursor left by one character.
    /// Returns true if the cursor moved.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let mut prev = self.cursor - 1;
        while !self.text.is_char_boundary(prev) {
            prev -= 1;
        }
        self.cursor = prev;
        true
    }

    /// Move the cursor right by one character.
    /// Returns true if the cursor moved.
    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let mut next = self.cursor + 1;
        while next < self.text.len() && !self.text.is_char_boundary(next) {
            next += 1;
        }
        self.cursor = next;
        true
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(64)
    }
}
