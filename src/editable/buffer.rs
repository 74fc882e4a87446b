//! Text buffer traits and implementations for flat editable fields.
//!
//! Provides `TextBuffer` (read-only) and `TextBufferMut` (read-write) traits
//! that abstract over the two field backends (String for single-line inputs,
//! Rope for multi-line text areas). All offsets are character offsets.

use ropey::Rope;
use std::ops::Range;

/// Read-only view into a field's text.
pub trait TextBuffer {
    /// Total length in characters
    fn len_chars(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Get slice of text as String (by character indices, clamped to the buffer)
    fn slice(&self, range: Range<usize>) -> String;

    /// Get full content as String
    fn content(&self) -> String;
}

/// Mutable buffer operations. Extends TextBuffer.
pub trait TextBufferMut: TextBuffer {
    /// Insert text at character offset
    fn insert(&mut self, offset: usize, text: &str);

    /// Remove text in character range
    fn remove(&mut self, range: Range<usize>);

    /// Replace text in range with new text
    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.remove(range.clone());
        self.insert(range.start, text);
    }

    /// Set content, replacing everything
    fn set_content(&mut self, text: &str) {
        let len = self.len_chars();
        self.replace(0..len, text);
    }
}

// =============================================================================
// StringBuffer - for single-line inputs (text, search, url, tel, ...)
// =============================================================================

/// TextBuffer implementation wrapping String. Used for single-line inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Create a StringBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    /// Access the underlying string
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Convert char offset to byte offset
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl TextBuffer for StringBuffer {
    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn slice(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return String::new();
        }
        self.text.chars().skip(start).take(end - start).collect()
    }

    fn content(&self) -> String {
        self.text.clone()
    }
}

impl TextBufferMut for StringBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let byte_offset = self.char_to_byte(offset);
        self.text.insert_str(byte_offset, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start_byte = self.char_to_byte(range.start);
        let end_byte = self.char_to_byte(range.end);
        if start_byte < end_byte {
            self.text.replace_range(start_byte..end_byte, "");
        }
    }
}

// =============================================================================
// RopeBuffer - for multi-line text areas
// =============================================================================

/// TextBuffer implementation wrapping ropey::Rope.
/// Used for multi-line text areas, which can hold large pasted documents.
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a RopeBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer for RopeBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }
}

impl TextBufferMut for RopeBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let clamped = offset.min(self.len_chars());
        self.rope.insert(clamped, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }
}
