//! FlatSurface - a single editable field with its buffer, selection and focus.

use std::ops::Range;

use crate::convert::{convert_text, ConversionMode, IgnoreList};
use crate::surface::SurfaceEvent;

use super::buffer::{TextBuffer, TextBufferMut};
use super::field::FieldKind;
use super::selection::Selection;

/// A flat editable field.
///
/// Generic over the buffer type B (StringBuffer for inputs, RopeBuffer for
/// text areas).
#[derive(Debug, Clone)]
pub struct FlatSurface<B: TextBuffer> {
    /// The text buffer
    pub buffer: B,
    /// What kind of field this is
    pub kind: FieldKind,
    /// Current selection; None when the field exposes no selection API
    selection: Option<Selection>,
    focused: bool,
    events: Vec<SurfaceEvent>,
}

impl<B: TextBuffer> FlatSurface<B> {
    /// Create an unfocused field with the caret at the end of its text
    pub fn new(buffer: B, kind: FieldKind) -> Self {
        let end = buffer.len_chars();
        Self {
            buffer,
            kind,
            selection: Some(Selection::collapsed(end)),
            focused: false,
            events: Vec::new(),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Field whose host offers no selection offsets
    pub fn without_selection(mut self) -> Self {
        self.selection = None;
        self
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.events.push(SurfaceEvent::Focus);
    }

    pub fn text(&self) -> String {
        self.buffer.content()
    }

    /// Check if there is a non-empty selection
    pub fn has_selection(&self) -> bool {
        self.selection.is_some_and(|sel| !sel.is_empty())
    }

    /// The range a conversion would rewrite: the selection clamped to the
    /// buffer if it is non-empty, else the whole buffer. A selection lying
    /// wholly past the end clamps to the empty range at the end.
    pub fn target_range(&self) -> Range<usize> {
        let len = self.buffer.len_chars();
        match self.selection {
            Some(sel) if !sel.is_empty() => sel.clamped(len).range(),
            _ => 0..len,
        }
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<B: TextBufferMut> FlatSurface<B> {
    /// Convert the selected text, or the whole field when nothing is selected.
    ///
    /// Text outside the target range is untouched. Focus is restored, a range
    /// selection is re-applied over the replaced text (whose length may
    /// differ), and an `Input` event is emitted. Returns the new range.
    pub fn apply(&mut self, mode: ConversionMode, ignore: &IgnoreList) -> Range<usize> {
        let had_selection = self.has_selection();
        let range = self.target_range();

        let middle = self.buffer.slice(range.clone());
        let replaced = convert_text(&middle, mode, ignore);
        let replaced_len = replaced.chars().count();
        if replaced != middle {
            self.buffer.replace(range.clone(), &replaced);
        }

        self.focus();
        let new_range = range.start..range.start + replaced_len;
        if had_selection {
            self.selection = Some(Selection::new(new_range.start, new_range.end));
        }

        tracing::debug!(
            field = %self.kind,
            start = new_range.start,
            end = new_range.end,
            "Converted flat field to {}",
            mode
        );
        self.events.push(SurfaceEvent::Input);
        new_range
    }
}

#[cfg(test)]
mod tests {
    use super::super::buffer::{RopeBuffer, StringBuffer};
    use super::*;

    fn create_field(text: &str) -> FlatSurface<StringBuffer> {
        FlatSurface::new(StringBuffer::from_text(text), FieldKind::Text)
    }

    #[test]
    fn test_whole_field_without_selection() {
        let mut field = create_field("hello world");
        let range = field.apply(ConversionMode::Upper, &IgnoreList::empty());
        assert_eq!(field.text(), "HELLO WORLD");
        assert_eq!(range, 0..11);
        // Caret selection is left alone
        assert_eq!(field.selection(), Some(Selection::collapsed(11)));
    }

    #[test]
    fn test_partial_selection() {
        let mut field = create_field("hello world").with_selection(Selection::new(6, 11));
        field.apply(ConversionMode::Upper, &IgnoreList::empty());
        assert_eq!(field.text(), "hello WORLD");
        assert_eq!(field.selection(), Some(Selection::new(6, 11)));
    }

    #[test]
    fn test_reversed_selection_is_normalized() {
        let mut field = create_field("hello world").with_selection(Selection::new(5, 0));
        field.apply(ConversionMode::Upper, &IgnoreList::empty());
        assert_eq!(field.text(), "HELLO world");
        assert_eq!(field.selection(), Some(Selection::new(0, 5)));
    }

    #[test]
    fn test_selection_tracks_replaced_length() {
        let mut field = create_field("a straße b").with_selection(Selection::new(2, 8));
        field.apply(ConversionMode::Upper, &IgnoreList::empty());
        assert_eq!(field.text(), "a STRASSE b");
        assert_eq!(field.selection(), Some(Selection::new(2, 9)));
    }

    #[test]
    fn test_selection_past_end_is_clamped() {
        let mut field = create_field("abc def").with_selection(Selection::new(4, 50));
        field.apply(ConversionMode::Upper, &IgnoreList::empty());
        assert_eq!(field.text(), "abc DEF");
    }

    #[test]
    fn test_selection_wholly_past_end_converts_nothing() {
        let mut field = create_field("abc def").with_selection(Selection::new(50, 60));
        let range = field.apply(ConversionMode::Upper, &IgnoreList::empty());
        assert_eq!(field.text(), "abc def");
        assert_eq!(range, 7..7);
        assert_eq!(field.selection(), Some(Selection::new(7, 7)));
    }

    #[test]
    fn test_missing_selection_api_converts_everything() {
        let mut field = create_field("Mixed Case").without_selection();
        field.apply(ConversionMode::Lower, &IgnoreList::empty());
        assert_eq!(field.text(), "mixed case");
        assert_eq!(field.selection(), None);
    }

    #[test]
    fn test_apply_focuses_and_notifies() {
        let mut field = create_field("text");
        assert!(!field.is_focused());
        field.apply(ConversionMode::Title, &IgnoreList::empty());
        assert!(field.is_focused());
        assert_eq!(
            field.take_events(),
            vec![SurfaceEvent::Focus, SurfaceEvent::Input]
        );
        assert!(field.take_events().is_empty());
    }

    #[test]
    fn test_text_area_multiline() {
        let mut area = FlatSurface::new(
            RopeBuffer::from_text("first line\nsecond line"),
            FieldKind::TextArea,
        )
        .with_selection(Selection::new(11, 17));
        area.apply(ConversionMode::Title, &IgnoreList::empty());
        assert_eq!(area.text(), "first line\nSecond line");
    }
}
