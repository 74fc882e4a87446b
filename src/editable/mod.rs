//! Flat editable fields for the case converter.
//!
//! This module covers every editable surface backed by a plain string:
//! - Single-line inputs (text, search, url, tel, password, email)
//! - Multi-line text areas
//!
//! # Architecture
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: Traits abstracting over buffer implementations
//! - [`StringBuffer`]: Buffer for single-line inputs (backed by `String`)
//! - [`RopeBuffer`]: Buffer for text areas (backed by `ropey::Rope`)
//! - [`FlatSurface`]: A field with its buffer, selection, focus and notifications
//! - [`FieldKind`]: Which kind of field, and whether it may be converted
//!
//! # Example
//!
//! ```ignore
//! use recase::convert::{ConversionMode, IgnoreList};
//! use recase::editable::{FieldKind, FlatSurface, Selection, StringBuffer};
//!
//! let mut field = FlatSurface::new(StringBuffer::from_text("hello world"), FieldKind::Text)
//!     .with_selection(Selection::new(6, 11));
//! field.apply(ConversionMode::Upper, &IgnoreList::empty());
//!
//! assert_eq!(field.text(), "hello WORLD");
//! ```

mod buffer;
mod field;
mod selection;
mod state;

pub use buffer::{RopeBuffer, StringBuffer, TextBuffer, TextBufferMut};
pub use field::FieldKind;
pub use selection::Selection;
pub use state::FlatSurface;
