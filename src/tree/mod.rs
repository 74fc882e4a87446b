//! Rich editable regions: a node tree with range selections.
//!
//! - [`Document`]: arena of element and text nodes
//! - [`TreeSelection`] / [`TextRange`]: host selection and its validated, ordered form
//! - [`TreeSurface`]: the editable root plus selection, and the conversion strategies

mod document;
mod selection;
mod surface;

pub use document::{Document, Node, NodeId, NodeKind};
pub use selection::{Point, TextRange, TextSpan, TreeSelection};
pub use surface::{TreeStrategy, TreeSurface};
