//! Range selections over a [`Document`].
//!
//! A boundary point is `(node, offset)`: a character offset inside a text node,
//! or a child index inside an element.

use std::cmp::Ordering;

use super::document::{Document, NodeId};
use crate::surface::SurfaceError;

/// A boundary point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub node: NodeId,
    pub offset: usize,
}

impl Point {
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// The host's selection state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeSelection {
    /// No range at all
    #[default]
    None,
    /// A caret
    Collapsed(Point),
    /// Anchor and focus may come in either document order
    Range { anchor: Point, focus: Point },
}

impl TreeSelection {
    pub fn range(anchor: Point, focus: Point) -> Self {
        TreeSelection::Range { anchor, focus }
    }

    /// Collapse a range whose ends coincide
    pub fn normalized(self) -> Self {
        match self {
            TreeSelection::Range { anchor, focus } if anchor == focus => {
                TreeSelection::Collapsed(anchor)
            }
            other => other,
        }
    }
}

/// A half-open span of characters inside one text node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub node: NodeId,
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A validated range with `start` before or at `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: Point,
    pub end: Point,
}

impl Document {
    /// Check that a point names an existing node and an offset within it
    pub fn validate_point(&self, point: Point) -> Result<(), SurfaceError> {
        if self.get(point.node).is_none() {
            return Err(SurfaceError::UnknownNode(point.node));
        }
        let len = self.node_len(point.node);
        if point.offset > len {
            return Err(SurfaceError::SelectionUnavailable(format!(
                "offset {} past end of node {} (length {})",
                point.offset, point.node, len
            )));
        }
        Ok(())
    }

    /// Sort key of a boundary point. Paths compare lexicographically, with a
    /// prefix sorting first, which matches document order of boundary points.
    fn point_key(&self, point: Point) -> Vec<usize> {
        let mut key = self.path(point.node);
        key.push(point.offset);
        key
    }

    /// Document order of two boundary points
    pub fn compare_points(&self, a: Point, b: Point) -> Ordering {
        self.point_key(a).cmp(&self.point_key(b))
    }
}

impl TextRange {
    /// Build a range from two points in either order
    pub fn new(doc: &Document, anchor: Point, focus: Point) -> Result<Self, SurfaceError> {
        doc.validate_point(anchor)?;
        doc.validate_point(focus)?;
        let (start, end) = match doc.compare_points(anchor, focus) {
            Ordering::Greater => (focus, anchor),
            _ => (anchor, focus),
        };
        Ok(Self { start, end })
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Deepest node containing both ends
    pub fn common_ancestor(&self, doc: &Document) -> Option<NodeId> {
        doc.common_ancestor(self.start.node, self.end.node)
    }

    /// Check if the range lies inside `root`: its common ancestor, or that
    /// node's parent element when it is a text node, is `root` or below it.
    pub fn is_within(&self, doc: &Document, root: NodeId) -> bool {
        let Some(common) = self.common_ancestor(doc) else {
            return false;
        };
        let common_element = match doc.get(common) {
            Some(node) if node.is_text() => node.parent,
            Some(_) => Some(common),
            None => None,
        };
        common_element.is_some_and(|el| doc.contains(root, el))
    }

    /// Check if any part of `node` lies inside the range
    pub fn intersects(&self, doc: &Document, node: NodeId) -> bool {
        let Some(parent) = doc.parent(node) else {
            return doc.get(node).is_some();
        };
        let Some(index) = doc.index_in_parent(node) else {
            return false;
        };
        let before = doc.point_key(Point::new(parent, index));
        let after = doc.point_key(Point::new(parent, index + 1));
        before < doc.point_key(self.end) && after > doc.point_key(self.start)
    }

    /// Local spans of every non-empty piece of text under `root` that the
    /// range covers, in document order
    pub fn spans(&self, doc: &Document, root: NodeId) -> Vec<TextSpan> {
        doc.text_nodes(root)
            .into_iter()
            .filter(|&node| doc.node_len(node) > 0 && self.intersects(doc, node))
            .map(|node| {
                let len = doc.node_len(node);
                let start = if node == self.start.node {
                    self.start.offset
                } else {
                    0
                };
                let end = if node == self.end.node {
                    self.end.offset
                } else {
                    len
                };
                TextSpan {
                    node,
                    start: start.min(len),
                    end: end.min(len),
                }
            })
            .filter(|span| !span.is_empty())
            .collect()
    }

    /// The selected characters, concatenated across nodes
    pub fn text(&self, doc: &Document, root: NodeId) -> String {
        self.spans(doc, root)
            .iter()
            .filter_map(|span| {
                doc.text(span.node)
                    .map(|text| slice_chars(text, span.start, span.end))
            })
            .collect()
    }
}

/// Characters `[start, end)` of `text`
pub(crate) fn slice_chars(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}
