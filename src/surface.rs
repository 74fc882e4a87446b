//! Editable surfaces
//!
//! A surface is either a flat field (string buffer with offset selection) or
//! a rich editable subtree (text nodes with range selection). The converter
//! only ever talks to surfaces through [`Surface::apply`].

use std::fmt;

use crate::convert::{ConversionMode, IgnoreList};
use crate::editable::{FieldKind, FlatSurface, RopeBuffer, StringBuffer};
use crate::tree::{NodeId, TreeStrategy, TreeSurface};

/// Identifies a surface in the [`crate::converter::SurfaceRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Notifications a surface emits towards its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface took focus
    Focus,
    /// Content changed (the host's "input" notification)
    Input,
}

/// Failures at the boundary between the converter and a host surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The host selection API failed or reported an inconsistent state
    SelectionUnavailable(String),
    /// A node id does not belong to the document
    UnknownNode(NodeId),
    /// The host does not offer in-place text insertion
    InsertUnsupported,
    /// The host refused in-place text insertion
    InsertFailed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionUnavailable(msg) => write!(f, "selection unavailable: {}", msg),
            Self::UnknownNode(id) => write!(f, "unknown node {}", id),
            Self::InsertUnsupported => write!(f, "text insertion not supported"),
            Self::InsertFailed(msg) => write!(f, "text insertion failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// What a conversion did to a surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A flat field had `[start, end)` replaced
    Flat { start: usize, end: usize },
    /// A rich subtree was converted with the given strategy
    Tree(TreeStrategy),
}

/// An editable surface of either kind
#[derive(Debug, Clone)]
pub enum Surface {
    /// Single-line input field
    Input(FlatSurface<StringBuffer>),
    /// Multi-line text area
    TextArea(FlatSurface<RopeBuffer>),
    /// Rich editable subtree
    Rich(TreeSurface),
}

impl Surface {
    /// Single-line input of the given `type` attribute
    pub fn input(input_type: Option<&str>, text: &str) -> Self {
        Surface::Input(FlatSurface::new(
            StringBuffer::from_text(text),
            FieldKind::from_input_type(input_type),
        ))
    }

    pub fn text_area(text: &str) -> Self {
        Surface::TextArea(FlatSurface::new(
            RopeBuffer::from_text(text),
            FieldKind::TextArea,
        ))
    }

    /// Flat text-like field or a rich subtree whose root is content-editable
    pub fn is_eligible(&self) -> bool {
        match self {
            Surface::Input(field) => field.kind.is_text_like(),
            Surface::TextArea(field) => field.kind.is_text_like(),
            Surface::Rich(tree) => tree.is_editable(),
        }
    }

    pub fn kind_name(&self) -> String {
        match self {
            Surface::Input(field) => format!("input[{}]", field.kind),
            Surface::TextArea(_) => "textarea".to_string(),
            Surface::Rich(_) => "rich".to_string(),
        }
    }

    /// Convert the surface in place
    pub fn apply(&mut self, mode: ConversionMode, ignore: &IgnoreList) -> Applied {
        match self {
            Surface::Input(field) => {
                let range = field.apply(mode, ignore);
                Applied::Flat {
                    start: range.start,
                    end: range.end,
                }
            }
            Surface::TextArea(field) => {
                let range = field.apply(mode, ignore);
                Applied::Flat {
                    start: range.start,
                    end: range.end,
                }
            }
            Surface::Rich(tree) => Applied::Tree(tree.apply(mode, ignore)),
        }
    }

    /// Current text content (rich surfaces: concatenated text of the subtree)
    pub fn text(&self) -> String {
        match self {
            Surface::Input(field) => field.text(),
            Surface::TextArea(field) => field.text(),
            Surface::Rich(tree) => tree.text(),
        }
    }

    /// Drain the notifications emitted since the last call
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        match self {
            Surface::Input(field) => field.take_events(),
            Surface::TextArea(field) => field.take_events(),
            Surface::Rich(tree) => tree.take_events(),
        }
    }
}
