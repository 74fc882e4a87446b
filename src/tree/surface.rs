//! TreeSurface - a rich editable subtree with its host selection.

use crate::convert::{convert_text, ConversionMode, IgnoreList};
use crate::surface::{SurfaceError, SurfaceEvent};

use super::document::{Document, NodeId};
use super::selection::{slice_chars, Point, TextRange, TextSpan, TreeSelection};

/// How a conversion was carried out on a tree surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeStrategy {
    /// Every non-blank text node of the subtree was converted
    WholeSubtree { nodes: usize },
    /// The host replaced the selection in place
    InsertText,
    /// The selected part of each intersecting text node was converted
    NodeWalk { spans: usize },
}

/// A rich editable region: a document, the editable root inside it, and the
/// host's current selection.
#[derive(Debug, Clone)]
pub struct TreeSurface {
    doc: Document,
    root: NodeId,
    selection: TreeSelection,
    /// Set when the host selection API is failing
    selection_failure: Option<String>,
    /// Host offers in-place text insertion at the selection
    insert_text: bool,
    events: Vec<SurfaceEvent>,
}

impl TreeSurface {
    pub fn new(doc: Document, root: NodeId) -> Self {
        Self {
            doc,
            root,
            selection: TreeSelection::None,
            selection_failure: None,
            insert_text: false,
            events: Vec::new(),
        }
    }

    pub fn with_selection(mut self, selection: TreeSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Enable the host's in-place insertion primitive
    pub fn with_insert_text(mut self, supported: bool) -> Self {
        self.insert_text = supported;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn set_selection(&mut self, selection: TreeSelection) {
        self.selection = selection;
        self.selection_failure = None;
    }

    /// Make every subsequent selection read fail
    pub fn fail_selection(&mut self, reason: &str) {
        self.selection_failure = Some(reason.to_string());
    }

    /// Raw selection state as last set by the host
    pub fn selection(&self) -> TreeSelection {
        self.selection
    }

    /// Read the host selection, rejecting failures and dangling points
    pub fn read_selection(&self) -> Result<TreeSelection, SurfaceError> {
        if let Some(reason) = &self.selection_failure {
            return Err(SurfaceError::SelectionUnavailable(reason.clone()));
        }
        match self.selection.normalized() {
            TreeSelection::None => Ok(TreeSelection::None),
            TreeSelection::Collapsed(point) => {
                self.doc.validate_point(point)?;
                Ok(TreeSelection::Collapsed(point))
            }
            TreeSelection::Range { anchor, focus } => {
                self.doc.validate_point(anchor)?;
                self.doc.validate_point(focus)?;
                Ok(TreeSelection::Range { anchor, focus })
            }
        }
    }

    /// Check if the root is flagged as a rich editable region
    pub fn is_editable(&self) -> bool {
        self.doc.is_content_editable(self.root)
    }

    pub fn text(&self) -> String {
        self.doc.text_content(self.root)
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Convert the selection, or the whole subtree when there is no usable
    /// selection (none, collapsed, failing, or reaching outside the root).
    pub fn apply(&mut self, mode: ConversionMode, ignore: &IgnoreList) -> TreeStrategy {
        let range = match self.read_selection() {
            Ok(TreeSelection::Range { anchor, focus }) => {
                TextRange::new(&self.doc, anchor, focus).ok()
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Selection unavailable, converting whole field: {}", e);
                None
            }
        };

        let strategy = match range {
            Some(range) if !range.is_collapsed() && range.is_within(&self.doc, self.root) => {
                self.convert_range(range, mode, ignore)
            }
            Some(_) => {
                tracing::debug!("Selection outside editable root, converting whole field");
                self.convert_whole_subtree(mode, ignore)
            }
            None => self.convert_whole_subtree(mode, ignore),
        };

        tracing::debug!(root = self.root, ?strategy, "Converted rich field to {}", mode);
        self.events.push(SurfaceEvent::Input);
        strategy
    }

    fn convert_range(
        &mut self,
        range: TextRange,
        mode: ConversionMode,
        ignore: &IgnoreList,
    ) -> TreeStrategy {
        if self.insert_text {
            match self.insert_converted(range, mode, ignore) {
                Ok(()) => return TreeStrategy::InsertText,
                Err(e) => tracing::debug!("Insert text failed, walking nodes: {}", e),
            }
        }
        self.convert_spans(range, mode, ignore)
    }

    /// Whole-subtree fallback: every text node with non-blank content
    fn convert_whole_subtree(&mut self, mode: ConversionMode, ignore: &IgnoreList) -> TreeStrategy {
        let mut nodes = 0;
        for node in self.doc.text_nodes(self.root) {
            let Some(text) = self.doc.text(node) else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            let converted = convert_text(text, mode, ignore);
            if self.doc.set_text(node, converted).is_ok() {
                nodes += 1;
            }
        }
        self.clamp_selection();
        TreeStrategy::WholeSubtree { nodes }
    }

    /// Node walk: replace `node[start..end)` of every intersecting text node
    fn convert_spans(
        &mut self,
        range: TextRange,
        mode: ConversionMode,
        ignore: &IgnoreList,
    ) -> TreeStrategy {
        let spans = range.spans(&self.doc, self.root);
        let mut new_end = range.end;

        for span in &spans {
            let Some(text) = self.doc.text(span.node) else {
                continue;
            };
            let middle = slice_chars(text, span.start, span.end);
            let converted = convert_text(&middle, mode, ignore);
            let converted_len = converted.chars().count();
            let updated = splice(text, *span, &converted);
            if self.doc.set_text(span.node, updated).is_err() {
                continue;
            }
            if span.node == range.end.node && span.end == range.end.offset {
                new_end = Point::new(span.node, span.start + converted_len);
            }
        }

        self.selection = match self.selection {
            TreeSelection::Range { anchor, focus } if anchor == range.end => {
                TreeSelection::Range {
                    anchor: new_end,
                    focus,
                }
            }
            TreeSelection::Range { anchor, .. } => TreeSelection::Range {
                anchor,
                focus: new_end,
            },
            other => other,
        };

        TreeStrategy::NodeWalk { spans: spans.len() }
    }

    /// Host insertion of the converted selection text. The caret lands after
    /// the inserted text.
    ///
    /// When conversion keeps the character count, each selected text node
    /// gets back its own share of the converted text, so characters stay in
    /// their elements. Otherwise the whole converted text goes into the first
    /// selected node and the other nodes lose their selected characters
    /// while staying in the tree.
    fn insert_converted(
        &mut self,
        range: TextRange,
        mode: ConversionMode,
        ignore: &IgnoreList,
    ) -> Result<(), SurfaceError> {
        let spans = range.spans(&self.doc, self.root);
        let (Some(first), Some(last)) = (spans.first().copied(), spans.last().copied()) else {
            return Err(SurfaceError::InsertFailed("selection holds no text".to_string()));
        };

        let selected = range.text(&self.doc, self.root);
        let converted = convert_text(&selected, mode, ignore);
        let converted_len = converted.chars().count();
        let same_length = converted_len == selected.chars().count();

        let mut updates = Vec::with_capacity(spans.len());
        let mut consumed = 0;
        for (i, span) in spans.iter().enumerate() {
            let text = self
                .doc
                .text(span.node)
                .ok_or(SurfaceError::UnknownNode(span.node))?;
            let insert = if same_length {
                slice_chars(&converted, consumed, consumed + span.len())
            } else if i == 0 {
                converted.clone()
            } else {
                String::new()
            };
            consumed += span.len();
            updates.push((span.node, splice(text, *span, &insert)));
        }
        for (node, text) in updates {
            self.doc.set_text(node, text)?;
        }

        let caret = if same_length {
            Point::new(last.node, last.end)
        } else {
            Point::new(first.node, first.start + converted_len)
        };
        self.selection = TreeSelection::Collapsed(caret);
        Ok(())
    }

    /// Pull selection offsets back inside nodes whose text got shorter
    fn clamp_selection(&mut self) {
        let clamp = |doc: &Document, p: Point| Point::new(p.node, p.offset.min(doc.node_len(p.node)));
        self.selection = match self.selection {
            TreeSelection::None => TreeSelection::None,
            TreeSelection::Collapsed(p) => TreeSelection::Collapsed(clamp(&self.doc, p)),
            TreeSelection::Range { anchor, focus } => TreeSelection::Range {
                anchor: clamp(&self.doc, anchor),
                focus: clamp(&self.doc, focus),
            },
        };
    }
}

/// `text` with characters `[span.start, span.end)` replaced by `insert`
fn splice(text: &str, span: TextSpan, insert: &str) -> String {
    let mut out: String = text.chars().take(span.start).collect();
    out.push_str(insert);
    out.extend(text.chars().skip(span.end));
    out
}
