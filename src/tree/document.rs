//! Tree document model for rich editable regions.
//!
//! An arena of element and text nodes. Only text nodes carry characters;
//! elements carry structure and attributes.

use std::fmt::Write as _;

use crate::surface::SurfaceError;

/// Unique identifier for document nodes
pub type NodeId = usize;

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        /// `Some(true)` / `Some(false)` set the flag, `None` inherits it from the parent
        content_editable: Option<bool>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }
}

/// A tree of nodes rooted at a `body` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document {
            nodes: vec![Node {
                kind: NodeKind::Element {
                    tag: "body".to_string(),
                    attributes: Vec::new(),
                    content_editable: None,
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Append an element under `parent`
    ///
    /// Panics if `parent` is not an element of this document.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        assert!(
            self.get(parent).is_some_and(|n| !n.is_text()),
            "parent must be an element"
        );
        self.push(
            parent,
            NodeKind::Element {
                tag: tag.to_string(),
                attributes: Vec::new(),
                content_editable: None,
            },
        )
    }

    /// Append a text node under `parent`
    ///
    /// Panics if `parent` is not an element of this document.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        assert!(
            self.get(parent).is_some_and(|n| !n.is_text()),
            "parent must be an element"
        );
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(Node {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.nodes.get_mut(id)
        {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some(attr) => attr.1 = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn set_content_editable(&mut self, id: NodeId, editable: bool) {
        if let Some(Node {
            kind: NodeKind::Element {
                content_editable, ..
            },
            ..
        }) = self.nodes.get_mut(id)
        {
            *content_editable = Some(editable);
        }
    }

    /// Effective editability: the nearest explicit flag on the node or its ancestors
    pub fn is_content_editable(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.get(node_id) else {
                return false;
            };
            if let NodeKind::Element {
                content_editable: Some(flag),
                ..
            } = node.kind
            {
                return flag;
            }
            current = node.parent;
        }
        false
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::text)
    }

    /// Replace the characters of a text node
    pub fn set_text(&mut self, id: NodeId, text: String) -> Result<(), SurfaceError> {
        match self.nodes.get_mut(id) {
            Some(Node {
                kind: NodeKind::Text(current),
                ..
            }) => {
                *current = text;
                Ok(())
            }
            _ => Err(SurfaceError::UnknownNode(id)),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Boundary-point length: characters for text nodes, children for elements
    pub fn node_len(&self, id: NodeId) -> usize {
        match self.get(id) {
            Some(Node {
                kind: NodeKind::Text(text),
                ..
            }) => text.chars().count(),
            Some(node) => node.children.len(),
            None => 0,
        }
    }

    /// Position of `id` among its parent's children
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Child indices from the root down to `id`
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(index) = self.index_in_parent(current) {
            path.push(index);
            current = self.nodes[current].parent.unwrap_or(current);
        }
        path.reverse();
        path
    }

    /// Ancestors of `id`, starting with `id` itself
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).map(|_| id);
        while let Some(node_id) = current {
            chain.push(node_id);
            current = self.parent(node_id);
        }
        chain
    }

    /// Inclusive descendant test
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    /// Deepest node containing both `a` and `b`
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let chain_b = self.ancestors(b);
        self.ancestors(a).into_iter().find(|id| chain_b.contains(id))
    }

    /// Text nodes below `root` (inclusive) in document order
    pub fn text_nodes(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if node.is_text() {
                out.push(id);
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Concatenated text of every text node below `root`
    pub fn text_content(&self, root: NodeId) -> String {
        self.text_nodes(root)
            .into_iter()
            .filter_map(|id| self.text(id))
            .collect()
    }

    /// Serialize the subtree as HTML-like markup
    pub fn markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape(text)),
            NodeKind::Element {
                tag,
                attributes,
                content_editable,
            } => {
                let _ = write!(out, "<{}", tag);
                if let Some(flag) = content_editable {
                    let _ = write!(out, " contenteditable=\"{}\"", flag);
                }
                for (name, value) in attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                out.push('>');
                for &child in &node.children {
                    self.write_markup(child, out);
                }
                let _ = write!(out, "</{}>", tag);
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
