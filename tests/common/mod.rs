//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use recase::settings::StaticSettings;
use recase::tree::{Document, NodeId, TreeSurface};
use recase::{Converter, Surface, SurfaceId};

/// Converter over a fixed ignore list, already loaded
pub fn test_converter(ignore_list: &str) -> Converter {
    let mut converter = Converter::new(Arc::new(StaticSettings::new(ignore_list)));
    converter.load_settings_now();
    converter
}

/// Register `surface`, focus it, and return its id
pub fn add_focused(converter: &mut Converter, surface: Surface) -> SurfaceId {
    let id = converter.registry_mut().add(surface);
    converter.registry_mut().focus(id);
    id
}

/// Current text of a registered surface
pub fn text_of(converter: &Converter, id: SurfaceId) -> String {
    converter
        .registry()
        .get(id)
        .map(Surface::text)
        .unwrap_or_default()
}

/// Borrow the tree surface registered under `id`
pub fn tree_of(converter: &Converter, id: SurfaceId) -> &TreeSurface {
    match converter.registry().get(id) {
        Some(Surface::Rich(tree)) => tree,
        other => panic!("expected rich surface, got {:?}", other),
    }
}

/// `<body><div contenteditable>` with one text node per entry
pub fn editable_div(texts: &[&str]) -> (Document, NodeId, Vec<NodeId>) {
    let mut doc = Document::new();
    let div = doc.append_element(doc.root(), "div");
    doc.set_content_editable(div, true);
    let nodes = texts.iter().map(|t| doc.append_text(div, t)).collect();
    (doc, div, nodes)
}
