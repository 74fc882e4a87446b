//! Rich editable regions: selections across nodes, outside the root, and fallbacks

mod common;

use common::{add_focused, editable_div, test_converter, tree_of};
use recase::converter::IgnoreReason;
use recase::surface::Applied;
use recase::tree::{Document, NodeId, Point, TreeSelection, TreeStrategy, TreeSurface};
use recase::{ConversionMode, ConvertCommand, ConvertOutcome, Surface};

/// `<div contenteditable>Hello <b>big</b> world</div>` and its three text nodes
fn hello_big_world() -> (Document, NodeId, [NodeId; 3]) {
    let (mut doc, div, nodes) = editable_div(&["Hello "]);
    let b = doc.append_element(div, "b");
    let big = doc.append_text(b, "big");
    let world = doc.append_text(div, " world");
    (doc, div, [nodes[0], big, world])
}

fn convert(surface: TreeSurface, mode: ConversionMode) -> (TreeSurface, ConvertOutcome) {
    let mut conv = test_converter("");
    let id = add_focused(&mut conv, Surface::Rich(surface));
    let outcome = conv.handle(ConvertCommand::new(mode));
    (tree_of(&conv, id).clone(), outcome)
}

fn strategy(outcome: &ConvertOutcome) -> Option<TreeStrategy> {
    match outcome {
        ConvertOutcome::Converted {
            applied: Applied::Tree(strategy),
            ..
        } => Some(*strategy),
        _ => None,
    }
}

// ========================================================================
// Node walk
// ========================================================================

#[test]
fn test_cross_node_selection_converts_only_selected_chars() {
    let (doc, div, [hello, big, world]) = hello_big_world();
    let surface = TreeSurface::new(doc, div)
        .with_selection(TreeSelection::range(Point::new(hello, 3), Point::new(world, 3)));

    let (tree, outcome) = convert(surface, ConversionMode::Upper);

    assert_eq!(strategy(&outcome), Some(TreeStrategy::NodeWalk { spans: 3 }));
    assert_eq!(tree.document().text(hello), Some("HelLO "));
    assert_eq!(tree.document().text(big), Some("BIG"));
    assert_eq!(tree.document().text(world), Some(" WOrld"));
    assert_eq!(
        tree.document().markup(div),
        "<div contenteditable=\"true\">HelLO <b>BIG</b> WOrld</div>"
    );
    assert_eq!(
        tree.selection(),
        TreeSelection::range(Point::new(hello, 3), Point::new(world, 3))
    );
}

#[test]
fn test_backwards_selection_converts_same_chars() {
    let (doc, div, [hello, _, world]) = hello_big_world();
    let surface = TreeSurface::new(doc, div)
        .with_selection(TreeSelection::range(Point::new(world, 3), Point::new(hello, 3)));

    let (tree, _) = convert(surface, ConversionMode::Upper);

    assert_eq!(tree.text(), "HelLO BIG WOrld");
    assert_eq!(
        tree.selection(),
        TreeSelection::range(Point::new(world, 3), Point::new(hello, 3))
    );
}

#[test]
fn test_element_boundary_points() {
    let (doc, div, nodes) = editable_div(&["one ", "two ", "three"]);
    let surface = TreeSurface::new(doc, div)
        .with_selection(TreeSelection::range(Point::new(div, 0), Point::new(div, 2)));

    let (tree, outcome) = convert(surface, ConversionMode::Upper);

    assert_eq!(strategy(&outcome), Some(TreeStrategy::NodeWalk { spans: 2 }));
    assert_eq!(tree.document().text(nodes[0]), Some("ONE "));
    assert_eq!(tree.document().text(nodes[1]), Some("TWO "));
    assert_eq!(tree.document().text(nodes[2]), Some("three"));
}

#[test]
fn test_selection_boundary_inside_word() {
    let (doc, div, nodes) = editable_div(&["acme llc"]);
    let surface = TreeSurface::new(doc, div)
        .with_selection(TreeSelection::range(Point::new(nodes[0], 0), Point::new(nodes[0], 6)));

    let (tree, _) = convert(surface, ConversionMode::Upper);

    assert_eq!(tree.text(), "ACME Llc");
}

// ========================================================================
// Host insertion
// ========================================================================

#[test]
fn test_insert_text_replaces_selection_in_place() {
    let (doc, div, [hello, big, world]) = hello_big_world();
    let surface = TreeSurface::new(doc, div)
        .with_insert_text(true)
        .with_selection(TreeSelection::range(Point::new(hello, 0), Point::new(world, 6)));

    let (tree, outcome) = convert(surface, ConversionMode::Upper);

    assert_eq!(strategy(&outcome), Some(TreeStrategy::InsertText));
    assert_eq!(tree.document().text(hello), Some("HELLO "));
    assert_eq!(tree.document().text(big), Some("BIG"));
    assert_eq!(tree.document().text(world), Some(" WORLD"));
    assert_eq!(
        tree.document().markup(div),
        "<div contenteditable=\"true\">HELLO <b>BIG</b> WORLD</div>"
    );
    assert_eq!(tree.selection(), TreeSelection::Collapsed(Point::new(world, 6)));
}

#[test]
fn test_insert_text_partial_selection_stays_inside_bold() {
    let (doc, div, [hello, big, world]) = hello_big_world();
    let surface = TreeSurface::new(doc, div)
        .with_insert_text(true)
        .with_selection(TreeSelection::range(Point::new(hello, 3), Point::new(big, 2)));

    let (tree, _) = convert(surface, ConversionMode::Upper);

    assert_eq!(tree.document().text(hello), Some("HelLO "));
    assert_eq!(tree.document().text(big), Some("BIg"));
    assert_eq!(tree.document().text(world), Some(" world"));
    assert_eq!(tree.selection(), TreeSelection::Collapsed(Point::new(big, 2)));
}

// ========================================================================
// Fallback to whole subtree
// ========================================================================

#[test]
fn test_selection_reaching_outside_root_converts_whole_root() {
    let mut doc = Document::new();
    let p = doc.append_element(doc.root(), "p");
    let outside = doc.append_text(p, "outside");
    let div = doc.append_element(doc.root(), "div");
    doc.set_content_editable(div, true);
    let inside = doc.append_text(div, "inside text");

    let surface = TreeSurface::new(doc, div)
        .with_selection(TreeSelection::range(Point::new(outside, 0), Point::new(inside, 6)));
    let (tree, outcome) = convert(surface, ConversionMode::Upper);

    assert_eq!(
        strategy(&outcome),
        Some(TreeStrategy::WholeSubtree { nodes: 1 })
    );
    assert_eq!(tree.document().text(outside), Some("outside"));
    assert_eq!(tree.document().text(inside), Some("INSIDE TEXT"));
}

#[test]
fn test_failing_selection_api_converts_whole_root() {
    let (doc, div, [hello, _, _]) = hello_big_world();
    let mut surface = TreeSurface::new(doc, div)
        .with_selection(TreeSelection::range(Point::new(hello, 0), Point::new(hello, 2)));
    surface.fail_selection("selection API threw");

    let (tree, outcome) = convert(surface, ConversionMode::Title);

    assert_eq!(
        strategy(&outcome),
        Some(TreeStrategy::WholeSubtree { nodes: 3 })
    );
    assert_eq!(tree.text(), "Hello Big World");
}

#[test]
fn test_non_editable_region_is_left_alone() {
    let mut doc = Document::new();
    let div = doc.append_element(doc.root(), "div");
    doc.append_text(div, "static text");

    let mut conv = test_converter("");
    let id = add_focused(&mut conv, Surface::Rich(TreeSurface::new(doc, div)));
    let outcome = conv.handle(ConvertCommand::new(ConversionMode::Upper));

    assert_eq!(outcome, ConvertOutcome::Ignored(IgnoreReason::Ineligible(id)));
    assert_eq!(tree_of(&conv, id).text(), "static text");
}

#[test]
fn test_editable_flag_is_inherited() {
    let mut doc = Document::new();
    let outer = doc.append_element(doc.root(), "div");
    doc.set_content_editable(outer, true);
    let inner = doc.append_element(outer, "p");
    doc.append_text(inner, "nested");

    let mut conv = test_converter("");
    let id = add_focused(&mut conv, Surface::Rich(TreeSurface::new(doc, inner)));
    conv.handle(ConvertCommand::new(ConversionMode::Upper));

    assert_eq!(tree_of(&conv, id).text(), "NESTED");
}
