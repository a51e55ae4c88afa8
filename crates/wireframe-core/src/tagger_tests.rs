use super::*;
use crate::paint_index::PaintOrderIndex;
use crate::snapshot::{Rect, Role, Snapshot, Style, Viewport};

fn viewport() -> Viewport {
    Viewport::new(1000.0, 800.0)
}

fn pointer() -> Style {
    Style {
        cursor: "pointer".to_string(),
        ..Default::default()
    }
}

fn body(children: Vec<Node>) -> Node {
    children.into_iter().fold(
        Node::new("body", Role::Container, Rect::new(0.0, 0.0, 1000.0, 800.0)),
        Node::with_child,
    )
}

fn tag(root: &mut Node) -> usize {
    let query = PaintOrderIndex::from_snapshot(&Snapshot::new(root.clone()));
    let resolver = VisibilityResolver::new(viewport(), &query);
    ReferenceTagger::new(&resolver).tag(root).unwrap()
}

fn refs(root: &Node) -> Vec<(String, u32)> {
    let mut out = Vec::new();
    root.walk(&mut |node| {
        if let Some(r) = node.ref_id {
            out.push((node.id.to_string(), r.0));
        }
    });
    out
}

fn sample_page() -> Node {
    body(vec![
        Node::new("home", Role::Anchor, Rect::new(10.0, 10.0, 60.0, 18.0))
            .with_text("Home", Rect::new(10.0, 10.0, 30.0, 18.0)),
        Node::new("search", Role::Input, Rect::new(100.0, 10.0, 200.0, 30.0)),
        Node::new("card", Role::Container, Rect::new(10.0, 60.0, 300.0, 40.0))
            .with_style(pointer())
            .with_text("Open card", Rect::new(10.0, 60.0, 70.0, 18.0)),
        Node::new("go", Role::Button, Rect::new(400.0, 10.0, 80.0, 30.0))
            .with_text("Go", Rect::new(420.0, 16.0, 20.0, 18.0)),
    ])
}

#[test]
fn test_semantic_then_heuristic_numbered_in_document_order() {
    let mut root = sample_page();
    let count = tag(&mut root);
    assert_eq!(count, 4);
    assert_eq!(
        refs(&root),
        vec![
            ("home".to_string(), 1),
            ("search".to_string(), 2),
            ("card".to_string(), 3),
            ("go".to_string(), 4),
        ]
    );
}

#[test]
fn test_tagging_is_idempotent() {
    let mut root = sample_page();
    tag(&mut root);
    let first = refs(&root);
    tag(&mut root);
    assert_eq!(refs(&root), first);
}

#[test]
fn test_stale_ids_are_cleared() {
    let mut root = sample_page();
    root.children[0].ref_id = Some(RefId(99));
    // a node that is no longer interactive must lose its stale id
    root.children.push(
        Node::new("gone", Role::Other, Rect::new(0.0, 0.0, 10.0, 10.0)),
    );
    root.children[4].ref_id = Some(RefId(7));
    tag(&mut root);
    let ids: Vec<u32> = refs(&root).into_iter().map(|(_, r)| r).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_ids_are_unique_and_gapless() {
    let mut root = sample_page();
    tag(&mut root);
    let mut ids: Vec<u32> = refs(&root).into_iter().map(|(_, r)| r).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=ids.len() as u32).collect::<Vec<_>>());
}

#[test]
fn test_heuristic_pass_never_nests() {
    let mut root = body(vec![
        Node::new("outer", Role::Container, Rect::new(10.0, 10.0, 300.0, 100.0))
            .with_style(pointer())
            .with_text("Outer", Rect::new(10.0, 10.0, 40.0, 18.0))
            .with_child(
                Node::new("inner", Role::Container, Rect::new(10.0, 40.0, 100.0, 30.0))
                    .with_style(pointer())
                    .with_text("Inner", Rect::new(10.0, 40.0, 40.0, 18.0)),
            ),
        Node::new("link", Role::Anchor, Rect::new(10.0, 200.0, 100.0, 30.0)).with_child(
            Node::new("span", Role::Container, Rect::new(10.0, 200.0, 100.0, 30.0))
                .with_style(pointer())
                .with_text("Read more", Rect::new(10.0, 200.0, 70.0, 18.0)),
        ),
    ]);
    tag(&mut root);
    assert_eq!(
        refs(&root),
        vec![("outer".to_string(), 1), ("link".to_string(), 2)]
    );
}

#[test]
fn test_heuristic_pass_skips_wrapper_of_semantic_node() {
    let mut root = body(vec![
        Node::new("card", Role::Container, Rect::new(10.0, 10.0, 400.0, 120.0))
            .with_style(pointer())
            .with_text("Pro plan", Rect::new(10.0, 10.0, 60.0, 18.0))
            .with_child(
                Node::new("buy", Role::Button, Rect::new(20.0, 60.0, 80.0, 30.0))
                    .with_text("Buy", Rect::new(30.0, 66.0, 24.0, 18.0)),
            ),
    ]);
    assert_eq!(tag(&mut root), 1);
    assert_eq!(refs(&root), vec![("buy".to_string(), 1)]);
}

#[test]
fn test_heuristic_requires_direct_text() {
    let mut root = body(vec![
        Node::new("wrapper", Role::Container, Rect::new(10.0, 10.0, 300.0, 100.0))
            .with_style(pointer())
            .with_child(
                Node::new("text", Role::Other, Rect::new(10.0, 10.0, 40.0, 18.0))
                    .with_text("Nested only", Rect::new(10.0, 10.0, 80.0, 18.0)),
            ),
        Node::new("blank", Role::Container, Rect::new(10.0, 200.0, 300.0, 30.0))
            .with_style(pointer())
            .with_text("   ", Rect::new(10.0, 200.0, 20.0, 18.0)),
    ]);
    assert_eq!(tag(&mut root), 0);
}

#[test]
fn test_click_handler_and_tabindex_are_semantic() {
    let mut root = body(vec![
        Node::new("div", Role::Container, Rect::new(10.0, 10.0, 100.0, 30.0))
            .with_attr("onclick", "open()"),
        Node::new("tab", Role::Other, Rect::new(10.0, 50.0, 100.0, 30.0))
            .with_attr("tabindex", "0"),
        Node::new("skip", Role::Other, Rect::new(10.0, 90.0, 100.0, 30.0))
            .with_attr("tabindex", "-1"),
    ]);
    tag(&mut root);
    assert_eq!(
        refs(&root),
        vec![("div".to_string(), 1), ("tab".to_string(), 2)]
    );
}

#[test]
fn test_off_screen_node_gets_no_ref() {
    let mut root = body(vec![
        Node::new("off", Role::Button, Rect::new(-50.0, 0.0, 40.0, 20.0)),
        Node::new("on", Role::Button, Rect::new(10.0, 10.0, 40.0, 20.0)),
    ]);
    tag(&mut root);
    assert_eq!(refs(&root), vec![("on".to_string(), 1)]);
}

#[test]
fn test_occluded_node_gets_no_ref() {
    let mut root = body(vec![
        Node::new("under", Role::Button, Rect::new(10.0, 10.0, 80.0, 30.0)),
        Node::new("sticky", Role::Container, Rect::new(0.0, 0.0, 1000.0, 60.0)).with_style(
            Style {
                z_index: Some(10),
                ..Default::default()
            },
        ),
    ]);
    assert_eq!(tag(&mut root), 0);
}

#[test]
fn test_overflow_band_node_is_tagged() {
    let mut root = body(vec![
        Node::new("below", Role::Button, Rect::new(10.0, 820.0, 80.0, 30.0)),
        // Starts inside the band, center lies past the capture height.
        Node::new("tall", Role::Button, Rect::new(200.0, 950.0, 80.0, 300.0)),
    ]);
    tag(&mut root);
    assert_eq!(
        refs(&root),
        vec![("below".to_string(), 1), ("tall".to_string(), 2)]
    );
}
