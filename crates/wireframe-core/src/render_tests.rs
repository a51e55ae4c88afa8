use std::collections::HashSet;

use super::*;
use crate::paint_index::PaintOrderIndex;
use crate::serialize::parse_ref_ids;
use crate::snapshot::{MediaKind, Node, NodeId, Rect, RefId, Role, Style};

struct Unreachable;

impl OcclusionQuery for Unreachable {
    fn topmost_at(&self, _x: f64, _y: f64) -> Result<Option<NodeId>, WireframeError> {
        Err(WireframeError::CollaboratorUnavailable("target closed".to_string()))
    }
}

fn page(viewport: Viewport, children: Vec<Node>) -> Snapshot {
    let body = children.into_iter().fold(
        Node::new(
            "body",
            Role::Container,
            Rect::new(0.0, 0.0, viewport.width, viewport.height),
        ),
        Node::with_child,
    );
    Snapshot::new(body).with_viewport(viewport)
}

fn render(snapshot: &mut Snapshot, viewport: Viewport) -> String {
    let mut query = PaintOrderIndex::from_snapshot(snapshot);
    render_wireframe(snapshot, viewport, CharMetrics::new(8.0, 18.0), &mut query).unwrap()
}

fn ref_of(snapshot: &Snapshot, id: &str) -> Option<RefId> {
    snapshot
        .root
        .as_ref()
        .and_then(|root| root.find(&NodeId::from(id)))
        .and_then(|node| node.ref_id)
}

fn login_form() -> (Snapshot, Viewport) {
    let viewport = Viewport::new(300.0, 300.0);
    let snapshot = page(
        viewport,
        vec![
            Node::new("login", Role::Button, Rect::new(10.0, 10.0, 80.0, 30.0))
                .with_text("Login", Rect::new(26.0, 16.0, 40.0, 18.0)),
            Node::new("email", Role::Input, Rect::new(10.0, 50.0, 200.0, 30.0))
                .with_attr("placeholder", "email"),
            Node::new("logo", Role::Other, Rect::new(10.0, 90.0, 100.0, 100.0)),
        ],
    );
    (snapshot, viewport)
}

#[test]
fn test_login_form_scenario() {
    let (mut snapshot, viewport) = login_form();
    let wireframe = render(&mut snapshot, viewport);

    assert_eq!(ref_of(&snapshot, "login"), Some(RefId(1)));
    assert_eq!(ref_of(&snapshot, "email"), Some(RefId(2)));
    assert_eq!(ref_of(&snapshot, "logo"), None);

    let expected = [
        " +-[1]LOGIN--+".to_string(),
        " +--------+".to_string(),
        format!(" [2]+email{}+", "-".repeat(18)),
        format!(" +{}+", "-".repeat(23)),
    ]
    .join("\n");
    assert_eq!(wireframe, expected);
}

#[test]
fn test_login_form_with_image_placeholder() {
    let viewport = Viewport::new(300.0, 300.0);
    let mut snapshot = page(
        viewport,
        vec![
            Node::new("login", Role::Button, Rect::new(10.0, 10.0, 80.0, 30.0))
                .with_text("Login", Rect::new(26.0, 16.0, 40.0, 18.0)),
            Node::new("email", Role::Input, Rect::new(10.0, 50.0, 200.0, 30.0))
                .with_attr("placeholder", "email"),
            Node::new("logo", Role::Other, Rect::new(10.0, 90.0, 100.0, 100.0))
                .with_media(MediaKind::Img),
        ],
    );
    let wireframe = render(&mut snapshot, viewport);

    assert_eq!(ref_of(&snapshot, "logo"), None);
    let lines: Vec<&str> = wireframe.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], " [IMAGE]");
    assert_eq!(parse_ref_ids(&wireframe), vec![RefId(1), RefId(2)]);
}

#[test]
fn test_render_is_idempotent() {
    let (mut snapshot, viewport) = login_form();
    let first = render(&mut snapshot, viewport);
    let first_refs: Vec<_> = snapshot.tagged_nodes().iter().map(|n| n.ref_id).collect();
    let second = render(&mut snapshot, viewport);
    let second_refs: Vec<_> = snapshot.tagged_nodes().iter().map(|n| n.ref_id).collect();
    assert_eq!(first, second);
    assert_eq!(first_refs, second_refs);
}

#[test]
fn test_backdrop_no_longer_blocks_content() {
    let viewport = Viewport::new(1000.0, 800.0);
    let mut snapshot = page(
        viewport,
        vec![
            Node::new("buy", Role::Button, Rect::new(100.0, 100.0, 80.0, 30.0))
                .with_text("Buy", Rect::new(120.0, 106.0, 24.0, 18.0)),
            Node::new("backdrop", Role::Container, Rect::new(25.0, 20.0, 950.0, 760.0))
                .with_style(Style {
                    z_index: Some(500),
                    ..Default::default()
                }),
        ],
    );
    let wireframe = render(&mut snapshot, viewport);

    assert_eq!(ref_of(&snapshot, "buy"), Some(RefId(1)));
    assert!(wireframe.contains("+--[1]BUY---+"), "{wireframe}");
    let backdrop = snapshot
        .root
        .as_ref()
        .and_then(|root| root.find(&NodeId::from("backdrop")))
        .unwrap();
    assert!(backdrop.suppressed);
}

#[test]
fn test_dialog_with_text_still_blocks() {
    let viewport = Viewport::new(1000.0, 800.0);
    let mut snapshot = page(
        viewport,
        vec![
            Node::new("buy", Role::Button, Rect::new(100.0, 100.0, 80.0, 30.0))
                .with_text("Buy", Rect::new(120.0, 106.0, 24.0, 18.0)),
            Node::new("dialog", Role::Container, Rect::new(25.0, 20.0, 950.0, 760.0))
                .with_style(Style {
                    z_index: Some(500),
                    ..Default::default()
                })
                .with_text("Accept cookies?", Rect::new(400.0, 300.0, 120.0, 18.0)),
        ],
    );
    let wireframe = render(&mut snapshot, viewport);

    assert_eq!(ref_of(&snapshot, "buy"), None);
    assert!(!wireframe.contains("BUY"));
    assert!(wireframe.contains("Accept cookies?"));
}

#[test]
fn test_off_screen_node_contributes_nothing() {
    let viewport = Viewport::new(300.0, 300.0);
    let mut snapshot = page(
        viewport,
        vec![
            Node::new("ghost", Role::Button, Rect::new(-50.0, 0.0, 40.0, 20.0))
                .with_text("Ghost", Rect::new(-50.0, 0.0, 40.0, 20.0)),
        ],
    );
    let wireframe = render(&mut snapshot, viewport);
    assert_eq!(wireframe, "");
    assert!(snapshot.tagged_nodes().is_empty());
}

#[test]
fn test_ref_ids_round_trip() {
    let viewport = Viewport::new(600.0, 400.0);
    let mut snapshot = page(
        viewport,
        vec![
            Node::new("nav", Role::Anchor, Rect::new(0.0, 0.0, 40.0, 18.0))
                .with_text("Home", Rect::new(0.0, 0.0, 32.0, 18.0)),
            Node::new("nav2", Role::Anchor, Rect::new(48.0, 0.0, 48.0, 18.0))
                .with_text("About", Rect::new(48.0, 0.0, 40.0, 18.0)),
            Node::new("q", Role::Input, Rect::new(200.0, 40.0, 160.0, 30.0))
                .with_attr("placeholder", "Search"),
            Node::new("icon", Role::Button, Rect::new(380.0, 40.0, 24.0, 24.0))
                .with_attr("title", "Go"),
            Node::new("card", Role::Container, Rect::new(0.0, 100.0, 300.0, 60.0))
                .with_style(Style {
                    cursor: "pointer".to_string(),
                    ..Default::default()
                })
                .with_text("Open settings", Rect::new(8.0, 110.0, 104.0, 18.0)),
            Node::new("below", Role::Button, Rect::new(0.0, 450.0, 80.0, 30.0))
                .with_text("More", Rect::new(16.0, 456.0, 32.0, 18.0)),
        ],
    );
    let wireframe = render(&mut snapshot, viewport);

    let parsed = parse_ref_ids(&wireframe);
    let unique: HashSet<_> = parsed.iter().copied().collect();
    assert_eq!(unique.len(), parsed.len(), "duplicate labels in {wireframe}");

    let assigned: HashSet<_> = snapshot
        .tagged_nodes()
        .iter()
        .filter_map(|node| node.ref_id)
        .collect();
    assert_eq!(assigned.len(), 6);
    assert_eq!(unique, assigned);
}

#[test]
fn test_button_cut_by_top_edge_keeps_its_label() {
    let viewport = Viewport::new(300.0, 300.0);
    let mut snapshot = page(
        viewport,
        vec![
            Node::new("top", Role::Button, Rect::new(10.0, -10.0, 80.0, 30.0))
                .with_text("Go", Rect::new(20.0, -5.0, 16.0, 18.0)),
        ],
    );
    let wireframe = render(&mut snapshot, viewport);

    assert_eq!(ref_of(&snapshot, "top"), Some(RefId(1)));
    assert_eq!(parse_ref_ids(&wireframe), vec![RefId(1)]);
    assert_eq!(wireframe.lines().next(), Some(" +[1]--------+"));
}

#[test]
fn test_empty_document_renders_empty_string() {
    let mut snapshot = Snapshot::default();
    let mut query = PaintOrderIndex::default();
    let wireframe =
        render_wireframe(&mut snapshot, Viewport::default(), CharMetrics::default(), &mut query)
            .unwrap();
    assert_eq!(wireframe, "");
}

#[test]
fn test_unavailable_collaborator_propagates() {
    let (mut snapshot, viewport) = login_form();
    let err = render_wireframe(&mut snapshot, viewport, CharMetrics::default(), &mut Unreachable)
        .unwrap_err();
    assert!(matches!(err, WireframeError::CollaboratorUnavailable(_)));
}
