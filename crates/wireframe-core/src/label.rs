//! Accessible labels for icon-only controls and placeholder text for media.

use crate::snapshot::{collapse_whitespace, Node};

/// Attribute precedence when looking for a human-readable label.
const LABEL_ATTRIBUTES: [&str; 3] = ["aria-label", "title", "alt"];

/// Attribute precedence for the text of a media placeholder.
const MEDIA_ATTRIBUTES: [&str; 3] = ["alt", "title", "aria-label"];

/// Media smaller than this on either side (pixels) is left out.
const MIN_MEDIA_SIDE: f64 = 10.0;
/// Media no larger than this on both sides is treated as an icon.
const ICON_SIDE: f64 = 50.0;
/// Icons this thin on either side only fit a single character.
const TINY_ICON_SIDE: f64 = 20.0;
const ICON_LABEL_LEN: usize = 8;

/// Resolve a label for `node` from its own attributes, then from the first
/// descendant carrying a hint (e.g. `<a><div title="upvote"></div></a>`).
pub fn resolve_label(node: &Node) -> Option<String> {
    own_label(node).or_else(|| node.children.iter().find_map(descendant_label))
}

/// Placeholder text for a media node. `None` for non-media nodes and for
/// media under 10px on either side.
///
/// Tiny icons get the first character of their label (or `*`), icons up to
/// 50x50 get `[label]` cut to 8 characters (or `[ICON]`), and anything larger
/// gets the full `[label]` (or `[IMAGE]`).
pub fn media_placeholder(node: &Node) -> Option<String> {
    node.media?;
    let (width, height) = (node.bounds.width, node.bounds.height);
    if !(width >= MIN_MEDIA_SIDE && height >= MIN_MEDIA_SIDE) {
        return None;
    }

    let label = MEDIA_ATTRIBUTES
        .iter()
        .find_map(|name| node.attr(name))
        .map(collapse_whitespace);

    let text = if width <= ICON_SIDE && height <= ICON_SIDE {
        if width <= TINY_ICON_SIDE || height <= TINY_ICON_SIDE {
            label
                .and_then(|label| label.chars().next())
                .unwrap_or('*')
                .to_string()
        } else {
            let label = label
                .map(|label| label.chars().take(ICON_LABEL_LEN).collect())
                .unwrap_or_else(|| "ICON".to_string());
            format!("[{label}]")
        }
    } else {
        format!("[{}]", label.unwrap_or_else(|| "IMAGE".to_string()))
    };
    Some(text)
}

fn own_label(node: &Node) -> Option<String> {
    LABEL_ATTRIBUTES
        .iter()
        .find_map(|name| node.attr(name))
        .map(collapse_whitespace)
}

fn descendant_label(node: &Node) -> Option<String> {
    own_label(node).or_else(|| node.children.iter().find_map(descendant_label))
}
