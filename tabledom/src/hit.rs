use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Find the deepest visible element at the given coordinates.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_path(layout, root, x, y).pop()
}

/// Chain of element IDs from `root` down to the deepest visible element
/// containing the point. Empty if the point misses `root`.
///
/// Absolutely positioned children can extend past their parent, so every
/// child is considered even when the parent itself misses.
pub fn hit_path(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Vec<String> {
    let mut path = Vec::new();
    hit_element(layout, root, x, y, &mut path);
    path
}

fn hit_element(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    path: &mut Vec<String>,
) -> bool {
    if element.is_hidden() {
        return false;
    }

    path.push(element.id.clone());

    // Children in reverse order (last rendered = on top)
    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if hit_element(layout, child, x, y, path) {
                return true;
            }
        }
    }

    let inside = layout
        .get(&element.id)
        .is_some_and(|rect| rect.contains(x, y));
    if !inside {
        path.pop();
    }
    inside
}
