mod content;
mod markup;
mod node;
mod selector;

pub use content::Content;
pub use node::Element;
pub use selector::Selector;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the parent of the element with the given ID.
pub(crate) fn find_parent<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    let children = root.child_elements();
    if children.iter().any(|c| c.id == id) {
        return Some(root);
    }
    children.iter().find_map(|c| find_parent(c, id))
}

/// Find the parent of the element with the given ID, along with the child's index.
pub(crate) fn find_parent_mut<'a>(
    root: &'a mut Element,
    id: &str,
) -> Option<(&'a mut Element, usize)> {
    let index = match &root.content {
        Content::Children(children) => children.iter().position(|c| c.id == id),
        _ => return None,
    };

    if let Some(index) = index {
        return Some((root, index));
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_parent_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}
