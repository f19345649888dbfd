//! A document: an element tree plus its listeners and cached layout.

use crate::element::{
    find_element, find_element_mut, find_parent, find_parent_mut, Element, Selector,
};
use crate::event::EventKind;
use crate::hit::hit_path;
use crate::layout::{layout, LayoutResult, Rect};
use crate::listener::{ListenerOwner, ListenerTarget, Listeners};

pub struct Document {
    root: Element,
    listeners: Listeners,
    viewport: Rect,
    layout: LayoutResult,
    dirty: bool,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            listeners: Listeners::new(),
            viewport: Rect::from_size(80, 24),
            layout: LayoutResult::new(),
            dirty: true,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the tree. Invalidates the cached layout.
    pub fn root_mut(&mut self) -> &mut Element {
        self.dirty = true;
        &mut self.root
    }

    /// Replace the whole tree. Listeners on removed elements stay registered
    /// until their owner detaches them.
    pub fn replace_root(&mut self, root: Element) {
        self.root = root;
        self.dirty = true;
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.dirty = true;
        }
    }

    // Lookup

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.dirty = true;
        find_element_mut(&mut self.root, id)
    }

    /// ID of the parent of the element with ID `id`.
    pub fn parent_id(&self, id: &str) -> Option<String> {
        find_parent(&self.root, id).map(|parent| parent.id.clone())
    }

    pub fn query(&self, selector: &str) -> Option<&Element> {
        Selector::parse(selector).find(&self.root)
    }

    /// ID of the first element matching `selector`.
    pub fn query_id(&self, selector: &str) -> Option<String> {
        Selector::parse(selector).find_id(&self.root)
    }

    // Mutation

    /// Insert `element` as the previous sibling of the element with ID `id`.
    /// Returns the element back if `id` has no parent in this document.
    pub fn insert_before(&mut self, id: &str, element: Element) -> Result<(), Element> {
        self.dirty = true;
        let Some((parent, index)) = find_parent_mut(&mut self.root, id) else {
            return Err(element);
        };
        match parent.child_elements_mut() {
            Some(children) => {
                children.insert(index, element);
                Ok(())
            }
            None => Err(element),
        }
    }

    /// Detach the element with ID `id` from the tree.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.dirty = true;
        let (parent, index) = find_parent_mut(&mut self.root, id)?;
        parent.child_elements_mut().map(|children| children.remove(index))
    }

    // Layout

    /// Current layout, recomputed if the tree or viewport changed.
    pub fn layout(&mut self) -> &LayoutResult {
        if self.dirty {
            self.layout = layout(&self.root, self.viewport);
            self.dirty = false;
        }
        &self.layout
    }

    pub fn rect(&mut self, id: &str) -> Option<Rect> {
        self.layout().get(id).copied()
    }

    // Dispatch

    /// The element a pointer event at `(x, y)` reaches for `owner`'s
    /// element listeners of `kind`, searching from the hit element up to
    /// the root (bubbling).
    pub fn listener_target(
        &mut self,
        x: u16,
        y: u16,
        kind: EventKind,
        owner: ListenerOwner,
    ) -> Option<String> {
        self.layout();
        let path = hit_path(&self.layout, &self.root, x, y);
        path.into_iter().rev().find(|id| {
            self.listeners
                .has(&ListenerTarget::Element(id.clone()), kind, owner)
        })
    }

    /// Whether `owner` has a document-level listener for `kind`.
    pub fn listens_on_document(&self, kind: EventKind, owner: ListenerOwner) -> bool {
        self.listeners.has(&ListenerTarget::Document, kind, owner)
    }
}
