//! Listener registry.
//!
//! Components do not hand closures to the document. They register which
//! (target, event kind) pairs they listen on, under their owner handle, and
//! the document tells them whether an incoming event reaches one of those.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::EventKind;

/// Identity of a component that owns listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerOwner(u64);

impl ListenerOwner {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for ListenerOwner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListenerOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener-owner-{}", self.0)
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// Receives every event of its kind, wherever it lands.
    Document,
    /// Receives events hitting this element or its descendants.
    Element(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Listener {
    target: ListenerTarget,
    kind: EventKind,
    owner: ListenerOwner,
}

#[derive(Debug, Clone, Default)]
pub struct Listeners {
    entries: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. Returns false if an identical one is already attached.
    pub fn attach(&mut self, target: ListenerTarget, kind: EventKind, owner: ListenerOwner) -> bool {
        let listener = Listener {
            target,
            kind,
            owner,
        };
        if self.entries.contains(&listener) {
            return false;
        }
        self.entries.push(listener);
        true
    }

    /// Detach a listener. Returns false if it was not attached.
    pub fn detach(&mut self, target: &ListenerTarget, kind: EventKind, owner: ListenerOwner) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|l| !(l.target == *target && l.kind == kind && l.owner == owner));
        self.entries.len() != before
    }

    /// Detach everything an owner registered.
    pub fn detach_owner(&mut self, owner: ListenerOwner) -> usize {
        let before = self.entries.len();
        self.entries.retain(|l| l.owner != owner);
        before - self.entries.len()
    }

    pub fn has(&self, target: &ListenerTarget, kind: EventKind, owner: ListenerOwner) -> bool {
        self.entries
            .iter()
            .any(|l| l.target == *target && l.kind == kind && l.owner == owner)
    }

    /// Number of listeners attached by `owner`.
    pub fn count_for(&self, owner: ListenerOwner) -> usize {
        self.entries.iter().filter(|l| l.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_is_idempotent() {
        let mut listeners = Listeners::new();
        let owner = ListenerOwner::new();
        let target = ListenerTarget::Element("cell".into());
        assert!(listeners.attach(target.clone(), EventKind::MouseDown, owner));
        assert!(!listeners.attach(target.clone(), EventKind::MouseDown, owner));
        assert_eq!(listeners.len(), 1);
        assert!(listeners.detach(&target, EventKind::MouseDown, owner));
        assert!(listeners.is_empty());
    }

    #[test]
    fn owners_are_isolated() {
        let mut listeners = Listeners::new();
        let a = ListenerOwner::new();
        let b = ListenerOwner::new();
        listeners.attach(ListenerTarget::Document, EventKind::MouseUp, a);
        listeners.attach(ListenerTarget::Document, EventKind::MouseUp, b);
        assert_eq!(listeners.detach_owner(a), 1);
        assert!(!listeners.has(&ListenerTarget::Document, EventKind::MouseUp, a));
        assert!(listeners.has(&ListenerTarget::Document, EventKind::MouseUp, b));
    }
}
