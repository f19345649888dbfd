use super::{Content, Element};

/// A simple selector: `#id`, `.class`, or a bare tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    pub fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            Self::Id(id.to_string())
        } else if let Some(class) = selector.strip_prefix('.') {
            Self::Class(class.to_string())
        } else {
            Self::Tag(selector.to_string())
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Id(id) => &element.id == id,
            Self::Class(class) => element.has_class(class),
            Self::Tag(tag) => &element.tag == tag,
        }
    }

    /// First matching element in document order.
    pub fn find<'a>(&self, root: &'a Element) -> Option<&'a Element> {
        if self.matches(root) {
            return Some(root);
        }
        root.child_elements().iter().find_map(|c| self.find(c))
    }

    /// ID of the first matching element in document order.
    pub fn find_id(&self, root: &Element) -> Option<String> {
        self.find(root).map(|el| el.id.clone())
    }

    /// All matching elements in document order.
    pub fn find_all<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect(self, root, &mut found);
        found
    }
}

fn collect<'a>(selector: &Selector, element: &'a Element, found: &mut Vec<&'a Element>) {
    if selector.matches(element) {
        found.push(element);
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect(selector, child, found);
        }
    }
}

impl From<&str> for Selector {
    fn from(selector: &str) -> Self {
        Self::parse(selector)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Tag(tag) => write!(f, "{tag}"),
        }
    }
}
