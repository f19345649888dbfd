#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
}

impl Content {
    pub fn children(&self) -> &[super::Element] {
        match self {
            Self::Children(children) => children,
            _ => &[],
        }
    }

    /// Mutable access to the child list, turning empty content into an empty list.
    ///
    /// Returns `None` for text content.
    pub fn children_mut(&mut self) -> Option<&mut Vec<super::Element>> {
        if matches!(self, Self::None) {
            *self = Self::Children(Vec::new());
        }
        match self {
            Self::Children(children) => Some(children),
            _ => None,
        }
    }
}
