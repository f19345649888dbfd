use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::{Direction, Position, Size, Style, Visibility};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,

    // Content
    pub content: Content,

    // Layout
    pub width: Size,
    pub height: Size,
    pub direction: Direction,
    pub gap: u16,

    // Positioning
    pub position: Position,
    pub top: Option<i16>,
    pub left: Option<i16>,

    // Visual
    pub style: Style,
    pub visibility: Visibility,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            content: Content::None,
            width: Size::Fill,
            height: Size::Auto,
            direction: Direction::Column,
            gap: 0,
            position: Position::Static,
            top: None,
            left: None,
            style: Style::default(),
            visibility: Visibility::Visible,
        }
    }
}

impl Element {
    /// Create an element with the given tag and a generated ID.
    pub fn new(tag: &str) -> Self {
        Self {
            id: generate_id(tag),
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("span"),
            tag: "span".to_string(),
            content: Content::Text(content.into()),
            width: Size::Auto,
            ..Default::default()
        }
    }

    pub fn table() -> Self {
        Self::new("table")
    }

    /// A table row. Cells are laid out left to right.
    pub fn tr() -> Self {
        Self {
            direction: Direction::Row,
            gap: 1,
            ..Self::new("tr")
        }
    }

    /// A table cell holding text.
    pub fn td(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            ..Self::new("td")
        }
    }

    /// A header cell holding text.
    pub fn th(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            ..Self::new("th")
        }
    }

    pub fn hidden_input(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new("input")
            .attr("type", "hidden")
            .attr("name", name)
            .attr("value", value)
            .height(Size::Fixed(0))
    }

    // Builder methods

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        if let Some(children) = self.content.children_mut() {
            children.push(child);
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        if let Some(children) = self.content.children_mut() {
            children.extend(new_children);
        }
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn top(mut self, top: i16) -> Self {
        self.top = Some(top);
        self
    }

    pub fn left(mut self, left: i16) -> Self {
        self.left = Some(left);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    // Class list

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    // Children

    pub fn child_elements(&self) -> &[Element] {
        self.content.children()
    }

    /// Mutable child list. Text elements have no children and return `None`.
    pub fn child_elements_mut(&mut self) -> Option<&mut Vec<Element>> {
        self.content.children_mut()
    }

    /// Move the child at `from` so that it ends up at index `to`.
    ///
    /// Equivalent to inserting the node after the current occupant of `to`
    /// when moving down and before it when moving up. Out of range indices
    /// leave the children untouched and return false.
    pub fn move_child(&mut self, from: usize, to: usize) -> bool {
        let Some(children) = self.content.children_mut() else {
            return false;
        };
        if from >= children.len() || to >= children.len() {
            return false;
        }
        if from != to {
            let node = children.remove(from);
            children.insert(to, node);
        }
        true
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(text) => text.clone(),
            Content::Children(children) => children
                .iter()
                .map(Element::text_content)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }
}
