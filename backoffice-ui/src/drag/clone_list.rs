//! Data-level drag proxy.
//!
//! A `CloneList` holds a copy of every table row (payload and height) in
//! visual order, the placeholder reserving the dragged row's slot, and the
//! dragged row's free-floating offset. All reorder decisions are made here;
//! the document only ever sees a projection of it (see [`CloneList::to_element`]).
//!
//! Geometry is relative to the list's origin (the table's top-left corner).
//! Rows that are not being dragged flow top to bottom; the dragged row sits
//! wherever the pointer has moved it.

use tabledom::{Content, Element, Position, Size};

pub const CLONE_LIST_CLASS: &str = "clone-list";
pub const CLONE_TABLE_CLASS: &str = "clone-table";
pub const DRAGGABLE_CLASS: &str = "draggable";
pub const DRAGGING_CLASS: &str = "dragging";
pub const PLACEHOLDER_CLASS: &str = "placeholder";

/// Copy of one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct CloneRow {
    /// Index of the row in the real table when the drag started.
    pub source_index: usize,
    /// The row's rendered content.
    pub payload: Element,
    pub height: u16,
}

impl CloneRow {
    pub fn new(source_index: usize, payload: Element, height: u16) -> Self {
        Self {
            source_index,
            payload,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Row(CloneRow),
    Placeholder,
}

/// Which way the dragged row moved past a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swap {
    Up,
    Down,
}

/// Outcome of releasing the dragged row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    /// Final index of the dragged row.
    pub end: usize,
    /// Source indices of all rows in their final visual order.
    pub order: Vec<usize>,
}

/// Vertical extent of an item, relative to the list origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: i32,
    pub height: u16,
}

impl Span {
    pub fn mid(&self) -> f32 {
        self.top as f32 + f32::from(self.height) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloneList {
    items: Vec<Item>,
    width: u16,
    /// Position of the dragged row in `items`. The placeholder is always right after it.
    dragging: Option<usize>,
    top: i32,
    left: i32,
}

impl CloneList {
    pub fn new(rows: Vec<CloneRow>, width: u16) -> Self {
        Self {
            items: rows.into_iter().map(Item::Row).collect(),
            width,
            dragging: None,
            top: 0,
            left: 0,
        }
    }

    /// Start dragging the row at `index` and insert the placeholder after it.
    ///
    /// The header (index 0) cannot be dragged. Returns false if `index` is
    /// the header, out of range, or a drag is already in progress.
    pub fn start_drag(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() || self.dragging.is_some() {
            return false;
        }
        self.top = self.flow_top(index);
        self.left = 0;
        self.dragging = Some(index);
        self.items.insert(index + 1, Item::Placeholder);
        true
    }

    /// Offset the dragged row by a pointer delta, then move it past at most
    /// one neighbour whose midpoint it crossed.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> Option<Swap> {
        let d = self.dragging?;
        self.left += dx;
        self.top += dy;

        let dragged = self.dragged_span()?.mid();

        // The element above must itself have an element above it: nothing goes above the header
        if d >= 2 && dragged < self.flow_span(d - 1).mid() {
            let prev = self.items.remove(d - 1);
            self.items.insert(d + 1, prev);
            self.dragging = Some(d - 1);
            return Some(Swap::Up);
        }

        let next = d + 2;
        if next < self.items.len() && self.flow_span(next).mid() < dragged {
            let next = self.items.remove(next);
            self.items.insert(d, next);
            self.dragging = Some(d + 1);
            return Some(Swap::Down);
        }

        None
    }

    /// Release the dragged row: drop the placeholder and report where it landed.
    pub fn finish(mut self) -> Option<DropResult> {
        let end = self.dragging.take()?;
        self.items.retain(|item| matches!(item, Item::Row(_)));
        Some(DropResult {
            end,
            order: self.order(),
        })
    }

    /// Source indices of the rows in visual order.
    pub fn order(&self) -> Vec<usize> {
        self.rows().map(|row| row.source_index).collect()
    }

    /// Current index of the dragged row among the rows.
    pub fn dragged_index(&self) -> Option<usize> {
        self.dragging
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn len(&self) -> usize {
        self.rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Free-floating position of the dragged row, `(left, top)`.
    pub fn offset(&self) -> (i32, i32) {
        (self.left, self.top)
    }

    /// Height reserved by the placeholder, equal to the dragged row's.
    pub fn placeholder_height(&self) -> Option<u16> {
        self.dragged_row().map(|row| row.height)
    }

    pub fn has_placeholder(&self) -> bool {
        self.items.iter().any(|item| matches!(item, Item::Placeholder))
    }

    pub fn dragged_span(&self) -> Option<Span> {
        self.dragged_row().map(|row| Span {
            top: self.top,
            height: row.height,
        })
    }

    fn rows(&self) -> impl Iterator<Item = &CloneRow> {
        self.items.iter().filter_map(|item| match item {
            Item::Row(row) => Some(row),
            Item::Placeholder => None,
        })
    }

    fn dragged_row(&self) -> Option<&CloneRow> {
        match self.items.get(self.dragging?)? {
            Item::Row(row) => Some(row),
            Item::Placeholder => None,
        }
    }

    fn item_height(&self, item: &Item) -> u16 {
        match item {
            Item::Row(row) => row.height,
            Item::Placeholder => self.placeholder_height().unwrap_or(0),
        }
    }

    /// Top of the in-flow item at `pos`, skipping the dragged row.
    fn flow_top(&self, pos: usize) -> i32 {
        self.items[..pos]
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != self.dragging)
            .map(|(_, item)| i32::from(self.item_height(item)))
            .sum()
    }

    fn flow_span(&self, pos: usize) -> Span {
        Span {
            top: self.flow_top(pos),
            height: self.item_height(&self.items[pos]),
        }
    }

    /// Render the list as a `div.clone-list` of single-row tables.
    ///
    /// Element IDs inside the copies are prefixed with `id` so they never
    /// collide with the real table's.
    pub fn to_element(&self, id: &str) -> Element {
        let mut list = Element::div().id(id).class(CLONE_LIST_CLASS).width(Size::Fixed(self.width));
        for (pos, item) in self.items.iter().enumerate() {
            let child = match item {
                Item::Row(row) => {
                    let mut wrapper = Element::div()
                        .id(format!("{id}-item-{}", row.source_index))
                        .class(DRAGGABLE_CLASS)
                        .height(Size::Fixed(row.height))
                        .child(
                            Element::table()
                                .id(format!("{id}-table-{}", row.source_index))
                                .class(CLONE_TABLE_CLASS)
                                .width(Size::Fixed(self.width))
                                .child(prefixed(&row.payload, id)),
                        );
                    if Some(pos) == self.dragging {
                        wrapper.add_class(DRAGGING_CLASS);
                        wrapper = wrapper
                            .position(Position::Absolute)
                            .top(clamp_i16(self.top))
                            .left(clamp_i16(self.left));
                    }
                    wrapper
                }
                Item::Placeholder => Element::div()
                    .id(format!("{id}-placeholder"))
                    .class(PLACEHOLDER_CLASS)
                    .height(Size::Fixed(self.placeholder_height().unwrap_or(0))),
            };
            list = list.child(child);
        }
        list
    }
}

fn prefixed(element: &Element, prefix: &str) -> Element {
    let mut copy = element.clone();
    copy.id = format!("{prefix}-{}", element.id);
    if let Content::Children(children) = &element.content {
        copy.content = Content::Children(children.iter().map(|c| prefixed(c, prefix)).collect());
    }
    copy
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
