//! Flow layout: columns stack children top to bottom, rows place them left to right.
//!
//! Absolutely positioned children are taken out of flow and placed at
//! `top`/`left` relative to their parent's origin.

use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Direction, Position, Size};

pub type LayoutResult = HashMap<String, Rect>;

pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    layout_element(element, available, &mut result);
    result
}

fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) -> Rect {
    place(element, available, None, result)
}

/// Lay out `element` at the origin of `available`, optionally forcing its width.
fn place(
    element: &Element,
    available: Rect,
    width: Option<u16>,
    result: &mut LayoutResult,
) -> Rect {
    let width = width
        .unwrap_or_else(|| resolve(element.width, available.width, || intrinsic_width(element)));
    let height = resolve(element.height, available.height, || intrinsic_height(element));
    let rect = Rect::new(available.x, available.y, width, height);
    result.insert(element.id.clone(), rect);
    layout_children(element, rect, result);
    rect
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };

    let (flow, absolute): (Vec<&Element>, Vec<&Element>) = children
        .iter()
        .partition(|c| c.position != Position::Absolute);

    match element.direction {
        Direction::Column => layout_column(element, &flow, rect, result),
        Direction::Row => layout_row(element, &flow, rect, result),
    }

    for child in absolute {
        let x = offset(rect.x, child.left);
        let y = offset(rect.y, child.top);
        let available = Rect::new(x, y, rect.width, rect.height);
        layout_element(child, available, result);
    }
}

fn layout_column(element: &Element, children: &[&Element], rect: Rect, result: &mut LayoutResult) {
    let mut cursor = 0u16;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            cursor = cursor.saturating_add(element.gap);
        }
        let placed = layout_element(child, rect.below(cursor), result);
        cursor = cursor.saturating_add(placed.height);
    }
}

fn layout_row(element: &Element, children: &[&Element], rect: Rect, result: &mut LayoutResult) {
    if children.is_empty() {
        return;
    }

    let gaps = element.gap.saturating_mul(children.len() as u16 - 1);
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    for child in children {
        match child.width {
            Size::Fixed(w) => fixed_total = fixed_total.saturating_add(w),
            Size::Auto => fixed_total = fixed_total.saturating_add(intrinsic_width(child)),
            Size::Fill => fill_count += 1,
        }
    }

    let remaining = rect.width.saturating_sub(fixed_total).saturating_sub(gaps);
    let fill_width = remaining.checked_div(fill_count).unwrap_or(0);
    let mut leftover = remaining.checked_rem(fill_count).unwrap_or(0);

    let mut x = rect.x;
    for child in children {
        let width = match child.width {
            Size::Fixed(w) => w,
            Size::Auto => intrinsic_width(child),
            Size::Fill => {
                // Hand out the remainder one cell at a time, leftmost first
                let extra = u16::from(leftover > 0);
                leftover = leftover.saturating_sub(1);
                fill_width + extra
            }
        };
        place(child, Rect::new(x, rect.y, width, rect.height), Some(width), result);
        x = x.saturating_add(width).saturating_add(element.gap);
    }
}

fn offset(origin: u16, delta: Option<i16>) -> u16 {
    let value = i32::from(origin) + i32::from(delta.unwrap_or(0));
    value.clamp(0, i32::from(u16::MAX)) as u16
}

fn resolve(size: Size, available: u16, intrinsic: impl FnOnce() -> u16) -> u16 {
    match size {
        Size::Fixed(n) => n,
        Size::Fill => available,
        Size::Auto => intrinsic().min(available),
    }
}

pub(crate) fn intrinsic_height(element: &Element) -> u16 {
    if let Size::Fixed(h) = element.height {
        return h;
    }
    match &element.content {
        Content::None => 0,
        Content::Text(text) => text.lines().count().max(1) as u16,
        Content::Children(children) => {
            let flow = children.iter().filter(|c| c.position != Position::Absolute);
            match element.direction {
                Direction::Column => {
                    let mut total = 0u16;
                    let mut count = 0u16;
                    for child in flow {
                        total = total.saturating_add(intrinsic_height(child));
                        count += 1;
                    }
                    total.saturating_add(element.gap.saturating_mul(count.saturating_sub(1)))
                }
                Direction::Row => flow.map(intrinsic_height).max().unwrap_or(0),
            }
        }
    }
}

pub(crate) fn intrinsic_width(element: &Element) -> u16 {
    if let Size::Fixed(w) = element.width {
        return w;
    }
    match &element.content {
        Content::None => 0,
        Content::Text(text) => text.lines().map(display_width).max().unwrap_or(0) as u16,
        Content::Children(children) => {
            let flow = children.iter().filter(|c| c.position != Position::Absolute);
            match element.direction {
                Direction::Row => {
                    let mut total = 0u16;
                    let mut count = 0u16;
                    for child in flow {
                        total = total.saturating_add(intrinsic_width(child));
                        count += 1;
                    }
                    total.saturating_add(element.gap.saturating_mul(count.saturating_sub(1)))
                }
                Direction::Column => flow.map(intrinsic_width).max().unwrap_or(0),
            }
        }
    }
}
