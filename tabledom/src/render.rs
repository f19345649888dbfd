use crate::buffer::Buffer;
use crate::element::{Content, Element};
use crate::layout::LayoutResult;
use crate::text::truncate_to_width;
use crate::types::{Position, Rgb, TextStyle};

/// Colors and text attributes inherited down the tree.
#[derive(Debug, Clone, Copy)]
struct Inherited {
    fg: Rgb,
    style: TextStyle,
}

pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let inherited = Inherited {
        fg: Rgb::new(220, 220, 220),
        style: TextStyle::new(),
    };
    render_element(root, layout, buf, inherited);
}

fn render_element(element: &Element, layout: &LayoutResult, buf: &mut Buffer, parent: Inherited) {
    if element.is_hidden() {
        return;
    }
    let Some(rect) = layout.get(&element.id).copied() else {
        return;
    };

    if let Some(bg) = &element.style.background {
        buf.fill(rect, bg.to_rgb());
    }

    let inherited = Inherited {
        fg: element
            .style
            .foreground
            .as_ref()
            .map_or(parent.fg, |c| c.to_rgb()),
        style: merge(parent.style, element.style.text_style),
    };

    match &element.content {
        Content::None => {}
        Content::Text(text) => {
            for (row, line) in text.lines().enumerate().take(rect.height as usize) {
                let line = truncate_to_width(line, rect.width as usize);
                buf.put_str(
                    rect.x,
                    rect.y + row as u16,
                    rect.right(),
                    &line,
                    inherited.fg,
                    inherited.style,
                );
            }
        }
        Content::Children(children) => {
            // Flow children first, absolute children on top
            for child in children.iter().filter(|c| c.position != Position::Absolute) {
                render_element(child, layout, buf, inherited);
            }
            for child in children.iter().filter(|c| c.position == Position::Absolute) {
                render_element(child, layout, buf, inherited);
            }
        }
    }
}

fn merge(parent: TextStyle, own: TextStyle) -> TextStyle {
    TextStyle {
        bold: parent.bold || own.bold,
        dim: parent.dim || own.dim,
        italic: parent.italic || own.italic,
        underline: parent.underline || own.underline,
        reverse: parent.reverse || own.reverse,
    }
}
