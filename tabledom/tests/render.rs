use tabledom::layout::layout;
use tabledom::render::render_to_buffer;
use tabledom::{Buffer, Color, Element, Position, Rect, Rgb, Size, Style, Visibility};

fn render(root: &Element, width: u16, height: u16) -> Buffer {
    let layout = layout(root, Rect::from_size(width, height));
    let mut buf = Buffer::new(width, height);
    render_to_buffer(root, &layout, &mut buf);
    buf
}

#[test]
fn test_text_is_truncated_to_cell_width() {
    let root = Element::tr()
        .child(Element::td("Lovelace").width(Size::Fixed(5)))
        .child(Element::td("x"));
    let buf = render(&root, 10, 1);
    assert_eq!(buf.row_text(0), "Love… x   ");
}

#[test]
fn test_hidden_subtree_is_not_drawn() {
    let root = Element::div()
        .child(Element::text("shown"))
        .child(Element::text("hidden").visibility(Visibility::Hidden));
    let buf = render(&root, 8, 2);
    assert_eq!(buf.row_text(0).trim_end(), "shown");
    assert_eq!(buf.row_text(1).trim_end(), "");
}

#[test]
fn test_absolute_child_paints_over_flow() {
    let root = Element::div()
        .child(Element::text("below"))
        .child(Element::text("over").position(Position::Absolute).top(0).left(0));
    let buf = render(&root, 8, 1);
    assert_eq!(buf.row_text(0).trim_end(), "overw");
}

#[test]
fn test_background_and_inherited_foreground() {
    let root = Element::div()
        .style(
            Style::new()
                .background(Color::rgb(10, 20, 30))
                .foreground(Color::rgb(200, 0, 0)),
        )
        .height(Size::Fixed(1))
        .child(Element::text("a"));
    let buf = render(&root, 3, 1);

    let cell = buf.get(0, 0).unwrap();
    assert_eq!(cell.char, 'a');
    assert_eq!(cell.fg, Rgb::new(200, 0, 0));
    assert_eq!(cell.bg, Rgb::new(10, 20, 30));
    assert_eq!(buf.get(2, 0).unwrap().bg, Rgb::new(10, 20, 30));
}
