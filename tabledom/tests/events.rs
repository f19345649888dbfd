use tabledom::{
    hit_path, hit_test, Document, Element, Event, EventKind, LayoutResult, ListenerOwner,
    ListenerTarget, Rect, Visibility,
};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_point_inside() {
    let root = Element::div()
        .id("root")
        .child(Element::text("Click me").id("btn"));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("btn", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&layout, &root, 15, 11), Some("btn".to_string()));
    assert_eq!(hit_test(&layout, &root, 5, 5), Some("root".to_string()));
    assert_eq!(hit_test(&layout, &root, 150, 150), None);
}

#[test]
fn test_hit_path_lists_ancestors() {
    let root = Element::div()
        .id("root")
        .child(Element::div().id("row").child(Element::text("x").id("cell")));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 10, 10)),
        ("row", Rect::new(0, 2, 10, 1)),
        ("cell", Rect::new(0, 2, 3, 1)),
    ]);

    assert_eq!(hit_path(&layout, &root, 1, 2), vec!["root", "row", "cell"]);
    assert_eq!(hit_path(&layout, &root, 5, 2), vec!["root", "row"]);
}

#[test]
fn test_hit_test_overlapping_elements() {
    // Later children should be "on top"
    let root = Element::div()
        .id("root")
        .child(Element::div().id("bottom"))
        .child(Element::div().id("top"));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 100)),
        ("bottom", Rect::new(10, 10, 50, 50)),
        ("top", Rect::new(30, 30, 50, 50)),
    ]);

    assert_eq!(hit_test(&layout, &root, 40, 40), Some("top".to_string()));
    assert_eq!(hit_test(&layout, &root, 15, 15), Some("bottom".to_string()));
}

#[test]
fn test_hidden_elements_are_not_hit() {
    let root = Element::div()
        .id("root")
        .child(Element::text("ghost").id("ghost").visibility(Visibility::Hidden));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 10, 10)),
        ("ghost", Rect::new(0, 0, 5, 1)),
    ]);

    assert_eq!(hit_test(&layout, &root, 1, 0), Some("root".to_string()));
}

// ============================================================================
// Document dispatch
// ============================================================================

fn list_document() -> Document {
    Document::new(
        Element::div().id("root").child(
            Element::table()
                .id("table")
                .child(Element::tr().id("r0").child(Element::th("H").id("c0")))
                .child(Element::tr().id("r1").child(Element::td("A").id("c1"))),
        ),
    )
}

#[test]
fn test_listener_target_bubbles_to_registered_ancestor() {
    let mut doc = list_document();
    let owner = ListenerOwner::new();
    doc.listeners_mut()
        .attach(ListenerTarget::Element("r1".into()), EventKind::MouseDown, owner);

    // Point lands on the cell, the listener sits on its row
    assert_eq!(
        doc.listener_target(0, 1, EventKind::MouseDown, owner),
        Some("r1".to_string())
    );
    assert_eq!(doc.listener_target(0, 0, EventKind::MouseDown, owner), None);
    assert_eq!(doc.listener_target(0, 1, EventKind::MouseUp, owner), None);
    assert_eq!(
        doc.listener_target(0, 1, EventKind::MouseDown, ListenerOwner::new()),
        None
    );
}

#[test]
fn test_insert_before_and_remove() {
    let mut doc = list_document();
    doc.insert_before("table", Element::div().id("banner")).unwrap();

    let ids: Vec<_> = doc.root().child_elements().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["banner", "table"]);
    assert_eq!(doc.rect("table").map(|r| r.y), Some(0));

    assert!(doc.remove("banner").is_some());
    assert!(doc.remove("banner").is_none());
    assert!(doc.insert_before("missing", Element::div()).is_err());
}

#[test]
fn test_layout_follows_mutations() {
    let mut doc = list_document();
    assert_eq!(doc.rect("r1").map(|r| r.y), Some(1));

    doc.get_mut("table").unwrap().move_child(1, 0);
    assert_eq!(doc.rect("r1").map(|r| r.y), Some(0));
    assert_eq!(doc.query_id("table").as_deref(), Some("table"));
}

#[test]
fn test_event_kinds_and_positions() {
    let down = Event::MouseDown {
        x: 3,
        y: 4,
        button: tabledom::MouseButton::Left,
    };
    assert_eq!(down.kind(), Some(EventKind::MouseDown));
    assert_eq!(down.position(), Some((3, 4)));

    let resize = Event::Resize {
        width: 10,
        height: 5,
    };
    assert_eq!(resize.kind(), None);
    assert_eq!(resize.position(), None);
}
