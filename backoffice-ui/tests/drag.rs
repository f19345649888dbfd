use std::sync::{Arc, Mutex};

use backoffice_ui::drag::{
    CLONE_LIST_CLASS, DRAGGING_CLASS, HANDLE_CLASS, HIDE_CLASS, PLACEHOLDER_CLASS,
};
use backoffice_ui::{CallbackTemplate, DragPhase, DraggableTable, OrderChange, OrderNotifier};
use tabledom::{
    Document, Element, Event, EventKind, ListenerTarget, MouseButton, Size, Visibility,
};

const CALLBACK: &str = "/publication/7/contributors/order/:start/:end";

#[derive(Default)]
struct RecordingNotifier {
    changes: Mutex<Vec<OrderChange>>,
}

impl RecordingNotifier {
    fn changes(&self) -> Vec<OrderChange> {
        self.changes.lock().unwrap().clone()
    }
}

impl OrderNotifier for RecordingNotifier {
    fn notify(&self, change: OrderChange) {
        self.changes.lock().unwrap().push(change);
    }
}

/// A table with a header and one single-line row per name. Row `i` sits at `y = i`.
fn table(id: &str, names: &[&str]) -> Element {
    let mut table = Element::table()
        .id(id)
        .child(
            Element::tr()
                .id(format!("{id}-head"))
                .child(Element::th("Name").id(format!("{id}-th-0")))
                .child(Element::th("Role").id(format!("{id}-th-1"))),
        );
    for name in names {
        table = table.child(
            Element::tr()
                .id(format!("{id}-{name}"))
                .child(Element::td("⠿").id(format!("{id}-{name}-handle")).width(Size::Fixed(2)))
                .child(Element::td(*name).id(format!("{id}-{name}-name")))
                .child(Element::td("author").id(format!("{id}-{name}-role"))),
        );
    }
    table
}

fn document(names: &[&str]) -> Document {
    Document::new(Element::div().id("root").child(table("contributors", names)))
}

fn row_ids(doc: &Document, table: &str) -> Vec<String> {
    doc.get(table)
        .unwrap()
        .child_elements()
        .iter()
        .map(|row| row.id.clone())
        .collect()
}

fn down(x: u16, y: u16) -> Event {
    Event::MouseDown {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn mv(x: u16, y: u16) -> Event {
    Event::MouseMove { x, y }
}

fn up(x: u16, y: u16) -> Event {
    Event::MouseUp {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn draggable(notifier: &Arc<RecordingNotifier>) -> DraggableTable {
    DraggableTable::new("#contributors", Some(CallbackTemplate::parse(CALLBACK).unwrap()))
        .with_notifier(notifier.clone())
}

// ============================================================================
// Init / Reset
// ============================================================================

#[test]
fn test_init_marks_handles_except_header() {
    let mut doc = document(&["a", "b", "c"]);
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);

    assert!(!doc.get("contributors-th-0").unwrap().has_class(HANDLE_CLASS));
    for name in ["a", "b", "c"] {
        let handle = format!("contributors-{name}-handle");
        assert!(doc.get(&handle).unwrap().has_class(HANDLE_CLASS));
        assert!(doc.listeners().has(
            &ListenerTarget::Element(handle),
            EventKind::MouseDown,
            table.owner()
        ));
    }
    assert_eq!(doc.listeners().count_for(table.owner()), 3);
}

#[test]
fn test_init_twice_does_not_duplicate_listeners() {
    let mut doc = document(&["a", "b"]);
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);
    table.init(&mut doc);
    assert_eq!(doc.listeners().count_for(table.owner()), 2);
}

#[test]
fn test_reset_removes_listeners_and_markers() {
    let mut doc = document(&["a", "b"]);
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);
    table.reset(&mut doc);

    assert_eq!(doc.listeners().count_for(table.owner()), 0);
    assert!(!doc.get("contributors-a-handle").unwrap().has_class(HANDLE_CLASS));

    // A reset table ignores presses until initialised again
    table.handle_event(&mut doc, &down(0, 1));
    assert_eq!(table.phase(), DragPhase::Idle);

    table.init(&mut doc);
    assert_eq!(doc.listeners().count_for(table.owner()), 2);
}

#[test]
fn test_missing_table_is_a_no_op() {
    let mut doc = Document::new(Element::div().id("root"));
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);
    assert!(doc.listeners().is_empty());
    table.reset(&mut doc);
    assert!(doc.listeners().is_empty());
}

#[test]
fn test_header_only_table_attaches_nothing() {
    let mut doc = document(&[]);
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);
    assert!(doc.listeners().is_empty());

    table.handle_event(&mut doc, &down(0, 0));
    assert_eq!(table.phase(), DragPhase::Idle);
}

// ============================================================================
// Drag lifecycle
// ============================================================================

#[test]
fn test_press_arms_without_touching_document() {
    let mut doc = document(&["a", "b"]);
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);
    let before = doc.root().clone();

    table.handle_event(&mut doc, &down(0, 1));
    assert_eq!(table.phase(), DragPhase::Armed);
    assert!(doc.listens_on_document(EventKind::MouseMove, table.owner()));
    assert!(doc.listens_on_document(EventKind::MouseUp, table.owner()));
    assert_eq!(doc.root().child_elements(), before.child_elements());
}

#[test]
fn test_press_outside_handles_is_ignored() {
    let mut doc = document(&["a", "b"]);
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);

    // Name cell of row 1, header row, right mouse button
    table.handle_event(&mut doc, &down(10, 1));
    table.handle_event(&mut doc, &down(0, 0));
    table.handle_event(
        &mut doc,
        &Event::MouseDown {
            x: 0,
            y: 1,
            button: MouseButton::Right,
        },
    );
    assert_eq!(table.phase(), DragPhase::Idle);
    assert_eq!(doc.listeners().count_for(table.owner()), 2);
}

#[test]
fn test_first_move_hides_table_behind_clone_list() {
    let mut doc = document(&["a", "b", "c"]);
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);

    table.handle_event(&mut doc, &down(0, 1));
    table.handle_event(&mut doc, &mv(0, 1));
    assert_eq!(table.phase(), DragPhase::Dragging);

    let real = doc.get("contributors").unwrap();
    assert_eq!(real.visibility, Visibility::Hidden);
    assert!(real.has_class(HIDE_CLASS));

    let list = doc.get(&table.clone_list_id()).unwrap();
    assert!(list.has_class(CLONE_LIST_CLASS));
    assert_eq!(doc.parent_id(&table.clone_list_id()).as_deref(), Some("root"));

    let items = list.child_elements();
    // Four rows plus the placeholder
    assert_eq!(items.len(), 5);
    assert!(items[1].has_class(DRAGGING_CLASS));
    assert!(items[2].has_class(PLACEHOLDER_CLASS));
    assert_eq!(items[2].height, Size::Fixed(1));

    let clones = table.clone_list().unwrap();
    assert_eq!(clones.placeholder_height(), Some(1));
    assert_eq!(clones.width(), 80);
}

#[test]
fn test_drag_down_two_rows_commits_and_notifies() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut doc = document(&["a", "b", "c", "d"]);
    let mut table = draggable(&notifier);
    table.init(&mut doc);

    table.handle_event(&mut doc, &down(0, 1));
    table.handle_event(&mut doc, &mv(0, 3));
    table.handle_event(&mut doc, &mv(0, 4));
    let reorder = table.handle_event(&mut doc, &up(0, 4)).unwrap();

    assert_eq!((reorder.from, reorder.to), (1, 3));
    assert_eq!(
        row_ids(&doc, "contributors"),
        [
            "contributors-head",
            "contributors-b",
            "contributors-c",
            "contributors-a",
            "contributors-d"
        ]
    );

    let changes = notifier.changes();
    assert_eq!(changes.len(), 1);
    let change = &changes[0];
    assert_eq!(change.url, "/publication/7/contributors/order/0/2");
    assert_eq!((change.start, change.end), (0, 2));
    assert_eq!(change.target, "#contributors");
    assert_eq!(change.method.as_str(), "PUT");
    assert_eq!(reorder.change.as_ref(), Some(change));

    let b = change.payload.find("id=\"contributors-b\"").unwrap();
    let a = change.payload.find("id=\"contributors-a\"").unwrap();
    assert!(b < a);
    assert!(!change.payload.contains("contributors-head"));
}

#[test]
fn test_drop_restores_document() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut doc = document(&["a", "b", "c"]);
    let mut table = draggable(&notifier);
    table.init(&mut doc);

    table.handle_event(&mut doc, &down(0, 1));
    table.handle_event(&mut doc, &mv(0, 3));
    table.handle_event(&mut doc, &up(0, 3));

    assert_eq!(table.phase(), DragPhase::Idle);
    assert!(doc.get(&table.clone_list_id()).is_none());
    assert!(doc.query(".clone-list").is_none());
    let real = doc.get("contributors").unwrap();
    assert_eq!(real.visibility, Visibility::Visible);
    assert!(!real.has_class(HIDE_CLASS));

    // Only the handle listeners are left
    assert!(!doc.listens_on_document(EventKind::MouseMove, table.owner()));
    assert!(!doc.listens_on_document(EventKind::MouseUp, table.owner()));
    assert_eq!(doc.listeners().count_for(table.owner()), 3);
}

#[test]
fn test_drag_up_swaps_above_previous_row() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut doc = document(&["r1", "r2", "r3"]);
    let mut table = draggable(&notifier);
    table.init(&mut doc);

    table.handle_event(&mut doc, &down(0, 3));
    table.handle_event(&mut doc, &mv(0, 1));
    let reorder = table.handle_event(&mut doc, &up(0, 1)).unwrap();

    assert_eq!((reorder.from, reorder.to), (3, 2));
    assert_eq!(
        row_ids(&doc, "contributors"),
        [
            "contributors-head",
            "contributors-r1",
            "contributors-r3",
            "contributors-r2"
        ]
    );
    assert_eq!(notifier.changes()[0].url, "/publication/7/contributors/order/2/1");
}

#[test]
fn test_first_row_never_passes_header() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut doc = Document::new(
        Element::div()
            .id("root")
            .child(Element::div().id("toolbar").height(Size::Fixed(5)))
            .child(table("contributors", &["r1", "r2"])),
    );
    let mut table = draggable(&notifier);
    table.init(&mut doc);

    // Row 1 sits at y = 6; move it well above the header
    table.handle_event(&mut doc, &down(0, 6));
    for y in (0..6).rev() {
        table.handle_event(&mut doc, &mv(0, y));
    }
    let reorder = table.handle_event(&mut doc, &up(0, 0)).unwrap();

    assert!(reorder.is_noop());
    assert_eq!(
        row_ids(&doc, "contributors"),
        ["contributors-head", "contributors-r1", "contributors-r2"]
    );
    // Still reported, with equal positions
    let change = &notifier.changes()[0];
    assert_eq!((change.start, change.end), (0, 0));
}

#[test]
fn test_release_without_move_does_nothing() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut doc = document(&["a", "b"]);
    let before = doc.root().clone();
    let mut table = draggable(&notifier);
    table.init(&mut doc);

    table.handle_event(&mut doc, &down(0, 1));
    assert_eq!(table.handle_event(&mut doc, &up(0, 1)), None);

    assert_eq!(table.phase(), DragPhase::Idle);
    assert!(notifier.changes().is_empty());
    assert!(!doc.listens_on_document(EventKind::MouseUp, table.owner()));
    assert_eq!(
        row_ids(&doc, "contributors"),
        before
            .child_elements()[0]
            .child_elements()
            .iter()
            .map(|row| row.id.clone())
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_second_press_during_session_is_ignored() {
    let mut doc = document(&["a", "b", "c"]);
    let mut table = DraggableTable::new("#contributors", None);
    table.init(&mut doc);

    table.handle_event(&mut doc, &down(0, 1));
    table.handle_event(&mut doc, &mv(0, 1));
    table.handle_event(&mut doc, &down(0, 3));
    let reorder = table.handle_event(&mut doc, &up(0, 1)).unwrap();
    assert_eq!(reorder.from, 1);
}

#[test]
fn test_without_callback_nothing_is_sent() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut doc = document(&["a", "b"]);
    let mut table = DraggableTable::new("#contributors", None).with_notifier(notifier.clone());
    table.init(&mut doc);

    table.handle_event(&mut doc, &down(0, 1));
    table.handle_event(&mut doc, &mv(0, 3));
    let reorder = table.handle_event(&mut doc, &up(0, 3)).unwrap();

    assert_eq!(reorder.to, 2);
    assert_eq!(reorder.change, None);
    assert!(notifier.changes().is_empty());
}

#[test]
fn test_reset_aborts_session_without_committing() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut doc = document(&["a", "b", "c"]);
    let mut table = draggable(&notifier);
    table.init(&mut doc);

    table.handle_event(&mut doc, &down(0, 1));
    table.handle_event(&mut doc, &mv(0, 3));
    table.reset(&mut doc);

    assert_eq!(table.phase(), DragPhase::Idle);
    assert!(doc.get(&table.clone_list_id()).is_none());
    assert_eq!(doc.get("contributors").unwrap().visibility, Visibility::Visible);
    assert_eq!(
        row_ids(&doc, "contributors"),
        [
            "contributors-head",
            "contributors-a",
            "contributors-b",
            "contributors-c"
        ]
    );
    assert!(doc.listeners().is_empty());
    assert!(notifier.changes().is_empty());
}

// ============================================================================
// Several tables
// ============================================================================

#[test]
fn test_instances_only_react_to_their_own_handles() {
    let mut doc = Document::new(
        Element::div()
            .id("root")
            .child(table("first", &["a", "b"]))
            .child(table("second", &["x", "y"])),
    );
    let mut first = DraggableTable::new("#first", None);
    let mut second = DraggableTable::new("#second", None);
    first.init(&mut doc);
    second.init(&mut doc);

    // Row "y" of the second table: rows of the first take y = 0..=2
    for event in [down(0, 5), mv(0, 3)] {
        first.handle_event(&mut doc, &event);
        second.handle_event(&mut doc, &event);
    }
    assert_eq!(first.phase(), DragPhase::Idle);
    assert_eq!(second.phase(), DragPhase::Dragging);

    let release = up(0, 3);
    assert_eq!(first.handle_event(&mut doc, &release), None);
    let reorder = second.handle_event(&mut doc, &release).unwrap();

    assert_eq!((reorder.from, reorder.to), (2, 1));
    assert_eq!(row_ids(&doc, "first"), ["first-head", "first-a", "first-b"]);
    assert_eq!(row_ids(&doc, "second"), ["second-head", "second-y", "second-x"]);
}
