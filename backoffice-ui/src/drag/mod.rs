//! Mouse reordering of table rows.
//!
//! A [`DraggableTable`] manages one table in a [`Document`]. Every row but
//! the header gets its first cell marked as a drag handle. Pressing a
//! handle arms a session, the first move hides the table behind a
//! free-floating [`CloneList`], and releasing commits the final order back
//! into the real rows and reports it.
//!
//! The application feeds pointer events through [`DraggableTable::handle_event`];
//! the table only reacts to events reaching listeners it registered itself.

mod clone_list;
mod session;

use std::sync::Arc;

use tabledom::{
    Document, Element, Event, EventKind, ListenerOwner, ListenerTarget, MouseButton, Position,
    Visibility,
};

pub use clone_list::{
    CLONE_LIST_CLASS, CLONE_TABLE_CLASS, CloneList, CloneRow, DRAGGABLE_CLASS, DRAGGING_CLASS,
    DropResult, PLACEHOLDER_CLASS, Span, Swap,
};
pub use session::DragPhase;

use crate::notify::{OrderChange, OrderNotifier};
use crate::template::CallbackTemplate;
use session::DragSession;

/// Class marking a row's drag handle.
pub const HANDLE_CLASS: &str = "draggable-handle";
/// Class added to the real table while it is hidden behind the clone list.
pub const HIDE_CLASS: &str = "hide";

/// A committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reorder {
    /// Index of the moved row before the drag, header included.
    pub from: usize,
    /// Index of the moved row after the drag, header included.
    pub to: usize,
    /// The notification built from the callback template, if one is configured.
    pub change: Option<OrderChange>,
}

impl Reorder {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

pub struct DraggableTable {
    selector: String,
    callback: Option<CallbackTemplate>,
    notifier: Option<Arc<dyn OrderNotifier>>,
    owner: ListenerOwner,
    /// IDs of the cells currently carrying our pointer-down listener.
    handles: Vec<String>,
    session: Option<DragSession>,
}

impl DraggableTable {
    /// Manage the table matching `selector` (`#id`, `.class` or a tag name).
    ///
    /// Nothing is looked up until [`init`](Self::init).
    pub fn new(selector: impl Into<String>, callback: Option<CallbackTemplate>) -> Self {
        Self {
            selector: selector.into(),
            callback,
            notifier: None,
            owner: ListenerOwner::new(),
            handles: Vec::new(),
            session: None,
        }
    }

    /// Send committed moves to `notifier`. Requires a callback template to have any effect.
    pub fn with_notifier(mut self, notifier: Arc<dyn OrderNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn callback(&self) -> Option<&CallbackTemplate> {
        self.callback.as_ref()
    }

    pub fn owner(&self) -> ListenerOwner {
        self.owner
    }

    pub fn phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map_or(DragPhase::Idle, DragSession::phase)
    }

    /// The live clone list, while dragging.
    pub fn clone_list(&self) -> Option<&CloneList> {
        self.session.as_ref()?.clones.as_ref()
    }

    /// ID of the clone list element while it is in the document.
    pub fn clone_list_id(&self) -> String {
        format!("{}-clone-list", self.owner)
    }

    /// Mark the first cell of every non-header row as a drag handle and
    /// listen for presses on it. Safe to call repeatedly.
    pub fn init(&mut self, doc: &mut Document) {
        let Some(table_id) = doc.query_id(&self.selector) else {
            log::debug!("[drag] no table matches {}, skipping init", self.selector);
            return;
        };
        let handles = doc.get(&table_id).map(handle_ids).unwrap_or_default();

        for id in &handles {
            if let Some(cell) = doc.get_mut(id) {
                cell.add_class(HANDLE_CLASS);
            }
            doc.listeners_mut().attach(
                ListenerTarget::Element(id.clone()),
                EventKind::MouseDown,
                self.owner,
            );
            if !self.handles.contains(id) {
                self.handles.push(id.clone());
            }
        }

        log::debug!(
            "[drag] {} handle(s) attached on {}",
            handles.len(),
            self.selector
        );
    }

    /// Remove handle listeners and markers, e.g. before the table is
    /// replaced by new server content. Any drag in progress is abandoned
    /// without changing the row order.
    pub fn reset(&mut self, doc: &mut Document) {
        self.abort(doc);

        let mut ids = std::mem::take(&mut self.handles);
        match doc.query_id(&self.selector) {
            Some(table_id) => {
                for id in doc.get(&table_id).map(handle_ids).unwrap_or_default() {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
            None => log::debug!("[drag] no table matches {} on reset", self.selector),
        }

        for id in ids {
            if let Some(cell) = doc.get_mut(&id) {
                cell.remove_class(HANDLE_CLASS);
            }
        }
        let detached = doc.listeners_mut().detach_owner(self.owner);
        log::debug!("[drag] {detached} listener(s) detached from {}", self.selector);
    }

    /// Feed a pointer event. Returns the committed move on release.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> Option<Reorder> {
        match *event {
            Event::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => {
                self.on_mouse_down(doc, x, y);
                None
            }
            Event::MouseMove { x, y } => {
                self.on_mouse_move(doc, x, y);
                None
            }
            Event::MouseUp { .. } => self.on_mouse_up(doc),
            _ => None,
        }
    }

    fn on_mouse_down(&mut self, doc: &mut Document, x: u16, y: u16) {
        if self.session.is_some() {
            return;
        }
        let Some(handle) = doc.listener_target(x, y, EventKind::MouseDown, self.owner) else {
            return;
        };
        let Some(table_id) = doc.query_id(&self.selector) else {
            return;
        };
        let Some(origin) = doc
            .get(&table_id)
            .and_then(|table| row_of_handle(table, &handle))
        else {
            return;
        };

        self.session = Some(DragSession::armed(origin, (x, y)));
        let listeners = doc.listeners_mut();
        listeners.attach(ListenerTarget::Document, EventKind::MouseMove, self.owner);
        listeners.attach(ListenerTarget::Document, EventKind::MouseUp, self.owner);
        log::debug!("[drag] armed row {origin} of {}", self.selector);
    }

    fn on_mouse_move(&mut self, doc: &mut Document, x: u16, y: u16) {
        if !doc.listens_on_document(EventKind::MouseMove, self.owner) {
            return;
        }
        let list_id = self.clone_list_id();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.clones.is_none() {
            match materialize(doc, &self.selector, &list_id, session.origin) {
                Some((clones, anchor)) => {
                    session.clones = Some(clones);
                    session.anchor = anchor;
                    log::debug!("[drag] dragging row {} of {}", session.origin, self.selector);
                }
                None => {
                    log::debug!("[drag] table {} vanished, dropping session", self.selector);
                    self.abort(doc);
                    return;
                }
            }
        }

        let (dx, dy) = session.advance((x, y));
        let Some(clones) = session.clones.as_mut() else {
            return;
        };
        if let Some(swap) = clones.move_by(dx, dy) {
            log::trace!("[drag] swapped {swap:?}, now at {:?}", clones.dragged_index());
        }
        project(doc, &list_id, clones, session.anchor);
    }

    fn on_mouse_up(&mut self, doc: &mut Document) -> Option<Reorder> {
        if !doc.listens_on_document(EventKind::MouseUp, self.owner) {
            return None;
        }
        detach_document_listeners(doc, self.owner);
        let session = self.session.take()?;

        let Some(clones) = session.clones else {
            log::debug!("[drag] released row {} without moving", session.origin);
            return None;
        };
        let result = clones.finish()?;
        let (from, to) = (session.origin, result.end);

        doc.remove(&self.clone_list_id());
        let table_id = doc.query_id(&self.selector)?;
        let table = doc.get_mut(&table_id)?;
        table.move_child(from, to);
        show(table);
        let body = body_markup(table);

        let change = self.callback.as_ref().map(|callback| {
            OrderChange::put(
                callback.url(from - 1, to - 1),
                self.selector.clone(),
                body,
                from - 1,
                to - 1,
            )
        });
        if let (Some(change), Some(notifier)) = (&change, &self.notifier) {
            notifier.notify(change.clone());
        }

        log::info!("[drag] {}: row {from} moved to {to}", self.selector);
        Some(Reorder { from, to, change })
    }

    /// Drop any session without committing.
    fn abort(&mut self, doc: &mut Document) {
        let Some(session) = self.session.take() else {
            return;
        };
        detach_document_listeners(doc, self.owner);
        if session.clones.is_some() {
            doc.remove(&self.clone_list_id());
            if let Some(table) = doc
                .query_id(&self.selector)
                .and_then(|id| doc.get_mut(&id))
            {
                show(table);
            }
        }
        log::debug!("[drag] aborted session on {}", self.selector);
    }
}

/// First-cell IDs of every row after the header.
fn handle_ids(table: &Element) -> Vec<String> {
    table
        .child_elements()
        .iter()
        .skip(1)
        .filter_map(|row| row.child_elements().first())
        .map(|cell| cell.id.clone())
        .collect()
}

fn row_of_handle(table: &Element, handle: &str) -> Option<usize> {
    table
        .child_elements()
        .iter()
        .position(|row| row.child_elements().first().is_some_and(|c| c.id == handle))
        .filter(|&index| index > 0)
}

/// Copy the table into a clone list, hide it, and put the list in its place.
fn materialize(
    doc: &mut Document,
    selector: &str,
    list_id: &str,
    origin: usize,
) -> Option<(CloneList, (i16, i16))> {
    let table_id = doc.query_id(selector)?;
    let table_rect = doc.rect(&table_id)?;
    let parent_rect = doc
        .parent_id(&table_id)
        .and_then(|parent| doc.rect(&parent))
        .unwrap_or_default();

    let payloads: Vec<Element> = doc.get(&table_id)?.child_elements().to_vec();
    let mut rows = Vec::with_capacity(payloads.len());
    for (index, payload) in payloads.into_iter().enumerate() {
        let height = doc.rect(&payload.id).map_or(1, |r| r.height);
        rows.push(CloneRow::new(index, payload, height));
    }

    let mut clones = CloneList::new(rows, table_rect.width);
    if !clones.start_drag(origin) {
        return None;
    }

    let anchor = (
        offset(table_rect.x, parent_rect.x),
        offset(table_rect.y, parent_rect.y),
    );
    let table = doc.get_mut(&table_id)?;
    table.visibility = Visibility::Hidden;
    table.add_class(HIDE_CLASS);

    doc.insert_before(&table_id, anchored(&clones, list_id, anchor))
        .ok()?;
    Some((clones, anchor))
}

/// Redraw the clone list element from the data model.
fn project(doc: &mut Document, list_id: &str, clones: &CloneList, anchor: (i16, i16)) {
    if let Some(element) = doc.get_mut(list_id) {
        *element = anchored(clones, list_id, anchor);
    }
}

fn anchored(clones: &CloneList, list_id: &str, anchor: (i16, i16)) -> Element {
    clones
        .to_element(list_id)
        .position(Position::Absolute)
        .left(anchor.0)
        .top(anchor.1)
}

fn show(table: &mut Element) {
    table.visibility = Visibility::Visible;
    table.remove_class(HIDE_CLASS);
}

fn body_markup(table: &Element) -> String {
    table
        .child_elements()
        .iter()
        .skip(1)
        .map(Element::to_markup)
        .collect()
}

fn detach_document_listeners(doc: &mut Document, owner: ListenerOwner) {
    let listeners = doc.listeners_mut();
    listeners.detach(&ListenerTarget::Document, EventKind::MouseMove, owner);
    listeners.detach(&ListenerTarget::Document, EventKind::MouseUp, owner);
}

fn offset(child: u16, parent: u16) -> i16 {
    (i32::from(child) - i32::from(parent)).clamp(0, i32::from(i16::MAX)) as i16
}
