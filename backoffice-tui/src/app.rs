//! The contributor list screen.

use std::sync::Arc;
use std::time::{Duration, Instant};

use backoffice_ui::{
    DragPhase, DraggableTable, NotifyOutcome, OrderChange, OrderNotifier, SettingsProvider,
    SidebarState, Toast, ToastStack,
};
use tabledom::{
    Color, Direction, Document, Element, Event, Key, Selector, Size, Style, Terminal, Visibility,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::{Config, Contributor};
use crate::error::AppError;

const HANDLE_GLYPH: &str = "⠿";
const SIDEBAR_WIDTH: u16 = 28;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Where committed moves go and where their outcomes come back.
pub struct Delivery {
    pub notifier: Arc<dyn OrderNotifier>,
    pub outcomes: UnboundedReceiver<NotifyOutcome>,
}

/// Identifies a change in flight: `(start, end, url)`.
type ChangeKey = (usize, usize, String);

fn change_key(change: &OrderChange) -> ChangeKey {
    (change.start, change.end, change.url.clone())
}

pub struct App {
    doc: Document,
    table: DraggableTable,
    /// Contributor order as last confirmed by the server.
    rows: Vec<Contributor>,
    /// The table shows something other than `rows` and must be rebuilt once idle.
    stale: bool,
    toasts: ToastStack,
    /// Loading toasts of changes still in flight.
    pending: Vec<(ChangeKey, u64)>,
    sidebar: SidebarState,
    settings: SettingsProvider,
    outcomes: Option<UnboundedReceiver<NotifyOutcome>>,
    server: Option<String>,
    running: bool,
}

impl App {
    pub fn new(
        config: &Config,
        settings: SettingsProvider,
        delivery: Option<Delivery>,
    ) -> Result<Self, AppError> {
        let sidebar = SidebarState::load(&settings)?;
        let mut table = DraggableTable::new(config.table.as_str(), Some(config.callback_template()?));
        let outcomes = match delivery {
            Some(delivery) => {
                table = table.with_notifier(delivery.notifier);
                Some(delivery.outcomes)
            }
            None => None,
        };

        let mut doc = Document::new(screen(config, sidebar.is_open()));
        table.init(&mut doc);

        Ok(Self {
            doc,
            table,
            rows: config.rows.clone(),
            stale: false,
            toasts: ToastStack::new(),
            pending: Vec::new(),
            sidebar,
            settings,
            outcomes,
            server: config.base_url.clone(),
            running: true,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn sidebar(&self) -> SidebarState {
        self.sidebar
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Draw and process input until the user quits.
    pub fn run(&mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        while self.running {
            terminal.render(&mut self.doc)?;
            for raw in terminal.poll(POLL_INTERVAL)? {
                if let Some(event) = Event::from_crossterm(raw) {
                    self.handle(&event, Instant::now());
                }
            }
            self.tick(Instant::now());
        }
        Ok(())
    }

    pub fn handle(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key {
                key: Key::Char('q'),
                ..
            } => self.running = false,
            Event::Key {
                key: Key::Char('c'),
                modifiers,
            } if modifiers.ctrl => self.running = false,
            Event::Key {
                key: Key::Char('b'),
                modifiers,
            } if modifiers.none() => self.toggle_sidebar(now),
            Event::MouseDown { .. } | Event::MouseMove { .. } | Event::MouseUp { .. } => {
                let Some(reorder) = self.table.handle_event(&mut self.doc, event) else {
                    return;
                };
                let moved = self
                    .doc
                    .query(self.table.selector())
                    .and_then(|table| table.child_elements().get(reorder.to))
                    .map(|row| row.text_content())
                    .unwrap_or_default();
                log::info!("moved '{}' from {} to {}", moved.trim(), reorder.from, reorder.to);

                match (&reorder.change, self.outcomes.is_some()) {
                    (Some(change), true) => {
                        let id = self.toasts.push(
                            Toast::info(format!(
                                "Saving move {} → {}",
                                change.start + 1,
                                change.end + 1
                            ))
                            .loading(true)
                            .auto_hide(None),
                            now,
                        );
                        self.pending.push((change_key(change), id));
                        self.refresh_toasts();
                    }
                    _ => {
                        // Nothing will confirm it, so the local order is the order
                        move_row(&mut self.rows, reorder.from - 1, reorder.to - 1);
                        log::info!("not sent, no server configured");
                    }
                }
            }
            _ => {}
        }
    }

    /// Collect delivery outcomes, bring the table in line with the
    /// confirmed order, and expire old toasts.
    pub fn tick(&mut self, now: Instant) {
        let mut outcomes = Vec::new();
        if let Some(rx) = self.outcomes.as_mut() {
            while let Ok(outcome) = rx.try_recv() {
                outcomes.push(outcome);
            }
        }

        let mut changed = !outcomes.is_empty();
        for outcome in outcomes {
            let key = change_key(outcome.change());
            if let Some(pos) = self.pending.iter().position(|(k, _)| *k == key) {
                let (_, id) = self.pending.remove(pos);
                self.toasts.dismiss(id);
            }
            if let NotifyOutcome::Applied { change, fragment } = &outcome {
                log::debug!("server confirmed {} ({} bytes)", change.url, fragment.len());
                move_row(&mut self.rows, change.start, change.end);
            }
            // Rejected moves are rolled back as well
            self.stale = true;
            self.toasts.push(outcome_toast(&outcome), now);
        }

        if self.stale && self.table.phase() == DragPhase::Idle {
            self.sync_table();
        }

        changed |= self.toasts.tick(now) > 0;
        if changed {
            self.refresh_toasts();
        }
    }

    /// Replace the table with one built from the confirmed order.
    fn sync_table(&mut self) {
        self.table.reset(&mut self.doc);
        let selector = self.table.selector().to_string();
        if let Some(table) = self
            .doc
            .query_id(&selector)
            .and_then(|id| self.doc.get_mut(&id))
        {
            *table = contributor_table(&selector, &self.rows);
        }
        self.table.init(&mut self.doc);
        self.stale = false;
    }

    /// Flip the sidebar. A failed save is reported but the session goes on.
    fn toggle_sidebar(&mut self, now: Instant) {
        let open = self.sidebar.toggle();
        if let Some(element) = self.doc.get_mut("sidebar") {
            *element = sidebar(open, self.server.as_deref());
        }
        log::debug!("sidebar {}", if open { "opened" } else { "closed" });

        if let Err(e) = self.sidebar.save(&self.settings) {
            log::warn!("could not save sidebar state: {e}");
            self.toasts
                .push(Toast::warning("Sidebar state could not be saved"), now);
            self.refresh_toasts();
        }
    }

    fn refresh_toasts(&mut self) {
        if let Some(element) = self.doc.get_mut("toasts") {
            *element = self.toasts.element("toasts");
        }
    }
}

fn move_row(rows: &mut Vec<Contributor>, from: usize, to: usize) {
    if from < rows.len() && to < rows.len() {
        let row = rows.remove(from);
        rows.insert(to, row);
    }
}

fn outcome_toast(outcome: &NotifyOutcome) -> Toast {
    match outcome {
        NotifyOutcome::Applied { change, .. } => Toast::success(format!(
            "Contributor moved from position {} to {}",
            change.start + 1,
            change.end + 1
        )),
        NotifyOutcome::Conflict { message, .. } => {
            Toast::error(message.as_str()).auto_hide(None).template("conflict")
        }
        NotifyOutcome::Failed { error, .. } => {
            Toast::error(format!("Could not save the new order: {error}"))
        }
    }
}

fn screen(config: &Config, sidebar_open: bool) -> Element {
    let muted = Style::new().foreground(Color::oklch(0.6, 0.0, 0.0));
    Element::div()
        .id("root")
        .child(
            Element::text("Contributors")
                .id("header")
                .style(Style::new().bold().foreground(Color::oklch(0.8, 0.12, 250.0))),
        )
        .child(Element::text("Drag ⠿ to reorder · b sidebar · q quit").style(muted))
        .child(
            Element::div()
                .id("body")
                .direction(Direction::Row)
                .gap(2)
                .child(
                    Element::div()
                        .id("main")
                        .child(contributor_table(&config.table, &config.rows)),
                )
                .child(sidebar(sidebar_open, config.base_url.as_deref())),
        )
        .child(Element::div().id("toasts"))
}

fn contributor_table(selector: &str, rows: &[Contributor]) -> Element {
    let mut table = Element::table().id("contributors");
    match Selector::parse(selector) {
        Selector::Id(id) => table = table.id(id),
        Selector::Class(class) => table = table.class(class),
        Selector::Tag(_) => {}
    }
    let header = Style::new().bold().underline();
    table = table.child(
        Element::tr()
            .id("contributors-head")
            .child(Element::th("").width(Size::Fixed(2)))
            .child(Element::th("Name").style(header))
            .child(Element::th("Role").style(header)),
    );
    for (i, row) in rows.iter().enumerate() {
        table = table.child(
            Element::tr()
                .id(format!("contributor-{i}"))
                .child(
                    Element::td(HANDLE_GLYPH)
                        .id(format!("contributor-{i}-handle"))
                        .width(Size::Fixed(2)),
                )
                .child(Element::td(row.name.as_str()))
                .child(Element::td(row.role.as_str())),
        );
    }
    table
}

fn sidebar(open: bool, server: Option<&str>) -> Element {
    let sidebar = Element::div().id("sidebar");
    if !open {
        return sidebar.width(Size::Fixed(0)).visibility(Visibility::Hidden);
    }
    sidebar
        .width(Size::Fixed(SIDEBAR_WIDTH))
        .child(Element::text("Keys").style(Style::new().bold()))
        .child(Element::text("⠿ drag   reorder"))
        .child(Element::text("b        sidebar"))
        .child(Element::text("q        quit"))
        .child(Element::text(match server {
            Some(url) => format!("Server: {url}"),
            None => "Server: offline".to_string(),
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    use backoffice_ui::JsonFileBackend;
    use tabledom::{Modifiers, MouseButton};
    use tokio::sync::mpsc::{self, UnboundedSender};

    #[derive(Clone, Copy)]
    enum Reply {
        Applied,
        Conflict,
        Failed,
        /// Keep the change; the test answers it.
        Hold,
    }

    struct Server {
        outcomes: UnboundedSender<NotifyOutcome>,
        reply: Reply,
        held: Mutex<Vec<OrderChange>>,
    }

    impl Server {
        fn fail(&self, change: OrderChange) {
            let error = "HTTP 500".to_string();
            self.outcomes.send(NotifyOutcome::Failed { change, error }).unwrap();
        }
    }

    impl OrderNotifier for Server {
        fn notify(&self, change: OrderChange) {
            let outcome = match self.reply {
                Reply::Applied => NotifyOutcome::Applied {
                    change,
                    fragment: String::new(),
                },
                Reply::Conflict => NotifyOutcome::Conflict {
                    change,
                    message: "modified by another user, please reload".to_string(),
                },
                Reply::Failed => NotifyOutcome::Failed {
                    change,
                    error: "HTTP 500".to_string(),
                },
                Reply::Hold => {
                    self.held.lock().unwrap().push(change);
                    return;
                }
            };
            self.outcomes.send(outcome).unwrap();
        }
    }

    fn app_with(reply: Reply) -> (App, Arc<Server>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let server = Arc::new(Server {
            outcomes: tx,
            reply,
            held: Mutex::new(Vec::new()),
        });
        let delivery = Delivery {
            notifier: server.clone(),
            outcomes: rx,
        };
        let app = App::new(&Config::default(), SettingsProvider::in_memory(), Some(delivery)).unwrap();
        (app, server)
    }

    fn app(reply: Reply) -> App {
        app_with(reply).0
    }

    fn key(c: char, modifiers: Modifiers) -> Event {
        Event::Key {
            key: Key::Char(c),
            modifiers,
        }
    }

    /// Press the handle on line `from`, drag to line `to` and release.
    /// The table header sits on line 2, so row `i` is on line `2 + i`.
    fn drag(app: &mut App, from: u16, to: u16, now: Instant) {
        let button = MouseButton::Left;
        app.handle(&Event::MouseDown { x: 0, y: from, button }, now);
        app.handle(&Event::MouseMove { x: 0, y: to }, now);
        app.handle(&Event::MouseUp { x: 0, y: to, button }, now);
    }

    /// Drag the first contributor down by one row.
    fn drag_first_down(app: &mut App, now: Instant) {
        drag(app, 3, 5, now);
    }

    fn messages(app: &App) -> Vec<String> {
        app.toasts().toasts().map(|(_, t)| t.message.clone()).collect()
    }

    fn names(app: &App) -> Vec<String> {
        app.document()
            .get("contributors")
            .unwrap()
            .child_elements()
            .iter()
            .skip(1)
            .map(|row| row.child_elements()[1].text_content())
            .collect()
    }

    #[test]
    fn quit_keys() {
        let mut a = app(Reply::Applied);
        a.handle(&key('c', Modifiers::default()), Instant::now());
        assert!(a.is_running());
        a.handle(&key('c', Modifiers::ctrl()), Instant::now());
        assert!(!a.is_running());

        let mut a = app(Reply::Applied);
        a.handle(&key('q', Modifiers::default()), Instant::now());
        assert!(!a.is_running());
    }

    #[test]
    fn sidebar_toggle_is_persisted() {
        let settings = SettingsProvider::in_memory();
        let mut a = App::new(&Config::default(), settings.clone(), None).unwrap();
        assert!(a.sidebar().is_open());

        a.handle(&key('b', Modifiers::default()), Instant::now());
        assert!(!a.sidebar().is_open());
        assert!(a.document().get("sidebar").unwrap().is_hidden());
        assert!(!SidebarState::load(&settings).unwrap().is_open());
    }

    #[test]
    fn sidebar_toggle_survives_failed_save() {
        let dir = std::env::temp_dir().join(format!("backoffice-tui-sidebar-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let backend = JsonFileBackend::open(dir.join("state").join("ui-state.json")).unwrap();
        // A file where the state directory should go
        fs::write(dir.join("state"), "").unwrap();

        let settings = SettingsProvider::new(backend);
        let mut a = App::new(&Config::default(), settings, None).unwrap();
        a.handle(&key('b', Modifiers::default()), Instant::now());

        assert!(a.is_running());
        assert!(!a.sidebar().is_open());
        assert!(a.document().get("sidebar").unwrap().is_hidden());
        assert_eq!(messages(&a), ["Sidebar state could not be saved"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn reorder_shows_success_toast() {
        let mut a = app(Reply::Applied);
        let now = Instant::now();
        drag_first_down(&mut a, now);
        assert_eq!(messages(&a), ["Saving move 1 → 2"]);

        a.tick(now);
        assert_eq!(messages(&a), ["Contributor moved from position 1 to 2"]);
        assert_eq!(
            names(&a),
            ["Charles Babbage", "Ada Lovelace", "Mary Somerville", "Augustus De Morgan"]
        );
    }

    #[test]
    fn confirmed_table_is_rebuilt_and_stays_draggable() {
        let mut a = app(Reply::Applied);
        let now = Instant::now();
        drag_first_down(&mut a, now);
        a.tick(now);

        let rows: Vec<_> = a
            .document()
            .get("contributors")
            .unwrap()
            .child_elements()
            .iter()
            .map(|row| row.id.clone())
            .collect();
        assert_eq!(
            rows,
            ["contributors-head", "contributor-0", "contributor-1", "contributor-2", "contributor-3"]
        );

        // The rebuilt table takes a second drag
        drag_first_down(&mut a, now);
        a.tick(now);
        assert_eq!(
            names(&a),
            ["Ada Lovelace", "Charles Babbage", "Mary Somerville", "Augustus De Morgan"]
        );
        assert_eq!(a.toasts().len(), 2);
    }

    #[test]
    fn rejected_move_is_rolled_back() {
        let mut a = app(Reply::Failed);
        let now = Instant::now();
        drag_first_down(&mut a, now);
        assert_eq!(names(&a)[0], "Charles Babbage");

        a.tick(now);
        assert_eq!(
            names(&a),
            ["Ada Lovelace", "Charles Babbage", "Mary Somerville", "Augustus De Morgan"]
        );
        assert_eq!(messages(&a), ["Could not save the new order: HTTP 500"]);
    }

    #[test]
    fn outcomes_clear_their_own_loading_toast() {
        let (mut a, server) = app_with(Reply::Hold);
        let now = Instant::now();
        drag_first_down(&mut a, now);
        // The first contributor now sits on line 4
        drag(&mut a, 4, 6, now);
        assert_eq!(messages(&a), ["Saving move 1 → 2", "Saving move 2 → 3"]);

        // The second change finishes first
        let second = server.held.lock().unwrap()[1].clone();
        server.fail(second);
        a.tick(now);

        assert_eq!(
            messages(&a),
            ["Saving move 1 → 2", "Could not save the new order: HTTP 500"]
        );
    }

    #[test]
    fn conflict_toast_stays_until_dismissed() {
        let mut a = app(Reply::Conflict);
        let now = Instant::now();
        drag_first_down(&mut a, now);
        a.tick(now);
        a.tick(now + Duration::from_secs(60));

        let toasts: Vec<_> = a.toasts().toasts().map(|(_, t)| t.clone()).collect();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].message.contains("reload"));
        assert_eq!(toasts[0].template.as_deref(), Some("conflict"));
    }

    #[test]
    fn offline_moves_are_not_announced() {
        let mut a = App::new(&Config::default(), SettingsProvider::in_memory(), None).unwrap();
        drag_first_down(&mut a, Instant::now());
        a.tick(Instant::now());
        assert!(a.toasts().is_empty());
        assert_eq!(names(&a)[0], "Charles Babbage");
    }
}
