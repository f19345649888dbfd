use std::time::{Duration, Instant};

use tabledom::{Color, Element, Size, Style};

/// How long toasts stay up unless told otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastLevel {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn color(self) -> Color {
        match self {
            ToastLevel::Success => Color::oklch(0.7, 0.15, 145.0),
            ToastLevel::Info => Color::oklch(0.8, 0.0, 0.0),
            ToastLevel::Warning => Color::oklch(0.75, 0.15, 85.0),
            ToastLevel::Error => Color::oklch(0.65, 0.2, 25.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Info => "info",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        }
    }
}

/// A toast notification.
///
/// Use the level constructors for plain messages and the builder methods
/// to adjust behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    /// Shows a spinner glyph instead of the level marker.
    pub loading: bool,
    pub dismissible: bool,
    /// `None` keeps the toast until it is dismissed.
    pub auto_hide: Option<Duration>,
    /// Name of the template the toast was rendered from, if any.
    pub template: Option<String>,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            loading: false,
            dismissible: true,
            auto_hide: Some(DEFAULT_TOAST_DURATION),
            template: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn auto_hide(mut self, after: Option<Duration>) -> Self {
        self.auto_hide = after;
        self
    }

    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    /// Build the toast's element for rendering.
    pub fn element(&self, id: &str) -> Element {
        let marker = if self.loading { "◌" } else { "●" };
        let mut row = Element::tr()
            .id(id)
            .class("toast")
            .class(format!("toast-{}", self.level.as_str()))
            .style(Style::new().background(Color::oklch(0.2, 0.02, 250.0)))
            .child(Element::text(marker).style(Style::new().foreground(self.level.color())))
            .child(Element::text(self.message.as_str()).width(Size::Fill));
        if self.dismissible {
            row = row.child(Element::text("×").class("toast-close"));
        }
        row
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: u64,
    toast: Toast,
    shown_at: Instant,
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastStack {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast and return its ID.
    pub fn push(&mut self, toast: impl Into<Toast>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            toast: toast.into(),
            shown_at: now,
        });
        id
    }

    /// Remove a dismissible toast.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.id != id || !entry.toast.dismissible);
        self.entries.len() != before
    }

    /// Drop every auto-hide toast whose time is up. Returns how many were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| match entry.toast.auto_hide {
            Some(after) => now.saturating_duration_since(entry.shown_at) < after,
            None => true,
        });
        before - self.entries.len()
    }

    pub fn toasts(&self) -> impl Iterator<Item = (u64, &Toast)> {
        self.entries.iter().map(|entry| (entry.id, &entry.toast))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn element(&self, id: &str) -> Element {
        Element::div().id(id).class("toasts").children(
            self.entries
                .iter()
                .map(|entry| entry.toast.element(&format!("{id}-{}", entry.id))),
        )
    }
}
