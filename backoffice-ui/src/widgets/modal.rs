//! Modal stacking.
//!
//! One primary modal plus at most one secondary modal on top of it. Close
//! buttons are recognised by class; certain application events also close
//! whatever is open.

pub const MODAL_CLOSE_CLASS: &str = "modal-close";
pub const MODAL_CLOSE_SECONDARY_CLASS: &str = "modal-close-secondary";

/// Application events that close the open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    ItemCreated,
    ItemUpdated,
    ItemRemoved,
    PublicationCreated,
    DatasetCreated,
    ContributorsUpdated,
    AbstractsUpdated,
    LinksUpdated,
    ProjectsUpdated,
    LaySummariesUpdated,
    FileUpdated,
}

impl AppEvent {
    pub const ALL: [AppEvent; 11] = [
        AppEvent::ItemCreated,
        AppEvent::ItemUpdated,
        AppEvent::ItemRemoved,
        AppEvent::PublicationCreated,
        AppEvent::DatasetCreated,
        AppEvent::ContributorsUpdated,
        AppEvent::AbstractsUpdated,
        AppEvent::LinksUpdated,
        AppEvent::ProjectsUpdated,
        AppEvent::LaySummariesUpdated,
        AppEvent::FileUpdated,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AppEvent::ItemCreated => "ItemCreated",
            AppEvent::ItemUpdated => "ItemUpdated",
            AppEvent::ItemRemoved => "ItemRemoved",
            AppEvent::PublicationCreated => "PublicationCreated",
            AppEvent::DatasetCreated => "DatasetCreated",
            AppEvent::ContributorsUpdated => "ContributorsUpdated",
            AppEvent::AbstractsUpdated => "AbstractsUpdated",
            AppEvent::LinksUpdated => "LinksUpdated",
            AppEvent::ProjectsUpdated => "ProjectsUpdated",
            AppEvent::LaySummariesUpdated => "LaySummariesUpdated",
            AppEvent::FileUpdated => "FileUpdated",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalLayer {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalManager {
    primary: Option<String>,
    secondary: Option<String>,
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a modal. A primary modal replaces any open modals; a
    /// secondary one needs a primary underneath and replaces the previous
    /// secondary.
    pub fn open(&mut self, layer: ModalLayer, name: impl Into<String>) -> bool {
        match layer {
            ModalLayer::Primary => {
                self.primary = Some(name.into());
                self.secondary = None;
            }
            ModalLayer::Secondary => {
                if self.primary.is_none() {
                    return false;
                }
                self.secondary = Some(name.into());
            }
        }
        true
    }

    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.primary.is_some()
    }

    /// Topmost open modal.
    pub fn top(&self) -> Option<(ModalLayer, &str)> {
        match (&self.primary, &self.secondary) {
            (_, Some(s)) => Some((ModalLayer::Secondary, s)),
            (Some(p), None) => Some((ModalLayer::Primary, p)),
            (None, None) => None,
        }
    }

    pub fn close_secondary(&mut self) -> bool {
        self.secondary.take().is_some()
    }

    pub fn close_all(&mut self) -> bool {
        let was_open = self.is_open();
        self.primary = None;
        self.secondary = None;
        was_open
    }

    /// React to a click on an element with `classes`. Returns whether anything closed.
    pub fn handle_click<'a>(&mut self, classes: impl IntoIterator<Item = &'a str>) -> bool {
        let mut closed = false;
        for class in classes {
            match class {
                MODAL_CLOSE_SECONDARY_CLASS => closed |= self.close_secondary(),
                MODAL_CLOSE_CLASS => closed |= self.close_all(),
                _ => {}
            }
        }
        closed
    }

    /// React to a named application event. Unknown names are ignored.
    pub fn handle_app_event(&mut self, name: &str) -> bool {
        match AppEvent::from_name(name) {
            Some(event) => {
                log::debug!("closing modals on {}", event.name());
                self.close_all()
            }
            None => false,
        }
    }
}
