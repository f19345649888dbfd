//! Persisted expand/collapse state.

use std::collections::BTreeMap;

use crate::settings::{SettingsError, SettingsProvider};

const COLLAPSIBLE_KEY: &str = "ui.collapsible";
const SIDEBAR_KEY: &str = "ui.sidebar.open";

/// Expanded flags for collapsible sections, keyed by section name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsibleState {
    expanded: BTreeMap<String, bool>,
}

impl CollapsibleState {
    pub fn load(settings: &SettingsProvider) -> Result<Self, SettingsError> {
        Ok(Self {
            expanded: settings.get_or(COLLAPSIBLE_KEY, BTreeMap::new())?,
        })
    }

    pub fn save(&self, settings: &SettingsProvider) -> Result<(), SettingsError> {
        settings.set(COLLAPSIBLE_KEY, &self.expanded)
    }

    /// Sections start expanded.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.get(key).copied().unwrap_or(true)
    }

    pub fn set_expanded(&mut self, key: impl Into<String>, expanded: bool) {
        self.expanded.insert(key.into(), expanded);
    }

    /// Flip a section and return its new state.
    pub fn toggle(&mut self, key: &str) -> bool {
        let expanded = !self.is_expanded(key);
        self.expanded.insert(key.to_string(), expanded);
        expanded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarState {
    open: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { open: true }
    }
}

impl SidebarState {
    pub fn load(settings: &SettingsProvider) -> Result<Self, SettingsError> {
        Ok(Self {
            open: settings.get_or(SIDEBAR_KEY, true)?,
        })
    }

    pub fn save(&self, settings: &SettingsProvider) -> Result<(), SettingsError> {
        settings.set(SIDEBAR_KEY, &self.open)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}
