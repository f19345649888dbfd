//! Application configuration.
//!
//! Read from `config.json` in the platform config directory. A missing
//! file means defaults; `BACKOFFICE_BASE_URL` overrides the base URL.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use backoffice_ui::CallbackTemplate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const BASE_URL_ENV: &str = "BACKOFFICE_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl Contributor {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

fn default_role() -> String {
    "author".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server the order callbacks are sent to. Without it moves are only logged.
    pub base_url: Option<String>,
    pub callback: String,
    /// Selector of the reorderable table.
    pub table: String,
    pub timeout_secs: u64,
    pub rows: Vec<Contributor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            callback: "/publication/demo/contributors/order/:start/:end".to_string(),
            table: "#contributors".to_string(),
            timeout_secs: 10,
            rows: vec![
                Contributor::new("Ada Lovelace", "author"),
                Contributor::new("Charles Babbage", "author"),
                Contributor::new("Mary Somerville", "editor"),
                Contributor::new("Augustus De Morgan", "supervisor"),
            ],
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => match fs::read_to_string(path) {
                Ok(text) => serde_json::from_str(&text)?,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    log::debug!("no config at {}, using defaults", path.display());
                    Self::default()
                }
                Err(e) => return Err(e.into()),
            },
            None => Self::default(),
        };
        Ok(config.with_base_url_override(std::env::var(BASE_URL_ENV).ok()))
    }

    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = Some(url);
        }
        self
    }

    pub fn callback_template(&self) -> Result<CallbackTemplate, ConfigError> {
        Ok(CallbackTemplate::parse(&self.callback)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
