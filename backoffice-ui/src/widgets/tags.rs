//! Tag editor.
//!
//! Seeded from a JSON array of strings (the content of a hidden textarea)
//! and mirrored into hidden `field[i]` inputs after every change, so the
//! enclosing form submits the current list.

use tabledom::Element;

use crate::error::TagError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEditor {
    field: String,
    tags: Vec<String>,
}

impl TagEditor {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            tags: Vec::new(),
        }
    }

    /// Seed from a JSON array such as `["climate", "soil"]`. Empty input means no tags.
    pub fn from_json(field: impl Into<String>, json: &str) -> Result<Self, TagError> {
        let mut editor = Self::new(field);
        if !json.trim().is_empty() {
            let values: Vec<String> = serde_json::from_str(json)?;
            editor.set(values);
        }
        Ok(editor)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Add a tag. Blank and duplicate tags are ignored; returns whether it was added.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag.trim());
        self.tags.len() != before
    }

    /// Replace all tags, applying the same rules as [`add`](Self::add).
    pub fn set(&mut self, tags: impl IntoIterator<Item = String>) {
        self.tags.clear();
        for tag in tags {
            self.add(&tag);
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.tags.clone()).to_string()
    }

    /// One hidden input per tag, named `field[0]`, `field[1]`, ...
    pub fn hidden_inputs(&self) -> Vec<Element> {
        self.tags
            .iter()
            .enumerate()
            .map(|(i, tag)| Element::hidden_input(format!("{}[{i}]", self.field), tag.as_str()))
            .collect()
    }

    /// Container holding the current hidden inputs.
    pub fn element(&self, id: &str) -> Element {
        Element::div()
            .id(id)
            .class("tags-inputs")
            .children(self.hidden_inputs())
    }
}
