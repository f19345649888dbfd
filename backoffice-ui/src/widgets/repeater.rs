//! Multi-value form field.
//!
//! A list of inputs named `field[0]`, `field[1]`, ... where the last row
//! carries an "add" button and every other row a "delete" button. Indices
//! are kept contiguous from 0 after every change.

use tabledom::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeaterButton {
    Add,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeaterRow {
    pub name: String,
    pub value: String,
    pub button: RepeaterButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRepeater {
    field: String,
    rows: Vec<RepeaterRow>,
}

impl ValueRepeater {
    /// A repeater over `values`, with one empty trailing row when `values` is empty.
    pub fn new(field: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        let field = field.into();
        let mut rows: Vec<RepeaterRow> = values
            .into_iter()
            .map(|value| RepeaterRow {
                name: String::new(),
                value,
                button: RepeaterButton::Delete,
            })
            .collect();
        if rows.is_empty() {
            rows.push(RepeaterRow {
                name: String::new(),
                value: String::new(),
                button: RepeaterButton::Add,
            });
        }
        let mut repeater = Self { field, rows };
        repeater.reindex();
        repeater
    }

    pub fn rows(&self) -> &[RepeaterRow] {
        &self.rows
    }

    pub fn values(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.value.as_str()).collect()
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Handle a click on the add button of row `index`: append an empty
    /// copy of the last row and turn the clicked button into a delete button.
    pub fn add(&mut self, index: usize) -> bool {
        if self.rows.get(index).map(|r| r.button) != Some(RepeaterButton::Add) {
            return false;
        }
        self.rows.push(RepeaterRow {
            name: String::new(),
            value: String::new(),
            button: RepeaterButton::Add,
        });
        self.rows[index].button = RepeaterButton::Delete;
        self.reindex();
        true
    }

    /// Handle a click on the delete button of row `index`.
    pub fn delete(&mut self, index: usize) -> bool {
        if self.rows.get(index).map(|r| r.button) != Some(RepeaterButton::Delete) {
            return false;
        }
        self.rows.remove(index);
        self.reindex();
        true
    }

    fn reindex(&mut self) {
        let last = self.rows.len().saturating_sub(1);
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.name = format!("{}[{i}]", self.field);
            row.button = if i == last {
                RepeaterButton::Add
            } else {
                RepeaterButton::Delete
            };
        }
    }

    pub fn element(&self) -> Element {
        Element::div()
            .class("form-values")
            .children(self.rows.iter().map(|row| {
                let (class, label) = match row.button {
                    RepeaterButton::Add => ("form-value-add", "Add"),
                    RepeaterButton::Delete => ("form-value-delete", "Delete"),
                };
                Element::tr()
                    .class("form-value")
                    .child(
                        Element::new("input")
                            .attr("type", "text")
                            .attr("name", row.name.as_str())
                            .attr("value", row.value.as_str()),
                    )
                    .child(Element::new("button").class(class).child(Element::text(label)))
            }))
    }
}
