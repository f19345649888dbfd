//! Declarative attribute templates.
//!
//! Server-rendered fragments can carry attributes whose value is a
//! `:name` template (for example `data-tmpl-hx-put="/work/:id/lock"`). A
//! binding table maps each template attribute to the attribute it fills
//! in. Bindings are applied once to every freshly inserted subtree; the
//! template attribute is consumed so a second pass changes nothing.

use std::collections::HashMap;

use tabledom::{Content, Element};

use crate::error::TemplateError;
use crate::template::Template;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    template_attr: String,
    target_attr: String,
}

#[derive(Debug, Clone, Default)]
pub struct AttributeBindings {
    bindings: Vec<Binding>,
}

impl AttributeBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `target_attr` from the template found in `template_attr`.
    pub fn bind(mut self, template_attr: impl Into<String>, target_attr: impl Into<String>) -> Self {
        self.bindings.push(Binding {
            template_attr: template_attr.into(),
            target_attr: target_attr.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve every bound template in `root` and its descendants.
    ///
    /// Returns the number of attributes written. Stops at the first
    /// template referring to a variable missing from `vars`; attributes
    /// resolved before that point stay written.
    pub fn apply(
        &self,
        root: &mut Element,
        vars: &HashMap<String, String>,
    ) -> Result<usize, TemplateError> {
        let mut written = 0;
        for binding in &self.bindings {
            let Some(source) = root.attributes.get(&binding.template_attr) else {
                continue;
            };
            let value = Template::parse(source.as_str()).render(vars)?;
            root.attributes.remove(&binding.template_attr);
            root.attributes.insert(binding.target_attr.clone(), value);
            written += 1;
        }

        if let Content::Children(children) = &mut root.content {
            for child in children {
                written += self.apply(child, vars)?;
            }
        }
        Ok(written)
    }
}
