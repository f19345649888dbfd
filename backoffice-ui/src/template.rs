//! `:name` placeholder templates.
//!
//! Placeholders are a colon followed by an identifier (`:start`, `:id`).
//! A colon followed by anything else is literal text, so ports and schemes
//! in URLs (`http://host:8080`) pass through untouched.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::TemplateError;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Var(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(&source) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Literal(source[last..whole.start()].to_string()));
            }
            segments.push(Segment::Var(name.as_str().to_string()));
            last = whole.end();
        }
        if last < source.len() {
            segments.push(Segment::Literal(source[last..].to_string()));
        }
        Self { source, segments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of appearance, with repeats.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Var(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders().any(|p| p == name)
    }

    /// Substitute every placeholder. Fails on the first unbound one.
    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Var(name) => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| TemplateError::Unbound(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Remote order-notification target, e.g. `/publication/42/contributors/order/:start/:end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackTemplate {
    template: Template,
}

impl CallbackTemplate {
    pub const START: &'static str = "start";
    pub const END: &'static str = "end";

    /// Parse a callback template. Both `:start` and `:end` must be present.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let template = Template::parse(source);
        for name in [Self::START, Self::END] {
            if !template.has_placeholder(name) {
                return Err(TemplateError::MissingPlaceholder {
                    template: source.to_string(),
                    name: name.to_string(),
                });
            }
        }
        Ok(Self { template })
    }

    pub fn source(&self) -> &str {
        self.template.source()
    }

    /// The URL for a move from `start` to `end` (zero-based, header excluded).
    pub fn url(&self, start: usize, end: usize) -> String {
        // Any other placeholder is left as written
        let mut vars: HashMap<String, String> = self
            .template
            .placeholders()
            .map(|name| (name.to_string(), format!(":{name}")))
            .collect();
        vars.insert(Self::START.to_string(), start.to_string());
        vars.insert(Self::END.to_string(), end.to_string());
        self.template
            .render(&vars)
            .unwrap_or_else(|_| self.template.source().to_string())
    }
}

impl std::str::FromStr for CallbackTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
