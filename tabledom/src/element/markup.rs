//! HTML-like serialisation of element trees.
//!
//! Used as the payload of partial-update requests, so only identity,
//! classes, attributes and content are written. Layout and style are not.

use super::{Content, Element};

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

impl Element {
    /// Serialise this element and its subtree.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }

    /// Serialise only the children of this element, concatenated.
    pub fn inner_markup(&self) -> String {
        let mut out = String::new();
        for child in self.child_elements() {
            write_element(child, &mut out);
        }
        if let Content::Text(text) = &self.content {
            out.push_str(&escape(text));
        }
        out
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    out.push_str(&format!(" id=\"{}\"", escape(&element.id)));
    if !element.classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape(&element.classes.join(" "))));
    }
    for (name, value) in &element.attributes {
        out.push_str(&format!(" {name}=\"{}\"", escape(value)));
    }

    if VOID_TAGS.contains(&element.tag.as_str()) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    out.push_str(&element.inner_markup());
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
