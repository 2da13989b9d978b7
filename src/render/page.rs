//! Retained page document the renderer draws into.
//!
//! A small element tree (tag, ordered attributes, inline style, text) with stable ids, enough to
//! hold the chart container, the SVG canvas and the tooltip, to inspect them from tests and to
//! serialise them as SVG or as a standalone HTML page.

use std::fmt::Write as _;

const PAGE_CSS: &str = include_str!("assets/page.css");
const HOVER_SCRIPT: &str = include_str!("assets/hover.js");

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    style: Vec<(String, String)>,
    text: Option<String>,
    inner_html: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_owned(),
            attrs: Vec::new(),
            style: Vec::new(),
            text: None,
            inner_html: None,
            parent,
            children: Vec::new(),
        }
    }
}

/// Element tree rooted at `<body>`.
///
/// Removed elements leave a hole behind so ids handed out earlier never alias a new element.
/// Mutators called with a removed id do nothing; getters return `None`.
#[derive(Clone, Debug)]
pub struct Page {
    elements: Vec<Option<Element>>,
    body: ElementId,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            elements: vec![Some(Element::new("body", None))],
            body: ElementId(0),
        }
    }

    /// A page with one `<div id=...>` under the body to draw into.
    pub fn with_container(id: &str) -> Self {
        let mut page = Self::new();
        let div = page.append(page.body, "div");
        page.set_attr(div, "id", id);
        page
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live elements, the body included.
    pub fn len(&self) -> usize {
        self.elements.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a new `<tag>` as the last child of `parent`. A removed parent yields a detached
    /// element that is never serialised.
    pub fn append(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        let attached = self.contains(parent);
        self.elements
            .push(Some(Element::new(tag, attached.then_some(parent))));
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(el) = self.get_mut(id) {
            upsert(&mut el.attrs, name, value);
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(el) = self.get_mut(id) {
            el.attrs.retain(|(k, _)| k != name);
        }
    }

    pub fn set_style(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(el) = self.get_mut(id) {
            upsert(&mut el.style, name, value);
        }
    }

    /// Text content, escaped on output.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        let text = text.into();
        if let Some(el) = self.get_mut(id) {
            el.text = Some(text);
            el.inner_html = None;
        }
    }

    /// Markup written verbatim on output; callers escape untrusted parts.
    pub fn set_inner_html(&mut self, id: ElementId, html: impl Into<String>) {
        let html = html.into();
        if let Some(el) = self.get_mut(id) {
            el.inner_html = Some(html);
            el.text = None;
        }
    }

    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|el| el.tag.as_str())
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|el| lookup(&el.attrs, name))
    }

    pub fn style(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|el| lookup(&el.style, name))
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.get(id).and_then(|el| el.text.as_deref())
    }

    pub fn inner_html(&self, id: ElementId) -> Option<&str> {
        self.get(id).and_then(|el| el.inner_html.as_deref())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|el| el.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Detach `id` from its parent and drop it with its whole subtree.
    pub fn remove(&mut self, id: ElementId) {
        let Some(parent) = self.parent(id) else {
            if id != self.body {
                self.drop_subtree(id);
            }
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        self.drop_subtree(id);
    }

    fn drop_subtree(&mut self, id: ElementId) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(el) = self.elements.get_mut(cur.0).and_then(Option::take) {
                stack.extend(el.children);
            }
        }
    }

    /// Pre-order walk of the live tree under `root`, `root` included.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(cur) = stack.pop() {
            if let Some(el) = self.get(cur) {
                out.push(cur);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn find_by_id(&self, dom_id: &str) -> Option<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .find(|id| self.attr(*id, "id") == Some(dom_id))
    }

    /// Elements with the given tag, in document order.
    pub fn select_all(&self, tag: &str) -> Vec<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|id| self.tag(*id) == Some(tag))
            .collect()
    }

    /// Elements whose `class` attribute lists `class`, in document order.
    pub fn select_class(&self, class: &str) -> Vec<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|id| {
                self.attr(*id, "class")
                    .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
            })
            .collect()
    }

    /// Serialise the subtree under `id` as markup.
    pub fn write_element(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.write_into(&mut out, id, false);
        out
    }

    /// The first `<svg>` on the page as a standalone document, if any.
    pub fn to_svg(&self) -> Option<String> {
        let svg = self.select_all("svg").into_iter().next()?;
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_into(&mut out, svg, true);
        out.push('\n');
        Some(out)
    }

    /// The whole page as an HTML document with the tooltip styling and hover behaviour inlined.
    pub fn to_html(&self, title: &str) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_text(title));
        let _ = writeln!(out, "<style>\n{PAGE_CSS}</style>");
        out.push_str("</head>\n<body");
        if let Some(body) = self.get(self.body) {
            write_attrs(&mut out, body);
        }
        out.push_str(">\n");
        for child in self.children(self.body) {
            self.write_into(&mut out, *child, false);
            out.push('\n');
        }
        let _ = writeln!(out, "<script>\n{HOVER_SCRIPT}</script>");
        out.push_str("</body>\n</html>\n");
        out
    }

    fn write_into(&self, out: &mut String, id: ElementId, in_svg: bool) {
        let Some(el) = self.get(id) else {
            return;
        };
        let in_svg = in_svg || el.tag == "svg";

        let _ = write!(out, "<{}", el.tag);
        write_attrs(out, el);

        let empty = el.children.is_empty() && el.text.is_none() && el.inner_html.is_none();
        if empty && in_svg {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &el.text {
            out.push_str(&escape_text(text));
        }
        if let Some(html) = &el.inner_html {
            out.push_str(html);
        }
        for child in &el.children {
            self.write_into(out, *child, in_svg);
        }
        let _ = write!(out, "</{}>", el.tag);
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0).and_then(Option::as_mut)
    }
}

fn write_attrs(out: &mut String, el: &Element) {
    for (k, v) in &el.attrs {
        let _ = write!(out, " {k}=\"{}\"", escape_attr(v));
    }
    if !el.style.is_empty() {
        let style = el
            .style
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(out, " style=\"{}\"", escape_attr(&style));
    }
}

fn upsert(list: &mut Vec<(String, String)>, name: &str, value: String) {
    match list.iter_mut().find(|(k, _)| k == name) {
        Some((_, v)) => *v = value,
        None => list.push((name.to_owned(), value)),
    }
}

fn lookup<'a>(list: &'a [(String, String)], name: &str) -> Option<&'a str> {
    list.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
#[path = "../../tests/unit/render/page.rs"]
mod tests;
