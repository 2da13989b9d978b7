use crate::foundation::core::{Point, fmt_number};
use crate::render::page::{ElementId, Page, escape_text};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipOptions {
    /// Horizontal distance from the pointer, in px.
    pub offset_x: f64,
    /// Vertical distance from the pointer, in px (negative is above).
    pub offset_y: f64,
    /// Opacity while shown.
    pub opacity: f64,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            offset_x: 5.0,
            offset_y: -50.0,
            opacity: 0.9,
        }
    }
}

/// What the tooltip shows for one tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TooltipContent {
    pub name: String,
    pub category: String,
    /// Raw source value, echoed in `data-value`.
    pub value: Option<String>,
    /// Currency text, e.g. `$1,234,567`.
    pub amount: String,
}

impl TooltipContent {
    pub fn html(&self) -> String {
        format!(
            "{}<br>{}<br>{}",
            escape_text(&self.name),
            escape_text(&self.category),
            escape_text(&self.amount)
        )
    }
}

/// Observable tooltip state, for assertions and the `hover` command.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipState {
    pub visible: bool,
    pub opacity: String,
    pub html: Option<String>,
    pub value: Option<String>,
    pub left: Option<String>,
    pub top: Option<String>,
}

/// Handle to the single tooltip element shared by every tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tooltip {
    element: ElementId,
    opts: TooltipOptions,
}

impl Tooltip {
    /// Append a hidden `<div class="tooltip" id=...>` to the page body.
    pub fn attach(page: &mut Page, dom_id: &str, opts: TooltipOptions) -> Self {
        let element = page.append(page.body(), "div");
        page.set_attr(element, "class", "tooltip");
        page.set_attr(element, "id", dom_id);
        page.set_attr(element, "data-offset-x", fmt_number(opts.offset_x));
        page.set_attr(element, "data-offset-y", fmt_number(opts.offset_y));
        page.set_attr(element, "data-opacity", fmt_number(opts.opacity));
        page.set_style(element, "opacity", "0");
        page.set_attr(page.body(), "data-tooltip", dom_id);
        Self { element, opts }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn options(&self) -> TooltipOptions {
        self.opts
    }

    /// Fill in `content` and reveal the tooltip next to `pointer` (page coordinates).
    pub fn show(&self, page: &mut Page, content: &TooltipContent, pointer: Point) {
        page.set_inner_html(self.element, content.html());
        match &content.value {
            Some(v) => page.set_attr(self.element, "data-value", v.clone()),
            None => page.remove_attr(self.element, "data-value"),
        }
        page.set_style(
            self.element,
            "left",
            format!("{}px", fmt_number(pointer.x + self.opts.offset_x)),
        );
        page.set_style(
            self.element,
            "top",
            format!("{}px", fmt_number(pointer.y + self.opts.offset_y)),
        );
        page.set_style(self.element, "opacity", fmt_number(self.opts.opacity));
    }

    /// Make the tooltip fully transparent; its content stays in place.
    pub fn hide(&self, page: &mut Page) {
        page.set_style(self.element, "opacity", "0");
    }

    pub fn state(&self, page: &Page) -> TooltipState {
        let opacity = page
            .style(self.element, "opacity")
            .unwrap_or("0")
            .to_owned();
        TooltipState {
            visible: opacity.parse::<f64>().is_ok_and(|o| o > 0.0),
            opacity,
            html: page.inner_html(self.element).map(str::to_owned),
            value: page.attr(self.element, "data-value").map(str::to_owned),
            left: page.style(self.element, "left").map(str::to_owned),
            top: page.style(self.element, "top").map(str::to_owned),
        }
    }
}
