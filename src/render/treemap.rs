use crate::foundation::core::{Canvas, Margin, Point, Rect, fmt_number};
use crate::foundation::error::{BoxofficeError, BoxofficeResult};
use crate::layout::hierarchy::{Hierarchy, NodeId};
use crate::render::color::{Color, OrdinalScale};
use crate::render::format::format_currency;
use crate::render::label::split_name;
use crate::render::page::{ElementId, Page, SVG_NS};
use crate::render::tooltip::{Tooltip, TooltipContent};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelOptions {
    /// Left inset of every line from the tile's left edge.
    pub offset_x: f64,
    /// Baseline of the first line below the tile's top edge.
    pub offset_y: f64,
    /// Baseline distance between consecutive lines.
    pub line_height: f64,
    pub font_size: String,
    pub fill: String,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            offset_x: 5.0,
            offset_y: 15.0,
            line_height: 10.0,
            font_size: "0.6rem".to_owned(),
            fill: "black".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub canvas: Canvas,
    pub margin: Margin,
    pub stroke: String,
    pub label: LabelOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            margin: Margin::default(),
            stroke: "black".to_owned(),
            label: LabelOptions::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(usize);

impl TileId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Everything drawn for one leaf.
#[derive(Clone, Debug)]
pub struct TileHandle {
    pub leaf: NodeId,
    pub rect: ElementId,
    pub label: ElementId,
    /// Bounds in layout coordinates (before the margin offset).
    pub bounds: Rect,
    pub fill: Color,
    pub fragments: Vec<String>,
    pub tooltip: TooltipContent,
}

/// Pointer input for a tile. Positions are page coordinates with the canvas at the page origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter { tile: TileId, at: Point },
    Move { tile: TileId, at: Point },
    Leave { tile: TileId },
}

/// Handles to a drawn treemap, valid until [`RenderedTreemap::dispose`].
#[derive(Clone, Debug)]
pub struct RenderedTreemap {
    svg: ElementId,
    origin: Point,
    tiles: Vec<TileHandle>,
}

/// Draw the leaves of a laid-out hierarchy into `container`.
///
/// One `<rect class="tile">` per leaf in pre-order, then one `<text>` per leaf with a `<tspan>`
/// per name fragment. Fills come from `scale`, keyed by category; categories outside its domain
/// are appended to it.
#[tracing::instrument(skip_all, fields(leaves = tracing::field::Empty))]
pub fn render_treemap(
    page: &mut Page,
    container: ElementId,
    h: &Hierarchy<'_>,
    scale: &mut OrdinalScale,
    opts: &RenderOptions,
) -> BoxofficeResult<RenderedTreemap> {
    if !page.contains(container) {
        return Err(BoxofficeError::render("target container is not on the page"));
    }

    let svg = page.append(container, "svg");
    page.set_attr(svg, "xmlns", SVG_NS);
    page.set_attr(svg, "width", opts.canvas.width.to_string());
    page.set_attr(svg, "height", opts.canvas.height.to_string());

    let origin = Point::new(opts.margin.left, opts.margin.top);
    let group = if opts.margin.is_zero() {
        svg
    } else {
        let g = page.append(svg, "g");
        page.set_attr(
            g,
            "transform",
            format!(
                "translate({},{})",
                fmt_number(origin.x),
                fmt_number(origin.y)
            ),
        );
        g
    };

    let leaves = h.leaves();
    tracing::Span::current().record("leaves", leaves.len());

    let mut rects = Vec::with_capacity(leaves.len());
    for leaf in &leaves {
        let node = h.node(*leaf);
        let data = node.data;
        let fill = scale.resolve(data.category.as_deref().unwrap_or_default());

        let rect = page.append(group, "rect");
        page.set_attr(rect, "x", fmt_number(node.x0));
        page.set_attr(rect, "y", fmt_number(node.y0));
        page.set_attr(rect, "width", fmt_number(node.x1 - node.x0));
        page.set_attr(rect, "height", fmt_number(node.y1 - node.y0));
        page.set_attr(rect, "class", "tile");
        page.set_attr(rect, "data-name", data.name.clone());
        if let Some(c) = &data.category {
            page.set_attr(rect, "data-category", c.clone());
        }
        if let Some(v) = &data.value {
            page.set_attr(rect, "data-value", v.raw());
        }
        page.set_style(rect, "stroke", opts.stroke.clone());
        page.set_style(rect, "fill", fill.to_string());
        rects.push((rect, fill));
    }

    let label = &opts.label;
    let mut tiles = Vec::with_capacity(leaves.len());
    for (leaf, (rect, fill)) in leaves.iter().zip(rects) {
        let node = h.node(*leaf);
        let data = node.data;
        let fragments: Vec<String> = split_name(&data.name)
            .into_iter()
            .map(str::to_owned)
            .collect();

        let text = page.append(group, "text");
        for (i, frag) in fragments.iter().enumerate() {
            let tspan = page.append(text, "tspan");
            page.set_attr(tspan, "x", fmt_number(node.x0 + label.offset_x));
            page.set_attr(
                tspan,
                "y",
                fmt_number(node.y0 + label.offset_y + i as f64 * label.line_height),
            );
            page.set_attr(tspan, "font-size", label.font_size.clone());
            page.set_attr(tspan, "fill", label.fill.clone());
            page.set_text(tspan, frag.clone());
        }

        tiles.push(TileHandle {
            leaf: *leaf,
            rect,
            label: text,
            bounds: node.rect(),
            fill,
            fragments,
            tooltip: TooltipContent {
                name: data.name.clone(),
                category: data.category.clone().unwrap_or_default(),
                value: data.value.as_ref().map(|v| v.raw()),
                amount: format_currency(data.value.as_ref()),
            },
        });
    }

    Ok(RenderedTreemap { svg, origin, tiles })
}

impl RenderedTreemap {
    pub fn svg(&self) -> ElementId {
        self.svg
    }

    pub fn tiles(&self) -> &[TileHandle] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&TileHandle> {
        self.tiles.get(id.0)
    }

    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles.len()).map(TileId)
    }

    /// The tile under `at`, preferring the one drawn last. Edges are half-open.
    pub fn hit_test(&self, at: Point) -> Option<TileId> {
        let local = Point::new(at.x - self.origin.x, at.y - self.origin.y);
        self.tiles
            .iter()
            .rposition(|t| {
                let b = t.bounds;
                b.x0 <= local.x && local.x < b.x1 && b.y0 <= local.y && local.y < b.y1
            })
            .map(TileId)
    }

    /// Apply one pointer event to the shared tooltip.
    pub fn dispatch(
        &self,
        page: &mut Page,
        tooltip: &Tooltip,
        event: PointerEvent,
    ) -> BoxofficeResult<()> {
        match event {
            PointerEvent::Enter { tile, at } | PointerEvent::Move { tile, at } => {
                let handle = self.require(tile)?;
                tooltip.show(page, &handle.tooltip, at);
            }
            PointerEvent::Leave { tile } => {
                self.require(tile)?;
                tooltip.hide(page);
            }
        }
        Ok(())
    }

    /// Hit-test `at` and show the tooltip for the tile found there, or hide it over empty space.
    pub fn hover(&self, page: &mut Page, tooltip: &Tooltip, at: Point) -> Option<TileId> {
        match self.hit_test(at) {
            Some(tile) => {
                tooltip.show(page, &self.tiles[tile.0].tooltip, at);
                Some(tile)
            }
            None => {
                tooltip.hide(page);
                None
            }
        }
    }

    /// Remove everything this render added to the page.
    pub fn dispose(self, page: &mut Page) {
        page.remove(self.svg);
    }

    fn require(&self, tile: TileId) -> BoxofficeResult<&TileHandle> {
        self.tiles
            .get(tile.0)
            .ok_or_else(|| BoxofficeError::render(format!("unknown tile #{}", tile.0)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/treemap.rs"]
mod tests;
