use crate::foundation::core::{Margin, Rect, Size};
use crate::foundation::error::{BoxofficeError, BoxofficeResult};
use crate::layout::hierarchy::{Hierarchy, NodeId};
use crate::layout::tile::{Squarify, Tile};

/// Turns a summed and sorted [`Hierarchy`] into one with bounds on every node.
///
/// The renderer only reads node bounds, so any implementation can stand in for
/// [`TreemapLayout`].
pub trait LayoutEngine {
    fn layout(&self, h: &mut Hierarchy<'_>) -> BoxofficeResult<()>;
}

/// Space-filling treemap inside a fixed `width x height` box.
#[derive(Debug)]
pub struct TreemapLayout {
    size: Size,
    tile: Box<dyn Tile>,
    padding_inner: f64,
    padding_outer: Margin,
    round: bool,
}

impl TreemapLayout {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            tile: Box::new(Squarify::default()),
            padding_inner: 0.0,
            padding_outer: Margin::default(),
            round: false,
        }
    }

    pub fn with_tile(mut self, tile: Box<dyn Tile>) -> Self {
        self.tile = tile;
        self
    }

    /// Gap between sibling rectangles.
    pub fn with_padding_inner(mut self, p: f64) -> Self {
        self.padding_inner = p;
        self
    }

    /// Gap between a container's edge and its children.
    pub fn with_padding_outer(mut self, p: Margin) -> Self {
        self.padding_outer = p;
        self
    }

    /// Snap every bound to the nearest integer after layout.
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn position(&self, h: &mut Hierarchy<'_>, id: NodeId, padding_stack: &mut [f64]) {
        let node = h.node(id);
        let depth = node.depth;
        let p = padding_stack[depth];
        let (mut x0, mut y0, mut x1, mut y1) =
            (node.x0 + p, node.y0 + p, node.x1 - p, node.y1 - p);
        collapse(&mut x0, &mut x1);
        collapse(&mut y0, &mut y1);
        h.node_mut(id).set_rect(x0, y0, x1, y1);

        if h.node(id).is_leaf() {
            return;
        }

        let p = self.padding_inner / 2.0;
        padding_stack[depth + 1] = p;
        x0 += self.padding_outer.left - p;
        y0 += self.padding_outer.top - p;
        x1 -= self.padding_outer.right - p;
        y1 -= self.padding_outer.bottom - p;
        collapse(&mut x0, &mut x1);
        collapse(&mut y0, &mut y1);
        self.tile.tile(h, id, Rect::new(x0, y0, x1, y1));
    }
}

impl LayoutEngine for TreemapLayout {
    #[tracing::instrument(skip_all, fields(width = self.size.width, height = self.size.height, nodes = h.len()))]
    fn layout(&self, h: &mut Hierarchy<'_>) -> BoxofficeResult<()> {
        let Size { width, height } = self.size;
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(BoxofficeError::layout(format!(
                "treemap size must be finite and non-negative, got {width}x{height}"
            )));
        }
        if !self.padding_inner.is_finite() || self.padding_inner < 0.0 {
            return Err(BoxofficeError::layout(format!(
                "inner padding must be finite and non-negative, got {}",
                self.padding_inner
            )));
        }

        let root = h.root();
        let total = h.node(root).value;
        if !total.is_finite() {
            return Err(BoxofficeError::layout(format!(
                "total value must be finite, got {total}"
            )));
        }
        h.node_mut(root).set_rect(0.0, 0.0, width, height);

        let mut padding_stack = vec![0.0; h.node(root).height + 2];
        for id in h.each_before() {
            self.position(h, id, &mut padding_stack);
        }

        if self.round {
            for id in h.each_before() {
                let n = h.node_mut(id);
                let (x0, y0, x1, y1) = (
                    round_half_up(n.x0),
                    round_half_up(n.y0),
                    round_half_up(n.x1),
                    round_half_up(n.y1),
                );
                n.set_rect(x0, y0, x1, y1);
            }
        }

        tracing::debug!(leaves = h.leaves().len(), "treemap laid out");
        Ok(())
    }
}

/// An inverted interval collapses to its midpoint.
fn collapse(lo: &mut f64, hi: &mut f64) {
    if *hi < *lo {
        let mid = (*lo + *hi) / 2.0;
        *lo = mid;
        *hi = mid;
    }
}

/// Round with halves going towards +infinity.
fn round_half_up(x: f64) -> f64 {
    let r = x.round();
    if x < 0.0 && r - x == -0.5 { r + 1.0 } else { r }
}
