//! Tiling strategies: how a container's rectangle is divided among its children.
//!
//! Every strategy gives each child an area proportional to its aggregate value, in the current
//! child order. Arithmetic is plain `f64` in a fixed order so that a layout is reproducible bit
//! for bit.

use crate::foundation::core::Rect;
use crate::layout::hierarchy::{Hierarchy, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Golden ratio, the default target aspect ratio for [`Squarify`].
pub const PHI: f64 = 1.618_033_988_749_895;

/// Positions the children of `parent` inside `rect`.
pub trait Tile: fmt::Debug + Send + Sync {
    fn tile(&self, h: &mut Hierarchy<'_>, parent: NodeId, rect: Rect);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileKind {
    #[default]
    Squarify,
    Binary,
    Slice,
    Dice,
    SliceDice,
}

pub fn create_tile(kind: TileKind, squarify_ratio: f64) -> Box<dyn Tile> {
    match kind {
        TileKind::Squarify => Box::new(Squarify::with_ratio(squarify_ratio)),
        TileKind::Binary => Box::new(Binary),
        TileKind::Slice => Box::new(Slice),
        TileKind::Dice => Box::new(Dice),
        TileKind::SliceDice => Box::new(SliceDice),
    }
}

/// Squarified rows (Bruls, Huizing, van Wijk): children are added to the current row while the
/// worst aspect ratio in it keeps improving, rows alternate with the shorter side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Squarify {
    ratio: f64,
}

impl Squarify {
    /// Target aspect ratio; anything below 1 (or NaN) is clamped to 1.
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio: if ratio > 1.0 { ratio } else { 1.0 },
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Default for Squarify {
    fn default() -> Self {
        Self { ratio: PHI }
    }
}

impl Tile for Squarify {
    fn tile(&self, h: &mut Hierarchy<'_>, parent: NodeId, rect: Rect) {
        let nodes = h.node(parent).children.clone();
        let n = nodes.len();
        let mut value = h.node(parent).value;
        let Rect {
            mut x0,
            mut y0,
            x1,
            y1,
        } = rect;

        let mut i0 = 0;
        let mut i1 = 0;
        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;

            // Zero-weight children ride along with the next non-empty one.
            let mut sum_value;
            loop {
                sum_value = h.node(nodes[i1]).value;
                i1 += 1;
                if truthy(sum_value) || i1 >= n {
                    break;
                }
            }
            let mut min_value = sum_value;
            let mut max_value = sum_value;
            let alpha = max_nan(dy / dx, dx / dy) / (value * self.ratio);
            let mut beta = sum_value * sum_value * alpha;
            let mut min_ratio = max_nan(max_value / beta, beta / min_value);

            while i1 < n {
                let node_value = h.node(nodes[i1]).value;
                sum_value += node_value;
                if node_value < min_value {
                    min_value = node_value;
                }
                if node_value > max_value {
                    max_value = node_value;
                }
                beta = sum_value * sum_value * alpha;
                let new_ratio = max_nan(max_value / beta, beta / min_value);
                if new_ratio > min_ratio {
                    sum_value -= node_value;
                    break;
                }
                min_ratio = new_ratio;
                i1 += 1;
            }

            let row = &nodes[i0..i1];
            if dx < dy {
                let row_y0 = y0;
                let row_y1 = if truthy(value) {
                    y0 += dy * sum_value / value;
                    y0
                } else {
                    y1
                };
                dice(h, row, sum_value, Rect::new(x0, row_y0, x1, row_y1));
            } else {
                let row_x0 = x0;
                let row_x1 = if truthy(value) {
                    x0 += dx * sum_value / value;
                    x0
                } else {
                    x1
                };
                slice(h, row, sum_value, Rect::new(row_x0, y0, row_x1, y1));
            }
            value -= sum_value;
            i0 = i1;
        }
    }
}

/// Recursive halving by cumulative weight, splitting along the longer side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Binary;

impl Tile for Binary {
    fn tile(&self, h: &mut Hierarchy<'_>, parent: NodeId, rect: Rect) {
        let nodes = h.node(parent).children.clone();
        if nodes.is_empty() {
            return;
        }
        let mut sums = Vec::with_capacity(nodes.len() + 1);
        let mut sum = 0.0;
        sums.push(sum);
        for id in &nodes {
            sum += h.node(*id).value;
            sums.push(sum);
        }
        let value = h.node(parent).value;
        binary_partition(h, &nodes, &sums, 0, nodes.len(), value, rect);
    }
}

fn binary_partition(
    h: &mut Hierarchy<'_>,
    nodes: &[NodeId],
    sums: &[f64],
    i: usize,
    j: usize,
    value: f64,
    rect: Rect,
) {
    if i + 1 >= j {
        h.node_mut(nodes[i])
            .set_rect(rect.x0, rect.y0, rect.x1, rect.y1);
        return;
    }

    let value_offset = sums[i];
    let value_target = value / 2.0 + value_offset;
    let mut k = i + 1;
    let mut hi = j - 1;
    while k < hi {
        let mid = (k + hi) / 2;
        if sums[mid] < value_target {
            k = mid + 1;
        } else {
            hi = mid;
        }
    }
    if value_target - sums[k - 1] < sums[k] - value_target && i + 1 < k {
        k -= 1;
    }

    let value_left = sums[k] - value_offset;
    let value_right = value - value_left;
    let Rect { x0, y0, x1, y1 } = rect;

    if x1 - x0 > y1 - y0 {
        let xk = if truthy(value) {
            (x0 * value_right + x1 * value_left) / value
        } else {
            x1
        };
        binary_partition(h, nodes, sums, i, k, value_left, Rect::new(x0, y0, xk, y1));
        binary_partition(h, nodes, sums, k, j, value_right, Rect::new(xk, y0, x1, y1));
    } else {
        let yk = if truthy(value) {
            (y0 * value_right + y1 * value_left) / value
        } else {
            y1
        };
        binary_partition(h, nodes, sums, i, k, value_left, Rect::new(x0, y0, x1, yk));
        binary_partition(h, nodes, sums, k, j, value_right, Rect::new(x0, yk, x1, y1));
    }
}

/// Horizontal bands, top to bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slice;

impl Tile for Slice {
    fn tile(&self, h: &mut Hierarchy<'_>, parent: NodeId, rect: Rect) {
        let nodes = h.node(parent).children.clone();
        let value = h.node(parent).value;
        slice(h, &nodes, value, rect);
    }
}

/// Vertical columns, left to right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dice;

impl Tile for Dice {
    fn tile(&self, h: &mut Hierarchy<'_>, parent: NodeId, rect: Rect) {
        let nodes = h.node(parent).children.clone();
        let value = h.node(parent).value;
        dice(h, &nodes, value, rect);
    }
}

/// Slice at odd depths, dice at even depths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliceDice;

impl Tile for SliceDice {
    fn tile(&self, h: &mut Hierarchy<'_>, parent: NodeId, rect: Rect) {
        if h.node(parent).depth % 2 == 1 {
            Slice.tile(h, parent, rect);
        } else {
            Dice.tile(h, parent, rect);
        }
    }
}

fn dice(h: &mut Hierarchy<'_>, nodes: &[NodeId], value: f64, rect: Rect) {
    let k = if truthy(value) {
        (rect.x1 - rect.x0) / value
    } else {
        value
    };
    let mut x = rect.x0;
    for id in nodes {
        let node = h.node_mut(*id);
        let x0 = x;
        x += node.value * k;
        node.set_rect(x0, rect.y0, x, rect.y1);
    }
}

fn slice(h: &mut Hierarchy<'_>, nodes: &[NodeId], value: f64, rect: Rect) {
    let k = if truthy(value) {
        (rect.y1 - rect.y0) / value
    } else {
        value
    };
    let mut y = rect.y0;
    for id in nodes {
        let node = h.node_mut(*id);
        let y0 = y;
        y += node.value * k;
        node.set_rect(rect.x0, y0, rect.x1, y);
    }
}

/// A weight counts only when it is non-zero and not NaN.
fn truthy(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

/// `max` that propagates NaN instead of ignoring it, so degenerate rows stop growing.
fn max_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tile.rs"]
mod tests;
