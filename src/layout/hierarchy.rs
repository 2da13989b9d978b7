use crate::data::model::DataNode;
use crate::foundation::core::Rect;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Index of a node inside a [`Hierarchy`]. The root is always `NodeId::ROOT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A layout node: one input node plus its aggregate weight and computed bounds.
#[derive(Clone, Debug)]
pub struct HierarchyNode<'a> {
    pub data: &'a DataNode,
    pub depth: usize,
    /// Longest distance to a descendant leaf (0 for leaves).
    pub height: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub value: f64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl<'a> HierarchyNode<'a> {
    fn new(data: &'a DataNode, depth: usize, parent: Option<NodeId>) -> Self {
        Self {
            data,
            depth,
            height: 0,
            parent,
            children: Vec::new(),
            value: 0.0,
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.x1, self.y1)
    }

    pub(crate) fn set_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.x0 = x0;
        self.y0 = y0;
        self.x1 = x1;
        self.y1 = y1;
    }
}

/// Arena-backed tree built once from a [`DataNode`] document.
///
/// Node ids are assigned in pre-order of the input, so every child id is larger than its
/// parent's. Sorting reorders `children` lists only; ids stay put.
#[derive(Clone, Debug)]
pub struct Hierarchy<'a> {
    nodes: Vec<HierarchyNode<'a>>,
}

impl<'a> Hierarchy<'a> {
    pub fn new(root: &'a DataNode) -> Self {
        let mut nodes = Vec::new();
        let mut stack: Vec<(&'a DataNode, usize, Option<NodeId>)> = vec![(root, 0, None)];
        while let Some((data, depth, parent)) = stack.pop() {
            let id = NodeId(nodes.len());
            nodes.push(HierarchyNode::new(data, depth, parent));
            if let Some(p) = parent {
                nodes[p.0].children.push(id);
            }
            for child in data.children().iter().rev() {
                stack.push((child, depth + 1, Some(id)));
            }
        }

        for idx in (1..nodes.len()).rev() {
            let h = nodes[idx].height + 1;
            if let Some(p) = nodes[idx].parent {
                let parent = &mut nodes[p.0];
                parent.height = parent.height.max(h);
            }
        }

        Self { nodes }
    }

    /// Build, sum and sort in one go: the form the treemap consumes.
    pub fn prepare(root: &'a DataNode) -> Self {
        let mut h = Self::new(root);
        h.sum_values();
        h.sort_by_value_desc();
        h
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode<'a> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut HierarchyNode<'a> {
        &mut self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &HierarchyNode<'a>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Aggregate weights bottom-up: own weight first, then the children from last to first.
    pub fn sum_values(&mut self) {
        for idx in (0..self.nodes.len()).rev() {
            let mut sum = self.nodes[idx].data.own_weight();
            for c in self.nodes[idx].children.iter().rev() {
                sum += self.nodes[c.0].value;
            }
            self.nodes[idx].value = sum;
        }
    }

    /// Stable sort of every child list by descending aggregate value.
    pub fn sort_by_value_desc(&mut self) {
        self.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    }

    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&HierarchyNode<'a>, &HierarchyNode<'a>) -> Ordering,
    {
        for idx in 0..self.nodes.len() {
            if self.nodes[idx].children.len() < 2 {
                continue;
            }
            let mut children = std::mem::take(&mut self.nodes[idx].children);
            children.sort_by(|a, b| cmp(&self.nodes[a.0], &self.nodes[b.0]));
            self.nodes[idx].children = children;
        }
    }

    /// Pre-order walk following the current child order.
    pub fn each_before(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Breadth-first walk.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([self.root()]);
        while let Some(id) = queue.pop_front() {
            out.push(id);
            queue.extend(self.nodes[id.0].children.iter().copied());
        }
        out
    }

    /// Leaves in pre-order, which is also the drawing order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.each_before()
            .into_iter()
            .filter(|id| self.nodes[id.0].is_leaf())
            .collect()
    }

    /// `id` followed by its parent chain up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            out.push(p);
            cur = self.nodes[p.0].parent;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/hierarchy.rs"]
mod tests;
