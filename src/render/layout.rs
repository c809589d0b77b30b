//! Radial partition layout.
//!
//! Every input node becomes a `LayoutNode` with an angular range `x0..x1`
//! (radians, proportional to the subtree's total value) and a ring range
//! `y0..y1` (one ring per depth level). Nodes are stored breadth-first in a
//! flat arena, so `NodeId(0)` is always the root.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::ops::Index;

use crate::data::Node;
use crate::error::Result;

/// Stable index of a node inside a `Partition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Angular (`x`, radians) and radial (`y`, ring units) bounds of a wedge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Extent {
    pub const fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    pub fn angle_span(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn ring_span(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn mid_angle(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn mid_ring(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    /// Componentwise comparison within `eps`.
    pub fn approx_eq(&self, other: &Extent, eps: f64) -> bool {
        (self.x0 - other.x0).abs() <= eps
            && (self.x1 - other.x1).abs() <= eps
            && (self.y0 - other.y0).abs() <= eps
            && (self.y1 - other.y1).abs() <= eps
    }
}

/// An input node with its computed layout.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: NodeId,
    pub name: String,
    /// 0 for the root.
    pub depth: usize,
    /// Distance to the deepest descendant; 0 for leaves.
    pub height: usize,
    /// Sum of all leaf values in this subtree.
    pub value: f64,
    pub extent: Extent,
    pub parent: Option<NodeId>,
    /// Children ordered by descending value.
    pub children: Vec<NodeId>,
    /// The input subtree this node was built from, in input order.
    pub data: Node,
}

impl LayoutNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Flat, breadth-first arena of laid-out nodes.
#[derive(Debug, Clone)]
pub struct Partition {
    nodes: Vec<LayoutNode>,
}

/// Value and height of a subtree, children already sorted.
struct Measured<'a> {
    node: &'a Node,
    value: f64,
    height: usize,
    children: Vec<Measured<'a>>,
}

fn measure(node: &Node) -> Measured<'_> {
    let mut children: Vec<Measured<'_>> = node.children().iter().map(measure).collect();
    // Stable sort keeps input order among equal values.
    children.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

    let value = if children.is_empty() {
        node.leaf_value()
    } else {
        children.iter().map(|c| c.value).sum()
    };
    let height = children.iter().map(|c| c.height + 1).max().unwrap_or(0);

    Measured {
        node,
        value,
        height,
        children,
    }
}

/// Validate `root` and lay it out over the full circle.
pub fn compute_partition(root: &Node) -> Result<Partition> {
    root.validate()?;
    Ok(partition_unchecked(root))
}

/// Lay out `root` without validating it first. Subtrees with a total value of
/// zero collapse onto their parent's start angle.
pub fn partition_unchecked(root: &Node) -> Partition {
    let measured = measure(root);
    let mut nodes: Vec<LayoutNode> = Vec::new();
    let mut queue: VecDeque<(&Measured<'_>, Option<NodeId>, usize, Extent)> = VecDeque::new();
    queue.push_back((&measured, None, 0, Extent::new(0.0, TAU, 0.0, 1.0)));

    while let Some((m, parent, depth, extent)) = queue.pop_front() {
        let id = NodeId(nodes.len());
        if let Some(p) = parent {
            nodes[p.0].children.push(id);
        }
        nodes.push(LayoutNode {
            id,
            name: m.node.name.clone(),
            depth,
            height: m.height,
            value: m.value,
            extent,
            parent,
            children: Vec::with_capacity(m.children.len()),
            data: m.node.clone(),
        });

        let child_y0 = (depth + 1) as f64;
        let k = if m.value > 0.0 {
            extent.angle_span() / m.value
        } else {
            0.0
        };
        let mut x = extent.x0;
        let last = m.children.len().saturating_sub(1);
        for (i, child) in m.children.iter().enumerate() {
            // The last child ends exactly on the parent's edge.
            let x1 = if i == last && m.value > 0.0 {
                extent.x1
            } else {
                x + child.value * k
            };
            queue.push_back((
                child,
                Some(id),
                depth + 1,
                Extent::new(x, x1, child_y0, child_y0 + 1.0),
            ));
            x = x1;
        }
    }

    Partition { nodes }
}

impl Partition {
    pub fn root(&self) -> &LayoutNode {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.0)
    }

    /// All nodes, breadth-first, root first.
    pub fn descendants(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter()
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            out.push(p);
            cur = self.nodes[p.0].parent;
        }
        out
    }

    /// Slash-joined names from the root down to `id`.
    pub fn path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .into_iter()
            .map(|a| self.nodes[a.0].name.as_str())
            .collect();
        names.reverse();
        names.join("/")
    }

    /// The depth-1 ancestor of `id`, or `id` itself at depth 0 or 1.
    pub fn top_level_ancestor(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while self.nodes[cur.0].depth > 1 {
            match self.nodes[cur.0].parent {
                Some(p) => cur = p,
                None => break,
            }
        }
        cur
    }

    /// Deepest level in the tree.
    pub fn max_depth(&self) -> usize {
        self.root().height
    }
}

impl Index<NodeId> for Partition {
    type Output = LayoutNode;

    fn index(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id.0]
    }
}
