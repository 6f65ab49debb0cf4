use crate::intersect::PairSet;
use crate::shape::{Axis, AABB};
use slotmapd::new_key_type;
use slotmapd::SlotMap;
use std::cmp::Ordering;

new_key_type! {
    /// Identifies a node inside the arena of the [`Bvh`] that built it.
    pub struct NodeId;
}

pub type BvhNodes = SlotMap<NodeId, BvhNode>;

/// Leaf or internal node payload
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// `index` is the position of the box in the slice given to `build`,
    /// `proxy` is that box untouched (the node box may be inflated).
    Leaf { index: usize, proxy: AABB },
    Internal { left: NodeId, right: NodeId },
}

/// A node of the hierarchy. Internal nodes bound exactly the union of their children.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BvhNode {
    pub aabb: AABB,
    pub kind: NodeKind,
}

impl BvhNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn left(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Internal { left, .. } => Some(left),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Internal { right, .. } => Some(right),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Original box of the leaf, `None` for internal nodes.
    pub fn proxy(&self) -> Option<&AABB> {
        match &self.kind {
            NodeKind::Leaf { proxy, .. } => Some(proxy),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Input index of the leaf, `None` for internal nodes.
    pub fn index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Leaf { index, .. } => Some(index),
            NodeKind::Internal { .. } => None,
        }
    }
}

/// Bounding volume hierarchy: a binary tree of AABBs built top-down over a set of boxes.
///
/// ## Building
/// The tree is built in one go by recursively splitting the boxes at the median of their centers,
/// along the axis where the centers are the most spread out. Every input box ends up in exactly
/// one leaf and the tree stays balanced, so its depth is about `log2(n)`.
///
/// There is no incremental update: the tree is meant to be rebuilt from scratch every tick
/// and thrown away afterwards.
///
/// ## Fattening
/// With [`build_with_margin`](Bvh::build_with_margin) leaf boxes are inflated, the untouched box
/// is kept as the leaf proxy and is what leaves are tested with. Queries therefore return the same
/// results whatever the margin.
///
/// Nodes are stored in a SlotMap arena and reference their children through [`NodeId`]s.
///
/// ## Examples
/// ```rust
/// use isect2d::{Bvh, AABB};
///
/// let boxes = [
///     AABB::new([0.0, 0.0], [2.0, 2.0]),
///     AABB::new([1.0, 1.0], [3.0, 3.0]),
///     AABB::new([10.0, 10.0], [11.0, 11.0]),
/// ];
/// let bvh = Bvh::build(&boxes);
///
/// assert_eq!(bvh.leaf_count(), 3);
/// assert!(bvh.pairs().contains(&(0, 1)));
/// assert_eq!(bvh.pairs().len(), 1);
/// assert_eq!(bvh.query(&AABB::new([10.5, 10.5], [12.0, 12.0])), vec![2]);
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bvh {
    nodes: BvhNodes,
    root: Option<NodeId>,
    leaves: usize,
}

impl Bvh {
    /// Builds a tree over `aabbs`, leaf indices are positions in that slice.
    pub fn build(aabbs: &[AABB]) -> Self {
        Self::build_with_margin(aabbs, 0.0)
    }

    /// Builds a tree whose leaf boxes are inflated by `margin`.
    pub fn build_with_margin(aabbs: &[AABB], margin: f32) -> Self {
        debug_assert!(margin >= 0.0, "bvh margin cannot be negative");

        let mut nodes = SlotMap::with_capacity_and_key(aabbs.len().saturating_mul(2));
        let mut items: Vec<(usize, AABB)> = aabbs.iter().copied().enumerate().collect();

        let root = if items.is_empty() {
            None
        } else {
            Some(Self::build_node(&mut nodes, &mut items, margin))
        };

        let bvh = Self {
            nodes,
            root,
            leaves: aabbs.len(),
        };
        log::trace!(
            "built bvh: {} leaves, {} nodes, depth {}",
            bvh.leaves,
            bvh.nodes.len(),
            bvh.depth()
        );
        bvh
    }

    fn build_node(nodes: &mut BvhNodes, items: &mut [(usize, AABB)], margin: f32) -> NodeId {
        if items.len() == 1 {
            let (index, proxy) = items[0];
            let aabb = if margin > 0.0 {
                proxy.inflate(margin)
            } else {
                proxy
            };
            return nodes.insert(BvhNode {
                aabb,
                kind: NodeKind::Leaf { index, proxy },
            });
        }

        let axis = Self::split_axis(items);
        items.sort_unstable_by(|(ia, a), (ib, b)| {
            let ca = a.min_on(axis) + a.max_on(axis);
            let cb = b.min_on(axis) + b.max_on(axis);
            ca.total_cmp(&cb).then(ia.cmp(ib))
        });

        let (l, r) = items.split_at_mut(items.len() / 2);
        let left = Self::build_node(nodes, l, margin);
        let right = Self::build_node(nodes, r, margin);
        let aabb = nodes[left].aabb.union(&nodes[right].aabb);

        nodes.insert(BvhNode {
            aabb,
            kind: NodeKind::Internal { left, right },
        })
    }

    /// Axis with the largest spread of box centers.
    fn split_axis(items: &[(usize, AABB)]) -> Axis {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];
        for (_, b) in items {
            let c = b.center();
            min[0] = min[0].min(c.x);
            min[1] = min[1].min(c.y);
            max[0] = max[0].max(c.x);
            max[1] = max[1].max(c.y);
        }
        if max[1] - min[1] > max[0] - min[0] {
            Axis::Y
        } else {
            Axis::X
        }
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root(&self) -> Option<&BvhNode> {
        self.root.map(|id| &self.nodes[id])
    }

    pub fn node(&self, id: NodeId) -> Option<&BvhNode> {
        self.nodes.get(id)
    }

    /// Number of nodes, leaves included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Number of nodes on the longest root to leaf path, 0 for an empty tree.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, d)) = stack.pop() {
            depth = depth.max(d);
            if let NodeKind::Internal { left, right } = self.nodes[id].kind {
                stack.push((left, d + 1));
                stack.push((right, d + 1));
            }
        }
        depth
    }

    /// Iterates over all nodes in pre-order, left subtree first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Indices of the leaves whose box overlaps `aabb`.
    pub fn query(&self, aabb: &AABB) -> Vec<usize> {
        let mut out = vec![];
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if !node.aabb.overlaps(aabb) {
                continue;
            }
            match node.kind {
                NodeKind::Leaf { index, proxy } => {
                    if proxy.overlaps(aabb) {
                        out.push(index);
                    }
                }
                NodeKind::Internal { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        out
    }

    /// All pairs of leaves with overlapping boxes, each unordered pair reported once as `(i, j)`, `i < j`.
    pub fn pairs(&self) -> PairSet {
        let mut out = PairSet::default();
        if let Some(root) = self.root {
            self.self_pairs(root, &mut out);
        }
        out
    }

    fn self_pairs(&self, id: NodeId, out: &mut PairSet) {
        if let NodeKind::Internal { left, right } = self.nodes[id].kind {
            self.self_pairs(left, out);
            self.self_pairs(right, out);
            self.cross_pairs(left, right, out);
        }
    }

    /// Pairs with one leaf under `a` and the other under `b`, the two subtrees being disjoint.
    fn cross_pairs(&self, a: NodeId, b: NodeId, out: &mut PairSet) {
        let na = &self.nodes[a];
        let nb = &self.nodes[b];
        if !na.aabb.overlaps(&nb.aabb) {
            return;
        }

        match (na.kind, nb.kind) {
            (NodeKind::Leaf { index: i, proxy: pa }, NodeKind::Leaf { index: j, proxy: pb }) => {
                if pa.overlaps(&pb) {
                    out.insert((i.min(j), i.max(j)));
                }
            }
            (NodeKind::Leaf { .. }, NodeKind::Internal { left, right }) => {
                self.cross_pairs(a, left, out);
                self.cross_pairs(a, right, out);
            }
            (NodeKind::Internal { left, right }, NodeKind::Leaf { .. }) => {
                self.cross_pairs(left, b, out);
                self.cross_pairs(right, b, out);
            }
            (
                NodeKind::Internal { left, right },
                NodeKind::Internal {
                    left: b_left,
                    right: b_right,
                },
            ) => {
                // Split the bigger box, its children are the most likely to be pruned.
                if na.aabb.area().total_cmp(&nb.aabb.area()) == Ordering::Less {
                    self.cross_pairs(a, b_left, out);
                    self.cross_pairs(a, b_right, out);
                } else {
                    self.cross_pairs(left, b, out);
                    self.cross_pairs(right, b, out);
                }
            }
        }
    }
}

/// Pre-order iterator over the nodes of a [`Bvh`]
pub struct Iter<'a> {
    nodes: &'a BvhNodes,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a BvhNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.nodes[id];
        if let NodeKind::Internal { left, right } = node.kind {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Bvh {
    type Item = &'a BvhNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
