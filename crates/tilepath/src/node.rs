use std::ops::{Index, IndexMut};

use tilepath_core::{Point, Range};

/// Sentinel parent index meaning "no parent".
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Where a node currently sits in the search.
///
/// Transitions: `Unvisited -> Open -> Closed`, and through relaxation
/// `Open -> Open` or `Closed -> Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    Unvisited,
    Open,
    Closed,
}

/// Per-cell search bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) cost: f32,
    pub(crate) heuristic: f32,
    pub(crate) parent: usize,
    pub(crate) depth: u32,
    pub(crate) state: NodeState,
    /// Sequence number of the heap entry that currently represents this node.
    pub(crate) seq: u64,
}

impl Node {
    #[inline]
    pub(crate) fn total(&self) -> f32 {
        self.cost + self.heuristic
    }

    #[inline]
    pub(crate) fn has_parent(&self) -> bool {
        self.parent != NO_PARENT
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: f32::INFINITY,
            heuristic: 0.0,
            parent: NO_PARENT,
            depth: 0,
            state: NodeState::Unvisited,
            seq: 0,
        }
    }
}

/// One [`Node`] per map cell, stored row-major.
pub(crate) struct NodeTable {
    rng: Range,
    width: usize,
    nodes: Vec<Node>,
}

impl NodeTable {
    pub(crate) fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
        }
    }

    #[inline]
    pub(crate) fn range(&self) -> Range {
        self.rng
    }

    /// Return every node to the unvisited state.
    pub(crate) fn reset(&mut self) {
        self.nodes.fill(Node::default());
    }

    /// Resize the table if the map bounds changed since it was allocated.
    pub(crate) fn ensure_range(&mut self, rng: Range) {
        if rng == self.rng {
            return;
        }
        log::debug!("node table resized from {} to {}", self.rng, rng);
        *self = Self::new(rng);
    }

    /// Flat index of `p`, or `None` if it lies outside the table.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    /// Seed the start node: zero cost, no parent, depth zero.
    pub(crate) fn seed(&mut self, idx: usize, heuristic: f32) {
        let n = &mut self.nodes[idx];
        n.cost = 0.0;
        n.heuristic = heuristic;
        n.parent = NO_PARENT;
        n.depth = 0;
    }

    /// Record a better route to `idx` through `parent` and return the new
    /// depth. The caller is responsible for placing the node in the open set.
    pub(crate) fn relax(&mut self, idx: usize, parent: usize, cost: f32, heuristic: f32) -> u32 {
        let depth = self.nodes[parent].depth + 1;
        let n = &mut self.nodes[idx];
        n.cost = cost;
        n.heuristic = heuristic;
        n.parent = parent;
        n.depth = depth;
        depth
    }

    /// Drop `idx` from whichever set holds it so it can be re-opened.
    #[inline]
    pub(crate) fn evict(&mut self, idx: usize) -> NodeState {
        std::mem::replace(&mut self.nodes[idx].state, NodeState::Unvisited)
    }

    #[inline]
    pub(crate) fn close(&mut self, idx: usize) {
        debug_assert_eq!(self.nodes[idx].state, NodeState::Open);
        self.nodes[idx].state = NodeState::Closed;
    }

    /// Walk parent links from `idx` back to the root, yielding points from
    /// `idx` first.
    pub(crate) fn ancestry(&self, idx: usize) -> impl Iterator<Item = Point> + '_ {
        std::iter::successors(Some(idx), move |&i| {
            let parent = self.nodes[i].parent;
            (parent != NO_PARENT).then_some(parent)
        })
        .map(move |i| self.point(i))
    }
}

impl Index<usize> for NodeTable {
    type Output = Node;

    #[inline]
    fn index(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }
}

impl IndexMut<usize> for NodeTable {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idx_round_trip_and_bounds() {
        let t = NodeTable::new(Range::with_size(4, 3));
        let p = Point::new(3, 2);
        let i = t.idx(p).unwrap();
        assert_eq!(i, 11);
        assert_eq!(t.point(i), p);
        assert_eq!(t.idx(Point::new(4, 0)), None);
        assert_eq!(t.idx(Point::new(0, 3)), None);
        assert_eq!(t.idx(Point::new(-1, 0)), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut t = NodeTable::new(Range::with_size(3, 3));
        t.seed(0, 2.0);
        t.relax(1, 0, 1.0, 1.0);
        t[1].state = NodeState::Closed;
        t.reset();
        for i in 0..9 {
            assert!(t[i].cost.is_infinite());
            assert!(!t[i].has_parent());
            assert_eq!(t[i].depth, 0);
            assert_eq!(t[i].state, NodeState::Unvisited);
        }
    }

    #[test]
    fn relax_tracks_depth_through_parent() {
        let mut t = NodeTable::new(Range::with_size(3, 1));
        t.seed(0, 0.0);
        assert_eq!(t.relax(1, 0, 1.0, 0.0), 1);
        assert_eq!(t.relax(2, 1, 2.0, 0.0), 2);
        assert_eq!(t[2].total(), 2.0);
        let chain: Vec<Point> = t.ancestry(2).collect();
        assert_eq!(chain, vec![Point::new(2, 0), Point::new(1, 0), Point::new(0, 0)]);
    }

    #[test]
    fn evict_returns_previous_state() {
        let mut t = NodeTable::new(Range::with_size(2, 2));
        t[3].state = NodeState::Open;
        t.close(3);
        assert_eq!(t.evict(3), NodeState::Closed);
        assert_eq!(t[3].state, NodeState::Unvisited);
    }

    #[test]
    fn ensure_range_reallocates_on_change() {
        let mut t = NodeTable::new(Range::with_size(2, 2));
        t.ensure_range(Range::with_size(2, 2));
        assert_eq!(t.nodes.len(), 4);
        t.ensure_range(Range::with_size(5, 4));
        assert_eq!(t.nodes.len(), 20);
        assert_eq!(t.range(), Range::with_size(5, 4));
        assert_eq!(t.idx(Point::new(4, 3)), Some(19));
    }
}
