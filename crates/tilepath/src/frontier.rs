//! Open and closed sets of an A* search.
//!
//! Membership lives in the [`NodeTable`] as [`NodeState`]; this module owns
//! the priority queue over open nodes and the counters for both sets.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::node::{NodeState, NodeTable};

/// Heap entry for an open node, ordered so that `BinaryHeap` (a max-heap)
/// pops the lowest `total` first and, among equal totals, the earliest
/// inserted entry.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    total: f32,
    seq: u64,
    idx: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total
            .total_cmp(&self.total)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Priority frontier plus closed-set bookkeeping for one search.
///
/// Removing a node from the open set is lazy: the node's state and sequence
/// number in the table are authoritative, and heap entries that no longer
/// match are discarded when they surface.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<OpenEntry>,
    next_seq: u64,
    open: usize,
    closed: usize,
}

impl Frontier {
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
        self.open = 0;
        self.closed = 0;
    }

    /// Number of nodes currently open.
    #[inline]
    pub(crate) fn open_len(&self) -> usize {
        self.open
    }

    /// Number of nodes currently closed.
    #[inline]
    pub(crate) fn closed_len(&self) -> usize {
        self.closed
    }

    /// Insert `idx` into the open set keyed by its current total cost.
    pub(crate) fn push(&mut self, nodes: &mut NodeTable, idx: usize) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let n = &mut nodes[idx];
        debug_assert_eq!(n.state, NodeState::Unvisited);
        n.state = NodeState::Open;
        n.seq = seq;
        self.heap.push(OpenEntry {
            total: n.total(),
            seq,
            idx,
        });
        self.open += 1;
    }

    /// Best open node without removing it from the open set.
    pub(crate) fn peek(&mut self, nodes: &NodeTable) -> Option<usize> {
        while let Some(top) = self.heap.peek() {
            let n = &nodes[top.idx];
            if n.state == NodeState::Open && n.seq == top.seq {
                return Some(top.idx);
            }
            self.heap.pop();
        }
        None
    }

    /// Move the best open node to the closed set and return it.
    pub(crate) fn pop_to_closed(&mut self, nodes: &mut NodeTable) -> Option<usize> {
        let idx = self.peek(nodes)?;
        self.heap.pop();
        nodes.close(idx);
        self.open -= 1;
        self.closed += 1;
        Some(idx)
    }

    /// Remove `idx` from the open or closed set, whichever holds it.
    pub(crate) fn evict(&mut self, nodes: &mut NodeTable, idx: usize) {
        match nodes.evict(idx) {
            NodeState::Open => self.open -= 1,
            NodeState::Closed => self.closed -= 1,
            NodeState::Unvisited => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath_core::Range;

    fn table(costs: &[f32]) -> NodeTable {
        let mut t = NodeTable::new(Range::with_size(costs.len() as i32, 1));
        for (i, &c) in costs.iter().enumerate() {
            t[i].cost = c;
            t[i].heuristic = 0.0;
        }
        t
    }

    #[test]
    fn pops_lowest_total_first() {
        let mut t = table(&[5.0, 1.0, 3.0]);
        let mut f = Frontier::default();
        for i in 0..3 {
            f.push(&mut t, i);
        }
        assert_eq!(f.pop_to_closed(&mut t), Some(1));
        assert_eq!(f.pop_to_closed(&mut t), Some(2));
        assert_eq!(f.pop_to_closed(&mut t), Some(0));
        assert_eq!(f.pop_to_closed(&mut t), None);
        assert_eq!(f.closed_len(), 3);
        assert_eq!(f.open_len(), 0);
    }

    #[test]
    fn ties_resolve_by_insertion_order() {
        let mut t = table(&[2.0, 2.0, 2.0, 2.0]);
        let mut f = Frontier::default();
        for i in [2, 0, 3, 1] {
            f.push(&mut t, i);
        }
        let order: Vec<usize> = std::iter::from_fn(|| f.pop_to_closed(&mut t)).collect();
        assert_eq!(order, vec![2, 0, 3, 1]);
    }

    #[test]
    fn evicted_entries_are_skipped() {
        let mut t = table(&[1.0, 2.0]);
        let mut f = Frontier::default();
        f.push(&mut t, 0);
        f.push(&mut t, 1);
        f.evict(&mut t, 0);
        assert_eq!(f.open_len(), 1);
        assert_eq!(f.peek(&t), Some(1));
    }

    #[test]
    fn reinserted_node_uses_new_priority() {
        let mut t = table(&[1.0, 4.0, 3.0]);
        let mut f = Frontier::default();
        f.push(&mut t, 0);
        f.push(&mut t, 1);
        f.push(&mut t, 2);
        assert_eq!(f.pop_to_closed(&mut t), Some(0));

        // Cheaper route to node 1 found.
        f.evict(&mut t, 1);
        t[1].cost = 2.0;
        f.push(&mut t, 1);
        assert_eq!(f.open_len(), 2);
        assert_eq!(f.pop_to_closed(&mut t), Some(1));
        assert_eq!(f.pop_to_closed(&mut t), Some(2));
        assert_eq!(f.pop_to_closed(&mut t), None);
    }

    #[test]
    fn closed_node_can_be_reopened() {
        let mut t = table(&[1.0]);
        let mut f = Frontier::default();
        f.push(&mut t, 0);
        f.pop_to_closed(&mut t);
        assert_eq!(f.closed_len(), 1);
        f.evict(&mut t, 0);
        assert_eq!(f.closed_len(), 0);
        f.push(&mut t, 0);
        assert_eq!(t[0].state, NodeState::Open);
        assert_eq!(f.peek(&t), Some(0));
    }

    #[test]
    fn clear_resets_counters() {
        let mut t = table(&[1.0, 1.0]);
        let mut f = Frontier::default();
        f.push(&mut t, 0);
        f.push(&mut t, 1);
        f.pop_to_closed(&mut t);
        f.clear();
        assert_eq!(f.open_len(), 0);
        assert_eq!(f.closed_len(), 0);
        t.reset();
        assert_eq!(f.peek(&t), None);
    }
}
